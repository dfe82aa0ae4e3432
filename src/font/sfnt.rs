//! Minimal sfnt container handling.
//!
//! PDF embeds a single face, but the stock Japanese system fonts ship as
//! TrueType collections. [`extract_face`] rebuilds a standalone sfnt for
//! one face of a collection by copying its table directory and tables.

/// `ttcf` collection tag.
const COLLECTION_TAG: &[u8; 4] = b"ttcf";

const SFNT_HEADER_LEN: usize = 12;
const TABLE_RECORD_LEN: usize = 16;

/// Whether `data` is a TrueType collection.
pub fn is_collection(data: &[u8]) -> bool {
    data.get(..4) == Some(COLLECTION_TAG.as_slice())
}

/// Number of faces in `data` (1 for a plain font file).
pub fn face_count(data: &[u8]) -> Result<u32, String> {
    if is_collection(data) {
        read_u32(data, 8)
    } else {
        Ok(1)
    }
}

/// Return a standalone sfnt containing face `index` of `data`.
///
/// A plain font file is returned unchanged for index 0.
pub fn extract_face(data: &[u8], index: u32) -> Result<Vec<u8>, String> {
    if !is_collection(data) {
        if index != 0 {
            return Err(format!("face index {index} requested from a single-face font"));
        }
        return Ok(data.to_vec());
    }

    let count = read_u32(data, 8)?;
    if index >= count {
        return Err(format!("face index {index} out of range (collection has {count})"));
    }
    let face_offset = read_u32(data, 12 + 4 * index as usize)? as usize;

    let version = read_u32(data, face_offset)?;
    let num_tables = read_u16(data, face_offset + 4)? as usize;

    let mut tables = Vec::with_capacity(num_tables);
    for i in 0..num_tables {
        let record = face_offset + SFNT_HEADER_LEN + i * TABLE_RECORD_LEN;
        let tag = read_u32(data, record)?;
        let checksum = read_u32(data, record + 4)?;
        let offset = read_u32(data, record + 8)? as usize;
        let length = read_u32(data, record + 12)? as usize;
        let body = offset
            .checked_add(length)
            .and_then(|end| data.get(offset..end))
            .ok_or_else(|| format!("table {} extends past end of file", tag_name(tag)))?;
        tables.push((tag, checksum, body));
    }

    let directory_len = SFNT_HEADER_LEN + num_tables * TABLE_RECORD_LEN;
    let body_len: usize = tables.iter().map(|(_, _, body)| padded(body.len())).sum();
    let mut out = Vec::with_capacity(directory_len + body_len);

    out.extend_from_slice(&version.to_be_bytes());
    out.extend_from_slice(&(num_tables as u16).to_be_bytes());
    // searchRange, entrySelector and rangeShift are derived from the table count.
    let entry_selector = if num_tables == 0 {
        0
    } else {
        usize::BITS - 1 - num_tables.leading_zeros()
    };
    let search_range = (1usize << entry_selector) * TABLE_RECORD_LEN;
    let range_shift = (num_tables * TABLE_RECORD_LEN).saturating_sub(search_range);
    out.extend_from_slice(&(search_range as u16).to_be_bytes());
    out.extend_from_slice(&(entry_selector as u16).to_be_bytes());
    out.extend_from_slice(&(range_shift as u16).to_be_bytes());

    let mut offset = directory_len;
    for (tag, checksum, body) in &tables {
        out.extend_from_slice(&tag.to_be_bytes());
        out.extend_from_slice(&checksum.to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        offset += padded(body.len());
    }
    for (_, _, body) in &tables {
        out.extend_from_slice(body);
        out.resize(padded(out.len()), 0);
    }

    Ok(out)
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn tag_name(tag: u32) -> String {
    String::from_utf8_lossy(&tag.to_be_bytes()).into_owned()
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16, String> {
    data.get(offset..offset + 2)
        .map(|b| u16::from_be_bytes([b[0], b[1]]))
        .ok_or_else(|| format!("unexpected end of font data at offset {offset}"))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32, String> {
    data.get(offset..offset + 4)
        .map(|b| u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| format!("unexpected end of font data at offset {offset}"))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A one-table sfnt whose single table holds `payload`.
    pub(crate) fn tiny_sfnt(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        out.extend_from_slice(&1u16.to_be_bytes());
        out.extend_from_slice(&16u16.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(tag);
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&28u32.to_be_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(payload);
        out.resize(padded(out.len()), 0);
        out
    }

    /// Wrap standalone sfnts into a collection with absolute table offsets.
    fn collection(faces: &[Vec<u8>]) -> Vec<u8> {
        let header_len = 12 + 4 * faces.len();
        let mut out = Vec::new();
        out.extend_from_slice(b"ttcf");
        out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
        out.extend_from_slice(&(faces.len() as u32).to_be_bytes());

        let mut offset = header_len;
        for face in faces {
            out.extend_from_slice(&(offset as u32).to_be_bytes());
            offset += face.len();
        }
        for face in faces {
            let base = out.len();
            let mut face = face.clone();
            // Relocate the single table record offset (at byte 20) to be absolute.
            let relative = u32::from_be_bytes([face[20], face[21], face[22], face[23]]);
            face[20..24].copy_from_slice(&(relative + base as u32).to_be_bytes());
            out.extend_from_slice(&face);
        }
        out
    }

    #[test]
    fn test_plain_font_passes_through() {
        let font = tiny_sfnt(b"test", b"abcd");
        assert!(!is_collection(&font));
        assert_eq!(face_count(&font).unwrap(), 1);
        assert_eq!(extract_face(&font, 0).unwrap(), font);
        assert!(extract_face(&font, 1).is_err());
    }

    #[test]
    fn test_extract_second_face() {
        let first = tiny_sfnt(b"aaaa", b"first");
        let second = tiny_sfnt(b"bbbb", b"second!");
        let ttc = collection(&[first, second.clone()]);

        assert!(is_collection(&ttc));
        assert_eq!(face_count(&ttc).unwrap(), 2);
        assert_eq!(extract_face(&ttc, 1).unwrap(), second);
    }

    #[test]
    fn test_extract_out_of_range() {
        let ttc = collection(&[tiny_sfnt(b"aaaa", b"x")]);
        let err = extract_face(&ttc, 3).unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn test_truncated_collection() {
        let mut ttc = collection(&[tiny_sfnt(b"aaaa", b"payload")]);
        ttc.truncate(30);
        assert!(extract_face(&ttc, 0).is_err());
    }
}
