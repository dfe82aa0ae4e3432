//! Small shared helpers: input decoding and file-name hygiene.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// Decode roster bytes to a string.
///
/// This function:
/// 1. First tries UTF-8 (a leading BOM is stripped)
/// 2. If malformed, tries Shift-JIS (spreadsheet exports on Japanese Windows)
/// 3. Fails with [`Error::Decode`] when neither decodes cleanly
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
///
/// # Examples
///
/// ```
/// use meihyo::util::decode_text;
///
/// assert_eq!(decode_text("氏名".as_bytes()).unwrap(), "氏名");
///
/// let (sjis, _, _) = encoding_rs::SHIFT_JIS.encode("氏名");
/// assert_eq!(decode_text(&sjis).unwrap(), "氏名");
/// ```
pub fn decode_text(bytes: &[u8]) -> Result<Cow<'_, str>> {
    let (result, malformed) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if !malformed {
        return Ok(result);
    }

    let (result, malformed) = encoding_rs::SHIFT_JIS.decode_without_bom_handling(bytes);
    if malformed {
        return Err(Error::Decode);
    }
    log::info!("input is not UTF-8, decoded as Shift-JIS");
    Ok(result)
}

/// Characters that are not allowed in file names on common platforms.
const ILLEGAL_FILENAME_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Strip characters that cannot appear in a file name.
///
/// ```
/// use meihyo::util::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("山田 臨　「蘭亭序」"), "山田 臨　「蘭亭序」");
/// assert_eq!(sanitize_file_stem(r#"a/b\c:d*e?f"g<h>i|j"#), "abcdefghij");
/// ```
pub fn sanitize_file_stem(text: &str) -> String {
    text.chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("氏名,ふりがな".as_bytes());
        assert_eq!(decode_text(&bytes).unwrap(), "氏名,ふりがな");
    }

    #[test]
    fn test_decode_utf8_borrows() {
        let text = decode_text(b"plain ascii").unwrap();
        assert!(matches!(text, Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_shift_jis_fallback() {
        let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode("釈文（臨書）,コメント");
        let text = decode_text(&encoded).unwrap();
        assert_eq!(text, "釈文（臨書）,コメント");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        // 0xFD is neither a UTF-8 byte nor a Shift-JIS lead byte.
        let bytes = [b'a', 0xFD, b'b'];
        assert!(matches!(decode_text(&bytes), Err(Error::Decode)));
    }

    #[test]
    fn test_sanitize_keeps_spaces() {
        assert_eq!(sanitize_file_stem("a b"), "a b");
        assert_eq!(sanitize_file_stem(""), "");
    }
}
