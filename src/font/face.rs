//! A loaded font face and the metrics the layout and PDF writer need.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ttf_parser::{GlyphId, name_id};

use super::sfnt;
use crate::error::{Error, Result};

/// Outline format of the embedded program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outline {
    /// `glyf` outlines, embedded as FontFile2.
    TrueType,
    /// CFF outlines in an OpenType wrapper, embedded as FontFile3.
    Cff,
}

/// A parsed font face.
///
/// The metrics are read once at load time so no borrow of the font data
/// outlives construction.
#[derive(Debug, Clone)]
pub struct FontFace {
    path: PathBuf,
    data: Vec<u8>,
    postscript_name: String,
    outline: Outline,
    units_per_em: u16,
    ascent: i16,
    descent: i16,
    cap_height: i16,
    bbox: [i16; 4],
    glyphs: HashMap<char, u16>,
    advances: Vec<u16>,
}

impl FontFace {
    /// Load face `index` from the font file at `path`.
    pub fn open(path: impl AsRef<Path>, index: u32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::FontMissing {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_bytes(path, &bytes, index)
    }

    /// Parse face `index` from in-memory font data. `path` is only used for
    /// error messages and naming.
    pub fn from_bytes(path: impl AsRef<Path>, bytes: &[u8], index: u32) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: String| Error::FontInvalid {
            path: path.to_path_buf(),
            reason,
        };

        let data = sfnt::extract_face(bytes, index).map_err(invalid)?;
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| invalid(e.to_string()))?;

        let outline = if face.tables().cff.is_some() {
            Outline::Cff
        } else if face.tables().glyf.is_some() {
            Outline::TrueType
        } else {
            return Err(invalid("no glyf or CFF outlines".to_string()));
        };

        let mut glyphs = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables {
                if !subtable.is_unicode() {
                    continue;
                }
                subtable.codepoints(|cp| {
                    if let Some(ch) = char::from_u32(cp)
                        && let Some(gid) = subtable.glyph_index(cp)
                    {
                        glyphs.entry(ch).or_insert(gid.0);
                    }
                });
            }
        }
        if glyphs.is_empty() {
            return Err(invalid("no Unicode character map".to_string()));
        }

        let advances = (0..face.number_of_glyphs())
            .map(|gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or(0))
            .collect();

        let bbox = face.global_bounding_box();
        let postscript_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string())
            .map(|name| sanitize_font_name(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback_name(path, index));

        let ascent = face.ascender();
        let descent = face.descender();
        let cap_height = face.capital_height().unwrap_or(ascent);
        let units_per_em = face.units_per_em().max(1);
        log::debug!(
            "loaded {} from {} ({} glyphs, {} mapped chars)",
            postscript_name,
            path.display(),
            face.number_of_glyphs(),
            glyphs.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            data,
            postscript_name,
            outline,
            units_per_em,
            ascent,
            descent,
            cap_height,
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            glyphs,
            advances,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The standalone sfnt bytes of this face.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    pub fn outline(&self) -> Outline {
        self.outline
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Glyph id for `ch`, if the face maps it.
    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.glyphs.get(&ch).copied()
    }

    /// Advance of glyph `gid` in font units.
    pub fn advance(&self, gid: u16) -> u16 {
        self.advances.get(gid as usize).copied().unwrap_or(0)
    }

    /// Advance of glyph `gid` in PDF glyph space (1/1000 em).
    pub fn advance_1000(&self, gid: u16) -> f32 {
        self.to_1000(self.advance(gid) as f32)
    }

    /// Advance of `ch` in points at `size`. Unmapped characters use the
    /// advance of glyph 0.
    pub fn advance_width(&self, ch: char, size: f32) -> f32 {
        let gid = self.glyph_id(ch).unwrap_or(0);
        self.advance(gid) as f32 * size / self.units_per_em as f32
    }

    /// Convert a value in font units to 1/1000 em.
    pub fn to_1000(&self, units: f32) -> f32 {
        units * 1000.0 / self.units_per_em as f32
    }

    pub fn ascent(&self) -> f32 {
        self.to_1000(self.ascent as f32)
    }

    pub fn descent(&self) -> f32 {
        self.to_1000(self.descent as f32)
    }

    pub fn cap_height(&self) -> f32 {
        self.to_1000(self.cap_height as f32)
    }

    /// Font bounding box `[x_min, y_min, x_max, y_max]` in 1/1000 em.
    pub fn bbox(&self) -> [f32; 4] {
        self.bbox.map(|v| self.to_1000(v as f32))
    }
}

/// Strip everything a PDF name should not carry.
fn sanitize_font_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect()
}

fn fallback_name(path: &Path, index: u32) -> String {
    let stem = path
        .file_stem()
        .map(|s| sanitize_font_name(&s.to_string_lossy()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Font".to_string());
    format!("{stem}-{index}")
}
