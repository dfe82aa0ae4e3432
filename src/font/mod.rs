//! Font loading and per-character face selection.
//!
//! Sheets are set in two faces: a decorative primary face, and a fallback
//! face for the handful of characters the primary one lacks or renders
//! badly. [`Substitution`] decides the face for each character independently.

mod face;
pub mod sfnt;

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::TextMeasure;

pub use face::{FontFace, Outline};

/// Default primary face (HG Gyosho E).
pub const DEFAULT_PRIMARY_FONT: &str = "C:/Windows/Fonts/HGRGE.TTC";
/// Default fallback face (MS Mincho).
pub const DEFAULT_FALLBACK_FONT: &str = "C:/Windows/Fonts/msmincho.ttc";

/// Characters drawn with the fallback face by default.
pub const DEFAULT_FALLBACK_CHARS: &[char] = &['嵗', '俻'];

/// Which of the two faces a glyph is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    Primary,
    Fallback,
}

impl FontRole {
    /// Resource name used for this face in PDF content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontRole::Primary => "F1",
            FontRole::Fallback => "F2",
        }
    }
}

/// Per-character face override map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    fallback: HashSet<char>,
}

impl Substitution {
    pub fn new(fallback: impl IntoIterator<Item = char>) -> Self {
        Self {
            fallback: fallback.into_iter().collect(),
        }
    }

    /// The face `ch` is drawn with.
    pub fn role_for(&self, ch: char) -> FontRole {
        if self.fallback.contains(&ch) {
            FontRole::Fallback
        } else {
            FontRole::Primary
        }
    }
}

impl Default for Substitution {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_CHARS.iter().copied())
    }
}

/// Location of one face on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    pub path: PathBuf,
    /// Face index within a collection.
    pub index: u32,
}

impl FontSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            index: 0,
        }
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn load(&self) -> Result<FontFace> {
        FontFace::open(&self.path, self.index)
    }
}

/// Where to load the primary and fallback faces from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPaths {
    pub primary: FontSource,
    pub fallback: FontSource,
}

impl Default for FontPaths {
    fn default() -> Self {
        Self {
            primary: FontSource::new(DEFAULT_PRIMARY_FONT),
            fallback: FontSource::new(DEFAULT_FALLBACK_FONT),
        }
    }
}

impl FontPaths {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: FontSource::new(primary),
            fallback: FontSource::new(fallback),
        }
    }
}

/// The two loaded faces.
#[derive(Debug, Clone)]
pub struct FontSet {
    primary: FontFace,
    fallback: FontFace,
}

impl FontSet {
    /// Load both faces. Fails before anything is rendered if either is
    /// missing or unreadable.
    pub fn load(paths: &FontPaths) -> Result<Self> {
        let primary = paths.primary.load()?;
        let fallback = paths.fallback.load()?;
        log::info!(
            "fonts: primary {} ({}), fallback {} ({})",
            primary.postscript_name(),
            paths.primary.path.display(),
            fallback.postscript_name(),
            paths.fallback.path.display()
        );
        Ok(Self { primary, fallback })
    }

    pub fn from_faces(primary: FontFace, fallback: FontFace) -> Self {
        Self { primary, fallback }
    }

    pub fn face(&self, role: FontRole) -> &FontFace {
        match role {
            FontRole::Primary => &self.primary,
            FontRole::Fallback => &self.fallback,
        }
    }
}

impl TextMeasure for FontSet {
    fn advance(&self, ch: char, role: FontRole, size: f32) -> f32 {
        self.face(role).advance_width(ch, size)
    }
}
