//! The field layout table: where each field of an entry goes on the page.
//!
//! The table is plain data. [`LayoutTable::standard`] is the built-in
//! nameplate layout; a replacement can be loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::adjust::AdjustmentSet;
use crate::error::{Error, Result};
use crate::font::DEFAULT_FALLBACK_CHARS;

/// A4 portrait width in points.
pub const PAGE_WIDTH: f32 = 595.2756;
/// A4 portrait height in points.
pub const PAGE_HEIGHT: f32 = 841.8898;

/// Horizontal offset of the second entry on a page.
pub const SECOND_SLOT_OFFSET: f32 = 300.0;

/// The display fields of an entry that have a place on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    DepartmentYear,
    /// Name with its reading.
    Name,
    WorkInfo,
    Transcription,
    Comment,
    StudyNotes,
    WorkCaption,
    Resubmission,
}

/// Horizontal anchor of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnchorX {
    Fixed(f32),
    /// Candidates indexed by the text's wrap count, clamped to the last one.
    ByWrapCount(Vec<f32>),
}

impl AnchorX {
    /// The anchor for a text that wraps `wraps` times.
    pub fn resolve(&self, wraps: usize) -> f32 {
        match self {
            AnchorX::Fixed(x) => *x,
            AnchorX::ByWrapCount(candidates) => candidates
                .get(wraps)
                .or_else(|| candidates.last())
                .copied()
                .unwrap_or(0.0),
        }
    }
}

/// How a field's text is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Flow {
    /// A single vertical column, no wrapping.
    Column,
    /// Vertical columns of at most `max_chars`, right to left.
    WrappedColumns { max_chars: usize, line_spacing: f32 },
    /// Horizontal lines of at most `max_chars`, top to bottom.
    Lines {
        max_chars: usize,
        line_height: f32,
        #[serde(default)]
        centered: bool,
    },
    /// Name column followed by its reading in a smaller size.
    NameWithReading {
        reading_size: f32,
        /// Horizontal shift of the reading relative to the name.
        reading_dx: f32,
        /// Extra drop between name and reading.
        reading_gap: f32,
    },
}

/// Placement of one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub field: Field,
    pub x: AnchorX,
    pub y: f32,
    pub font_size: f32,
    /// Character advance as a multiple of the font size.
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    pub flow: Flow,
    #[serde(default)]
    pub adjustments: AdjustmentSet,
}

fn default_pitch() -> f32 {
    1.0
}

/// Static page furniture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
    },
}

impl Shape {
    /// The same shape moved right by `dx`.
    pub fn offset(self, dx: f32) -> Shape {
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => Shape::Rect {
                x: x + dx,
                y,
                width,
                height,
            },
            Shape::Line { x1, y1, x2, y2 } => Shape::Line {
                x1: x1 + dx,
                y1,
                x2: x2 + dx,
                y2,
            },
        }
    }
}

/// Complete sheet layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTable {
    /// Frame drawn for every entry.
    pub frame: Vec<Shape>,
    #[serde(default = "default_frame_line_width")]
    pub frame_line_width: f32,
    /// Horizontal offset of the second entry on a page.
    #[serde(default = "default_second_slot_offset")]
    pub second_slot_offset: f32,
    /// Characters always drawn with the fallback face.
    #[serde(default = "default_fallback_chars")]
    pub fallback_chars: Vec<char>,
    pub fields: Vec<FieldLayout>,
}

fn default_frame_line_width() -> f32 {
    1.0
}

fn default_second_slot_offset() -> f32 {
    SECOND_SLOT_OFFSET
}

fn default_fallback_chars() -> Vec<char> {
    DEFAULT_FALLBACK_CHARS.to_vec()
}

impl Default for LayoutTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LayoutTable {
    /// The built-in layout shared by nameplates and captions.
    pub fn standard() -> Self {
        let mut frame = vec![
            Shape::Rect {
                x: 20.0,
                y: 20.0,
                width: 260.0,
                height: 190.0,
            },
            Shape::Rect {
                x: 20.0,
                y: 230.0,
                width: 260.0,
                height: 580.0,
            },
        ];
        for x in [120.0, 192.0, 236.0] {
            frame.push(Shape::Line {
                x1: x,
                y1: 230.0,
                x2: x,
                y2: 810.0,
            });
        }
        frame.push(Shape::Line {
            x1: 236.0,
            y1: 520.0,
            x2: 280.0,
            y2: 520.0,
        });

        let body = Flow::WrappedColumns {
            max_chars: 55,
            line_spacing: 20.0,
        };

        let fields = vec![
            FieldLayout {
                field: Field::DepartmentYear,
                x: AnchorX::Fixed(250.0),
                y: 780.0,
                font_size: 18.0,
                pitch: 1.0,
                flow: Flow::Column,
                adjustments: AdjustmentSet::DepartmentYear,
            },
            FieldLayout {
                field: Field::Name,
                x: AnchorX::Fixed(250.0),
                y: 495.0,
                font_size: 18.0,
                pitch: 1.0,
                flow: Flow::NameWithReading {
                    reading_size: 13.0,
                    reading_dx: 2.75,
                    reading_gap: 0.5,
                },
                adjustments: AdjustmentSet::Name,
            },
            FieldLayout {
                field: Field::WorkInfo,
                x: AnchorX::Fixed(206.0),
                y: 780.0,
                font_size: 18.0,
                pitch: 1.0,
                flow: Flow::Column,
                adjustments: AdjustmentSet::WorkInfo,
            },
            FieldLayout {
                field: Field::Transcription,
                x: AnchorX::ByWrapCount(vec![152.0, 162.0, 172.0]),
                y: 786.0,
                font_size: 10.0,
                pitch: 1.0,
                flow: body.clone(),
                adjustments: AdjustmentSet::Punctuation,
            },
            FieldLayout {
                field: Field::Comment,
                x: AnchorX::ByWrapCount(vec![70.0, 80.0, 85.0, 95.0, 105.0]),
                y: 786.0,
                font_size: 10.0,
                pitch: 1.0,
                flow: body,
                adjustments: AdjustmentSet::Punctuation,
            },
            FieldLayout {
                field: Field::StudyNotes,
                x: AnchorX::Fixed(25.0),
                y: 170.0,
                font_size: 10.0,
                pitch: 1.0,
                flow: Flow::Lines {
                    max_chars: 25,
                    line_height: 12.0,
                    centered: false,
                },
                adjustments: AdjustmentSet::Punctuation,
            },
            FieldLayout {
                field: Field::WorkCaption,
                x: AnchorX::Fixed(150.0),
                y: 190.0,
                font_size: 14.0,
                pitch: 1.0,
                flow: Flow::Lines {
                    max_chars: 25,
                    line_height: 16.0,
                    centered: true,
                },
                adjustments: AdjustmentSet::WorkName,
            },
            FieldLayout {
                field: Field::Resubmission,
                x: AnchorX::Fixed(150.0),
                y: 5.0,
                font_size: 14.0,
                pitch: 1.0,
                flow: Flow::Lines {
                    max_chars: 25,
                    line_height: 16.0,
                    centered: true,
                },
                adjustments: AdjustmentSet::Punctuation,
            },
        ];

        Self {
            frame,
            frame_line_width: 1.0,
            second_slot_offset: SECOND_SLOT_OFFSET,
            fallback_chars: default_fallback_chars(),
            fields,
        }
    }

    /// Parse and validate a layout from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let table: LayoutTable = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    /// Load and validate a layout file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let table = Self::from_json(&text)?;
        log::info!(
            "loaded layout with {} fields from {}",
            table.fields.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every field can be laid out.
    pub fn validate(&self) -> Result<()> {
        for layout in &self.fields {
            let name = format!("{:?}", layout.field);
            if layout.font_size.is_nan() || layout.font_size <= 0.0 {
                return Err(Error::InvalidLayout(format!(
                    "{name}: font_size must be positive"
                )));
            }
            if let AnchorX::ByWrapCount(candidates) = &layout.x
                && candidates.is_empty()
            {
                return Err(Error::InvalidLayout(format!(
                    "{name}: x candidate list is empty"
                )));
            }
            match layout.flow {
                Flow::WrappedColumns { max_chars: 0, .. } | Flow::Lines { max_chars: 0, .. } => {
                    return Err(Error::InvalidLayout(format!(
                        "{name}: max_chars must be at least 1"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// The layout for `field`, if the table places it.
    pub fn field(&self, field: Field) -> Option<&FieldLayout> {
        self.fields.iter().find(|layout| layout.field == field)
    }
}

/// Which sheet is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    /// Exhibition nameplate.
    #[default]
    Nameplate,
    /// Explanation caption.
    Caption,
}

impl Template {
    /// Emulated-bold stroke width as a fraction of the font size.
    pub fn bold_ratio(self) -> f32 {
        match self {
            Template::Nameplate => 0.05,
            Template::Caption => 0.03,
        }
    }
}

impl std::str::FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nameplate" => Ok(Template::Nameplate),
            "caption" => Ok(Template::Caption),
            _ => Err(format!("unknown template: {s}")),
        }
    }
}
