//! Vertical Japanese text layout.
//!
//! - [`adjust`]: per-character offset tables and character classes
//! - [`table`]: the field layout table (serde data)
//! - [`engine`]: glyph placement, wrapping and hanging punctuation

pub mod adjust;
mod engine;
pub mod table;

pub use adjust::{Adjustment, AdjustmentMap, AdjustmentSet};
pub use engine::{
    FullWidth, PlacedGlyph, Reading, Style, TextMeasure, Typesetter, split_lines, wrap_count,
};
pub use table::{AnchorX, Field, FieldLayout, Flow, LayoutTable, Shape, Template};
