//! # meihyo
//!
//! Vertical Japanese nameplate and caption sheets from roster CSV files.
//!
//! ## Features
//!
//! - Read roster CSV exports (UTF-8 or Shift-JIS)
//! - Normalize each row into display fields (work-type variants, composed
//!   work lines, full-width folding)
//! - Typeset vertical text with per-character offsets, sideways glyphs and
//!   hanging punctuation
//! - Write A4 PDF sheets with embedded CID fonts and emulated bold
//!
//! ## Quick Start
//!
//! ```no_run
//! use meihyo::{Entry, RenderConfig, SheetExporter, read_table};
//!
//! let entries: Vec<Entry> = read_table("roster.csv")?
//!     .iter()
//!     .map(Entry::from_raw)
//!     .collect();
//!
//! let exporter = SheetExporter::open(RenderConfig::default())?;
//! exporter.write_combined(&entries, "roster.pdf")?;
//! # Ok::<(), meihyo::Error>(())
//! ```
//!
//! ## Layout without fonts
//!
//! The layout engine only needs advance widths, so it can run against the
//! uniform [`FullWidth`](layout::FullWidth) metrics:
//!
//! ```
//! use meihyo::compose::Composer;
//! use meihyo::layout::{FullWidth, LayoutTable};
//! use meihyo::Entry;
//!
//! let entry = Entry {
//!     name: "山田太郎".into(),
//!     ..Entry::default()
//! };
//!
//! let table = LayoutTable::standard();
//! let pages = Composer::new(&table, &FullWidth).compose_pages(&[entry]);
//! assert_eq!(pages.len(), 1);
//! assert_eq!(pages[0].glyphs().count(), 4);
//! ```

pub mod compose;
pub mod error;
pub mod export;
pub mod font;
pub mod layout;
pub mod roster;
pub mod util;

pub use error::{Error, Result};
pub use export::{RenderConfig, SheetExporter};
pub use font::{FontPaths, FontSet};
pub use layout::{LayoutTable, Template};
pub use roster::{Entry, Record, prepare, read_table};
