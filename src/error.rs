//! Error types for meihyo operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a roster or writing sheets.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("could not decode input as UTF-8 or Shift-JIS")]
    Decode,

    #[error(
        "font file not found: {}\n\
         Install the font or pass its location with --primary-font / --fallback-font \
         (or MEIHYO_PRIMARY_FONT / MEIHYO_FALLBACK_FONT).",
        path.display()
    )]
    FontMissing { path: PathBuf },

    #[error("invalid font {}: {reason}", path.display())]
    FontInvalid { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, Error>;
