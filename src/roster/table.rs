//! CSV roster reading.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::util::decode_text;

/// One row of the roster: column label to cell text.
///
/// Every value is a string. Looking up a column that does not exist yields
/// `""`, so a missing column behaves exactly like an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell text for `column`, or `""` when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    /// Whether the column exists, regardless of its value.
    pub fn contains(&self, column: &str) -> bool {
        self.fields.contains_key(column)
    }

    /// Set a column value, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Remove a column, returning its value if it existed.
    pub fn remove(&mut self, column: &str) -> Option<String> {
        self.fields.remove(column)
    }

    /// Number of columns present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(column, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Read a roster file from disk.
///
/// The bytes are decoded with [`decode_text`] (UTF-8, then Shift-JIS).
pub fn read_table(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;
    let text = decode_text(&bytes)?;
    let records = parse_table(&text)?;
    log::info!("read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Parse CSV text with a header row into records.
///
/// Short rows are padded with empty cells; surplus cells without a header are
/// ignored. Header labels are trimmed of surrounding whitespace.
pub fn parse_table(text: &str) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Record = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_empty())
            .map(|(i, h)| (h.clone(), row.get(i).unwrap_or("").to_string()))
            .collect();
        records.push(record);
    }
    Ok(records)
}
