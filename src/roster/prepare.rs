//! Row preprocessing.
//!
//! [`prepare`] is a pure transform from a raw form row to a display row: it
//! picks the work-type dependent variants, synthesizes the composed display
//! strings and removes the columns it consumed. Running it again on its own
//! output changes nothing.

use super::columns as col;
use super::table::Record;
use super::width::to_full_width;
use super::{COPY_WORK_TYPE, NO_AUTHOR};

const FURIGANA_OPEN: char = '（';
const FURIGANA_CLOSE: char = '）';

/// Resubmission status codes and the labels printed for them.
const RESUBMISSION_LABELS: &[(&str, &str)] = &[
    ("再提出", "再提出"),
    ("２回以上", "やばいよ"),
    // Display labels map to themselves so preparing twice is stable.
    ("やばいよ", "やばいよ"),
];

/// Transform a raw roster row into the display fields used by layout.
///
/// The input is never modified; a new record is returned.
pub fn prepare(raw: &Record) -> Record {
    let mut row = raw.clone();

    if row.contains(col::STUDY_NOTES) {
        let folded = to_full_width(row.get(col::STUDY_NOTES));
        row.set(col::STUDY_NOTES, folded);
    }

    select_work_variants(&mut row);

    if row.contains(col::WORK_TYPE) || row.contains(col::AUTHOR) {
        let caption = work_caption(
            row.get(col::WORK_TYPE),
            row.get(col::AUTHOR),
            row.get(col::WORK_NAME),
        );
        row.set(col::WORK_CAPTION, caption);
    }

    row.remove(col::TIMESTAMP);

    if row.contains(col::DEPARTMENT) && row.contains(col::YEAR) {
        let combined = format!("{} {}", row.get(col::DEPARTMENT), row.get(col::YEAR));
        row.set(col::DEPARTMENT_YEAR, combined);
        row.remove(col::DEPARTMENT);
        row.remove(col::YEAR);
    }

    if row.contains(col::WORK_NAME) && row.contains(col::WORK_TYPE) {
        let info = work_info(
            row.get(col::WORK_TYPE),
            row.get(col::AUTHOR),
            row.get(col::CREATION_KIND),
            row.get(col::WORK_NAME),
        );
        row.set(col::WORK_INFO, info);
        row.remove(col::WORK_TYPE);
        row.remove(col::WORK_NAME);
        row.remove(col::AUTHOR);
    }

    let furigana = wrap_furigana(row.get(col::FURIGANA));
    row.set(col::FURIGANA, furigana);

    let label = resubmission_label(row.get(col::RESUBMISSION));
    row.set(col::RESUBMISSION, label);

    row
}

/// Copy the transcription, work name and comment variants that match the
/// work type into their plain columns.
///
/// A variant column that is absent leaves the plain column as it is. All
/// variant columns are consumed, so a row without any is left alone.
fn select_work_variants(row: &mut Record) {
    if !VARIANT_COLUMNS.iter().any(|variant| row.contains(variant)) {
        return;
    }

    let variants = if row.get(col::WORK_TYPE) == COPY_WORK_TYPE {
        [
            (col::TRANSCRIPTION, col::TRANSCRIPTION_COPY),
            (col::WORK_NAME, col::WORK_NAME_COPY),
            (col::COMMENT, col::COMMENT_COPY),
        ]
    } else {
        [
            (col::TRANSCRIPTION, col::TRANSCRIPTION_ORIGINAL),
            (col::WORK_NAME, col::WORK_NAME_ORIGINAL),
            (col::COMMENT, col::COMMENT_ORIGINAL),
        ]
    };

    for (target, source) in variants {
        if row.contains(source) {
            let value = row.get(source).to_string();
            row.set(target, value);
        } else if !row.contains(target) {
            row.set(target, "");
        }
    }

    for variant in VARIANT_COLUMNS {
        row.remove(variant);
    }
}

const VARIANT_COLUMNS: [&str; 6] = [
    col::TRANSCRIPTION_COPY,
    col::WORK_NAME_COPY,
    col::COMMENT_COPY,
    col::TRANSCRIPTION_ORIGINAL,
    col::WORK_NAME_ORIGINAL,
    col::COMMENT_ORIGINAL,
];

/// Work line used in the explanation block.
///
/// ```
/// use meihyo::roster::Entry;
/// # use meihyo::roster::{prepare, Record};
/// let row = Record::new()
///     .with("作品形式", "臨")
///     .with("作者名", "山田")
///     .with("作品名（臨書）", "桜");
/// assert_eq!(Entry::from_record(&prepare(&row)).work_caption, "山田「桜」");
/// ```
fn work_caption(work_type: &str, author: &str, work_name: &str) -> String {
    if author == NO_AUTHOR {
        format!("「{work_name}」")
    } else if work_type == COPY_WORK_TYPE {
        format!("{author}「{work_name}」")
    } else {
        String::new()
    }
}

/// Work line printed in the vertical work-info column.
fn work_info(work_type: &str, author: &str, creation_kind: &str, work_name: &str) -> String {
    if author.is_empty() {
        format!("{creation_kind}　「{work_name}」")
    } else if author == NO_AUTHOR {
        format!("{work_type}　「{work_name}」")
    } else {
        format!("{work_type}　{author}　「{work_name}」")
    }
}

fn wrap_furigana(furigana: &str) -> String {
    let already_wrapped = furigana.starts_with(FURIGANA_OPEN)
        && furigana.ends_with(FURIGANA_CLOSE)
        && furigana.chars().count() >= 2;
    if already_wrapped {
        furigana.to_string()
    } else {
        format!("{FURIGANA_OPEN}{furigana}{FURIGANA_CLOSE}")
    }
}

fn resubmission_label(status: &str) -> &'static str {
    RESUBMISSION_LABELS
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, label)| *label)
        .unwrap_or("")
}

/// The display fields of one prepared roster row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Department and year, e.g. `文学部 3年`.
    pub department_year: String,
    pub name: String,
    /// Reading of the name, already wrapped in full-width parentheses.
    pub furigana: String,
    /// Vertical work line: type, author and title.
    pub work_info: String,
    /// Work line for the explanation block.
    pub work_caption: String,
    pub transcription: String,
    pub comment: String,
    /// Free-text explanation, folded to full width.
    pub study_notes: String,
    pub resubmission: String,
}

impl Entry {
    /// Read the display fields from a prepared record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            department_year: record.get(col::DEPARTMENT_YEAR).to_string(),
            name: record.get(col::NAME).to_string(),
            furigana: record.get(col::FURIGANA).to_string(),
            work_info: record.get(col::WORK_INFO).to_string(),
            work_caption: record.get(col::WORK_CAPTION).to_string(),
            transcription: record.get(col::TRANSCRIPTION).to_string(),
            comment: record.get(col::COMMENT).to_string(),
            study_notes: record.get(col::STUDY_NOTES).to_string(),
            resubmission: record.get(col::RESUBMISSION).to_string(),
        }
    }

    /// Prepare a raw row and read its display fields.
    pub fn from_raw(raw: &Record) -> Self {
        Self::from_record(&prepare(raw))
    }

    /// Write the display fields back out as a record.
    pub fn to_record(&self) -> Record {
        Record::new()
            .with(col::DEPARTMENT_YEAR, self.department_year.as_str())
            .with(col::NAME, self.name.as_str())
            .with(col::FURIGANA, self.furigana.as_str())
            .with(col::WORK_INFO, self.work_info.as_str())
            .with(col::WORK_CAPTION, self.work_caption.as_str())
            .with(col::TRANSCRIPTION, self.transcription.as_str())
            .with(col::COMMENT, self.comment.as_str())
            .with(col::STUDY_NOTES, self.study_notes.as_str())
            .with(col::RESUBMISSION, self.resubmission.as_str())
    }
}
