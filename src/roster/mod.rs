//! Roster input: reading the submission table and preparing rows for layout.
//!
//! - [`table`]: CSV decoding into loosely-typed [`Record`]s
//! - [`prepare`]: the pure per-row transform and the typed [`Entry`] view
//! - [`width`]: half-width to full-width folding for free text

mod prepare;
mod table;
mod width;

pub use prepare::{Entry, prepare};
pub use table::{Record, parse_table, read_table};
pub use width::to_full_width;

/// Column labels used by the submission form export.
pub mod columns {
    pub const NAME: &str = "氏名";
    pub const FURIGANA: &str = "ふりがな";
    pub const DEPARTMENT: &str = "学部";
    pub const YEAR: &str = "学年";
    pub const DEPARTMENT_YEAR: &str = "学部学年";

    /// Work-type discriminator.
    pub const WORK_TYPE: &str = "作品形式";
    pub const AUTHOR: &str = "作者名";
    pub const CREATION_KIND: &str = "創作の種類";
    pub const WORK_NAME: &str = "作品名";
    pub const WORK_INFO: &str = "作品情報";
    pub const WORK_CAPTION: &str = "作品情報（法帖解説）";

    pub const TRANSCRIPTION: &str = "釈文";
    pub const COMMENT: &str = "コメント";
    pub const STUDY_NOTES: &str = "臨書解説";
    pub const RESUBMISSION: &str = "再提出";
    pub const TIMESTAMP: &str = "タイムスタンプ";

    pub const TRANSCRIPTION_COPY: &str = "釈文（臨書）";
    pub const WORK_NAME_COPY: &str = "作品名（臨書）";
    pub const COMMENT_COPY: &str = "コメント（臨書）";
    pub const TRANSCRIPTION_ORIGINAL: &str = "釈文（創作）";
    pub const WORK_NAME_ORIGINAL: &str = "作品名（創作）";
    pub const COMMENT_ORIGINAL: &str = "コメント（創作）";
}

/// Work-type value marking a reproduction of an existing work.
pub const COPY_WORK_TYPE: &str = "臨";

/// Author value meaning "no author" (as opposed to a blank cell).
pub const NO_AUTHOR: &str = "無し";
