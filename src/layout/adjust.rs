//! Per-character position corrections.
//!
//! The primary face draws punctuation, small kana and Latin letters at
//! horizontal-text positions. In a vertical column they have to be nudged
//! (and some turned sideways) to sit where a typesetter would put them. The
//! corrections are hand-tuned per field context and live here as plain
//! `char → Adjustment` data.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Offset (in points) applied to one character's draw position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Adjustment {
    pub dx: f32,
    pub dy: f32,
    /// Rotation override in degrees (counter-clockwise).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f32>,
}

impl Adjustment {
    pub const ZERO: Adjustment = Adjustment::new(0.0, 0.0);

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            angle: None,
        }
    }

    pub const fn rotated(dx: f32, dy: f32, angle: f32) -> Self {
        Self {
            dx,
            dy,
            angle: Some(angle),
        }
    }
}

/// Immutable lookup from character to [`Adjustment`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentMap {
    entries: HashMap<char, Adjustment>,
}

impl AdjustmentMap {
    /// Build a map from groups of characters sharing one adjustment.
    ///
    /// Later groups override earlier ones for the same character.
    pub fn from_groups(groups: &[(&str, Adjustment)]) -> Self {
        let mut entries = HashMap::new();
        for (chars, adjustment) in groups {
            for ch in chars.chars() {
                entries.insert(ch, *adjustment);
            }
        }
        Self { entries }
    }

    /// A copy of this map with `groups` layered on top.
    pub fn extended(&self, groups: &[(&str, Adjustment)]) -> Self {
        let mut map = self.clone();
        for (chars, adjustment) in groups {
            for ch in chars.chars() {
                map.entries.insert(ch, *adjustment);
            }
        }
        map
    }

    pub fn get(&self, ch: char) -> Option<&Adjustment> {
        self.entries.get(&ch)
    }

    /// The adjustment for `ch`, or a zero offset.
    pub fn offset(&self, ch: char) -> Adjustment {
        self.entries.get(&ch).copied().unwrap_or(Adjustment::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Named adjustment tables a field layout can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentSet {
    /// Body text: transcriptions, comments.
    #[default]
    Punctuation,
    /// Work titles at 18pt.
    WorkName,
    /// Work titles with sideways corner brackets.
    WorkInfo,
    /// Name and reading.
    Name,
    /// Department and year.
    DepartmentYear,
    /// Punctuation hung below the end of a full column.
    Hanging,
}

impl AdjustmentSet {
    /// The shared table for this set.
    pub fn map(self) -> &'static AdjustmentMap {
        match self {
            AdjustmentSet::Punctuation => &PUNCTUATION,
            AdjustmentSet::WorkName => &WORK_NAME,
            AdjustmentSet::WorkInfo => &WORK_INFO,
            AdjustmentSet::Name => &NAME,
            AdjustmentSet::DepartmentYear => &DEPARTMENT_YEAR,
            AdjustmentSet::Hanging => &HANGING,
        }
    }
}

const LOWER_LATIN: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const WIDE_LOWER_LATIN: &str = "ａｂｃｄｅｆｇｈｉｊｋｌｍｎｏｐｑｒｓｔｕｖｗｘｙｚ";
const WIDE_UPPER_LATIN: &str = "ＡＢＣＤＥＦＧＨＩＪＫＬＭＮＯＰＱＲＳＴＵＶＷＸＹＺ";
const DIGITS: &str = "0123456789";

/// Characters that may not begin a line or column.
const LINE_LEADING_PROHIBITED: &str = "。、」』)）]}";

/// Characters drawn sideways inside vertical text.
const ROTATED: &[&str] = &[
    "()（）[]{}「」『』ー-→←↑↓＜＞〈〉～!",
    LOWER_LATIN,
    UPPER_LATIN,
    WIDE_UPPER_LATIN,
    WIDE_LOWER_LATIN,
];

/// Rotation applied to characters in the rotated set.
pub const SIDEWAYS_ANGLE: f32 = 270.0;

/// Whether `ch` must not start a line or column (closing punctuation).
pub fn is_line_leading_prohibited(ch: char) -> bool {
    LINE_LEADING_PROHIBITED.contains(ch)
}

/// Whether `ch` is turned sideways in vertical text by default.
pub fn is_rotated(ch: char) -> bool {
    ROTATED.iter().any(|group| group.contains(ch))
}

static PUNCTUATION: LazyLock<AdjustmentMap> = LazyLock::new(|| {
    AdjustmentMap::from_groups(&[
        ("。、", Adjustment::new(7.0, 5.0)),
        ("っゃゅょぁぃぅぇぉ", Adjustment::new(1.0, 0.0)),
        ("ー", Adjustment::new(4.0, 8.0)),
        ("(", Adjustment::new(4.5, 10.0)),
        (")", Adjustment::new(4.5, 3.0)),
        ("（", Adjustment::new(4.0, 12.5)),
        ("）", Adjustment::new(4.0, 7.5)),
        ("[]{}", Adjustment::new(3.0, -5.0)),
        ("「", Adjustment::new(5.0, 12.0)),
        ("」", Adjustment::new(3.0, 4.0)),
        ("『』", Adjustment::new(3.0, -5.0)),
        ("-", Adjustment::new(12.0, 6.0)),
        ("→←↑↓", Adjustment::new(11.5, 8.0)),
        (LOWER_LATIN, Adjustment::new(4.0, 7.0)),
        (UPPER_LATIN, Adjustment::new(4.0, 7.0)),
        (DIGITS, Adjustment::new(2.5, 0.0)),
        ("!", Adjustment::new(2.5, 0.0)),
        (WIDE_UPPER_LATIN, Adjustment::new(3.5, 9.0)),
        (WIDE_LOWER_LATIN, Adjustment::new(3.5, 9.0)),
        ("，", Adjustment::new(7.0, 5.0)),
    ])
});

static WORK_NAME: LazyLock<AdjustmentMap> = LazyLock::new(|| {
    AdjustmentMap::from_groups(&[
        ("。、", Adjustment::new(5.0, 3.0)),
        ("っゃゅょぁぃぅぇ", Adjustment::new(1.0, 0.0)),
        ("ぉ", Adjustment::new(0.5, 0.0)),
        ("ー", Adjustment::new(7.0, 15.0)),
        ("(", Adjustment::new(9.5, 8.0)),
        (")", Adjustment::new(9.5, 2.0)),
        ("（", Adjustment::new(9.5, 10.0)),
        ("）", Adjustment::new(9.5, 6.0)),
        ("[]{}", Adjustment::new(2.0, -3.0)),
        ("「", Adjustment::ZERO),
        ("」", Adjustment::new(9.0, 4.0)),
        ("『』", Adjustment::new(2.0, -3.0)),
        ("-", Adjustment::new(10.0, 4.0)),
        ("→←↑↓", Adjustment::new(9.5, 6.0)),
        (UPPER_LATIN, Adjustment::new(5.0, 11.0)),
        (LOWER_LATIN, Adjustment::new(5.0, 11.0)),
        ("〈〉～", Adjustment::new(7.5, 15.0)),
        ("!", Adjustment::new(6.0, 15.0)),
        ("，", Adjustment::new(12.0, 5.0)),
    ])
});

static WORK_INFO: LazyLock<AdjustmentMap> = LazyLock::new(|| {
    WORK_NAME.extended(&[
        ("「", Adjustment::rotated(10.0, 14.0, SIDEWAYS_ANGLE)),
        ("」", Adjustment::rotated(6.0, 15.0, SIDEWAYS_ANGLE)),
    ])
});

static NAME: LazyLock<AdjustmentMap> = LazyLock::new(|| {
    AdjustmentMap::from_groups(&[
        ("。、", Adjustment::new(4.0, 2.0)),
        ("っゃゅょぁぃぅぇぉ", Adjustment::new(1.0, 1.0)),
        ("ー", Adjustment::new(8.0, 5.0)),
        ("(", Adjustment::new(8.5, 7.0)),
        (")", Adjustment::new(8.5, 1.0)),
        ("（", Adjustment::new(5.5, 10.0)),
        ("）", Adjustment::new(5.0, 11.0)),
        ("　", Adjustment::ZERO),
    ])
});

static DEPARTMENT_YEAR: LazyLock<AdjustmentMap> = LazyLock::new(|| {
    AdjustmentMap::from_groups(&[
        ("。、", Adjustment::new(6.0, 4.0)),
        (DIGITS, Adjustment::new(1.5, 0.0)),
        ("学部年生", Adjustment::ZERO),
    ])
});

static HANGING: LazyLock<AdjustmentMap> = LazyLock::new(|| {
    AdjustmentMap::from_groups(&[
        ("。、", Adjustment::new(8.0, -2.0)),
        ("」", Adjustment::new(3.0, -5.0)),
        ("』", Adjustment::new(2.0, -5.0)),
        (")", Adjustment::new(2.0, -5.0)),
        ("）]}", Adjustment::new(4.0, 0.0)),
    ])
});
