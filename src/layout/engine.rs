//! Character placement.
//!
//! Every flow produces an ordered list of [`PlacedGlyph`]s: one character,
//! one position, one face. Nothing here touches a PDF; the composer and the
//! backend consume the glyph list.

use super::adjust::{
    Adjustment, AdjustmentMap, AdjustmentSet, SIDEWAYS_ANGLE, is_line_leading_prohibited,
    is_rotated,
};
use crate::font::{FontRole, Substitution};

/// A single character at its final page position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Draw origin in points, before any rotation.
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Counter-clockwise rotation in degrees, `None` for upright.
    pub rotation: Option<f32>,
    /// Column (vertical flows) or line (horizontal flows) index.
    pub line: usize,
    pub face: FontRole,
}

/// Horizontal advance lookup used for centering.
pub trait TextMeasure {
    /// Advance of `ch` in points when set at `size` in the `role` face.
    fn advance(&self, ch: char, role: FontRole, size: f32) -> f32;
}

/// Every character one em wide.
///
/// Matches the advance of ideographs in the faces sheets are set in; useful
/// where real fonts are not loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullWidth;

impl TextMeasure for FullWidth {
    fn advance(&self, _ch: char, _role: FontRole, size: f32) -> f32 {
        size
    }
}

/// Size, pitch and adjustments for a vertical run.
#[derive(Debug, Clone, Copy)]
pub struct Style<'a> {
    pub size: f32,
    /// Character advance as a multiple of `size`.
    pub pitch: f32,
    pub adjustments: &'a AdjustmentMap,
}

impl<'a> Style<'a> {
    pub fn new(size: f32, adjustments: &'a AdjustmentMap) -> Self {
        Self {
            size,
            pitch: 1.0,
            adjustments,
        }
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    fn step(&self) -> f32 {
        self.size * self.pitch
    }
}

/// How the reading is set below a name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub size: f32,
    pub dx: f32,
    pub gap: f32,
}

/// Places characters for the flows a sheet uses.
pub struct Typesetter<'a, M: ?Sized> {
    measure: &'a M,
    substitution: &'a Substitution,
}

impl<'a, M: TextMeasure + ?Sized> Typesetter<'a, M> {
    pub fn new(measure: &'a M, substitution: &'a Substitution) -> Self {
        Self {
            measure,
            substitution,
        }
    }

    /// Stack `text` downward from `(x, y)` in a single column.
    ///
    /// Control characters take up their slot but are not drawn.
    pub fn column(
        &self,
        text: &str,
        x: f32,
        y: f32,
        style: Style<'_>,
        out: &mut Vec<PlacedGlyph>,
    ) {
        let step = style.step();
        for (i, ch) in text.chars().enumerate() {
            if ch.is_control() {
                continue;
            }
            let adj = style.adjustments.offset(ch);
            let draw_y = y - i as f32 * step + adj.dy;
            let rotation = vertical_rotation(ch, &adj);
            out.push(self.glyph(ch, x + adj.dx, draw_y, style.size, rotation, 0));
        }
    }

    /// Set `text` in vertical columns of at most `max_chars`, moving
    /// `line_spacing` to the left for each new column.
    ///
    /// Closing punctuation that would open a column hangs at the foot of
    /// the full one instead. `\n` forces a new column.
    #[allow(clippy::too_many_arguments)]
    pub fn wrapped_columns(
        &self,
        text: &str,
        x: f32,
        y: f32,
        style: Style<'_>,
        max_chars: usize,
        line_spacing: f32,
        out: &mut Vec<PlacedGlyph>,
    ) {
        let step = style.step();
        let hanging_map = AdjustmentSet::Hanging.map();

        let mut column_x = x;
        let mut cursor_y = y;
        let mut count = 0;
        let mut column = 0;

        for ch in text.chars() {
            if ch == '\n' {
                column_x -= line_spacing;
                cursor_y = y;
                count = 0;
                column += 1;
                continue;
            }

            let overflow = count >= max_chars;
            let hanging = overflow && is_line_leading_prohibited(ch);
            if overflow && !hanging {
                column_x -= line_spacing;
                cursor_y = y;
                count = 0;
                column += 1;
            }

            let adj = if hanging {
                hanging_map
                    .get(ch)
                    .copied()
                    .unwrap_or_else(|| style.adjustments.offset(ch))
            } else {
                style.adjustments.offset(ch)
            };
            let mut draw_y = cursor_y + adj.dy;
            if hanging {
                draw_y += step;
            }

            if !ch.is_control() {
                out.push(self.glyph(
                    ch,
                    column_x + adj.dx,
                    draw_y,
                    style.size,
                    vertical_rotation(ch, &adj),
                    column,
                ));
            }

            if hanging {
                column_x -= line_spacing;
                cursor_y = y;
                count = 0;
                column += 1;
            } else {
                cursor_y -= step;
                count += 1;
            }
        }
    }

    /// Set `text` in horizontal lines of at most `max_chars`, top line at
    /// `y`. Centered lines start at `x - width / 2`.
    #[allow(clippy::too_many_arguments)]
    pub fn lines(
        &self,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        max_chars: usize,
        line_height: f32,
        centered: bool,
        out: &mut Vec<PlacedGlyph>,
    ) {
        for (i, line) in split_lines(text, max_chars).iter().enumerate() {
            let chars: Vec<(char, FontRole)> = line
                .chars()
                .filter(|ch| !ch.is_control())
                .map(|ch| (ch, self.substitution.role_for(ch)))
                .collect();
            let width: f32 = chars
                .iter()
                .map(|&(ch, role)| self.measure.advance(ch, role, size))
                .sum();

            let line_y = y - i as f32 * line_height;
            let mut cursor_x = if centered { x - width / 2.0 } else { x };
            for (ch, role) in chars {
                out.push(PlacedGlyph {
                    ch,
                    x: cursor_x,
                    y: line_y,
                    size,
                    rotation: None,
                    line: i,
                    face: role,
                });
                cursor_x += self.measure.advance(ch, role, size);
            }
        }
    }

    /// Stack a name, then its reading in a smaller size shifted right.
    ///
    /// Only the rotated set turns characters sideways here; adjustment
    /// angles are ignored.
    #[allow(clippy::too_many_arguments)]
    pub fn name_with_reading(
        &self,
        name: &str,
        reading_text: &str,
        x: f32,
        y: f32,
        style: Style<'_>,
        reading: Reading,
        out: &mut Vec<PlacedGlyph>,
    ) {
        let mut cursor_y = y;
        for ch in name.chars() {
            self.push_name_char(ch, x, cursor_y, style.size, style.adjustments, 0, out);
            cursor_y -= style.step();
        }

        if !name.is_empty() && !reading_text.is_empty() {
            cursor_y -= reading.gap;
        }

        for ch in reading_text.chars() {
            let reading_x = x + reading.dx;
            self.push_name_char(ch, reading_x, cursor_y, reading.size, style.adjustments, 1, out);
            cursor_y -= reading.size * style.pitch;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_name_char(
        &self,
        ch: char,
        x: f32,
        y: f32,
        size: f32,
        adjustments: &AdjustmentMap,
        line: usize,
        out: &mut Vec<PlacedGlyph>,
    ) {
        if ch.is_control() {
            return;
        }
        let adj = adjustments.offset(ch);
        let rotation = is_rotated(ch).then_some(SIDEWAYS_ANGLE);
        out.push(self.glyph(ch, x + adj.dx, y + adj.dy, size, rotation, line));
    }

    fn glyph(
        &self,
        ch: char,
        x: f32,
        y: f32,
        size: f32,
        rotation: Option<f32>,
        line: usize,
    ) -> PlacedGlyph {
        PlacedGlyph {
            ch,
            x,
            y,
            size,
            rotation,
            line,
            face: self.substitution.role_for(ch),
        }
    }
}

/// Explicit angle first, then the rotated set.
fn vertical_rotation(ch: char, adj: &Adjustment) -> Option<f32> {
    adj.angle.or_else(|| is_rotated(ch).then_some(SIDEWAYS_ANGLE))
}

/// Number of extra columns `text` needs when wrapped at `max_chars`.
///
/// Uses the same hanging rule as [`Typesetter::wrapped_columns`]; a hanging
/// character at the very end opens no column.
///
/// ```
/// use meihyo::layout::wrap_count;
///
/// assert_eq!(wrap_count("", 55), 0);
/// assert_eq!(wrap_count(&"永".repeat(110), 55), 1);
/// assert_eq!(wrap_count(&format!("{}。", "永".repeat(55)), 55), 0);
/// ```
pub fn wrap_count(text: &str, max_chars: usize) -> usize {
    if text.is_empty() {
        return 0;
    }

    let total = text.chars().count();
    let mut lines = 1;
    let mut count = 0;

    for (i, ch) in text.chars().enumerate() {
        if ch == '\n' {
            lines += 1;
            count = 0;
            continue;
        }

        let overflow = count >= max_chars;
        let hanging = overflow && is_line_leading_prohibited(ch);
        if overflow && !hanging {
            lines += 1;
            count = 0;
        }

        if hanging {
            if i + 1 < total {
                lines += 1;
                count = 0;
            }
        } else {
            count += 1;
        }
    }

    lines - 1
}

/// Break `text` into horizontal lines of at most `max_chars`.
///
/// A `\n` inside the window ends the line early and is dropped. Otherwise,
/// when the character just past the window may not start a line, it is
/// pulled onto this one.
pub fn split_lines(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let max = max_chars.max(1);
    let mut lines = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let mut end = (start + max).min(chars.len());

        if let Some(newline) = chars[start..end].iter().position(|&c| c == '\n') {
            lines.push(chars[start..start + newline].iter().collect());
            start += newline + 1;
            continue;
        }

        if end < chars.len() && is_line_leading_prohibited(chars[end]) {
            end += 1;
        }
        lines.push(chars[start..end].iter().collect());
        start = end;
    }

    lines
}
