//! Page composition.
//!
//! Turns prepared entries into backend-agnostic [`RenderPage`]s: the frame
//! furniture plus every placed glyph, two entries per page side by side.

use crate::font::Substitution;
use crate::layout::{
    Field, FieldLayout, Flow, LayoutTable, PlacedGlyph, Reading, Shape, Style, TextMeasure,
    Typesetter, wrap_count,
};
use crate::roster::Entry;

/// Entries placed on one page.
pub const ENTRIES_PER_PAGE: usize = 2;

/// One drawing operation on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Stroke a frame shape in black.
    Stroke { shape: Shape, width: f32 },
    /// Draw one character.
    Glyph(PlacedGlyph),
}

/// Draw commands for one page, in painting order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderPage {
    /// 1-based page number.
    pub page_number: usize,
    pub commands: Vec<DrawCommand>,
}

impl RenderPage {
    pub fn new(page_number: usize) -> Self {
        Self {
            page_number,
            commands: Vec::new(),
        }
    }

    /// The glyphs on this page, in drawing order.
    pub fn glyphs(&self) -> impl Iterator<Item = &PlacedGlyph> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Glyph(glyph) => Some(glyph),
            DrawCommand::Stroke { .. } => None,
        })
    }
}

/// Lays entries out according to a [`LayoutTable`].
pub struct Composer<'a, M: ?Sized> {
    table: &'a LayoutTable,
    measure: &'a M,
    substitution: Substitution,
}

impl<'a, M: TextMeasure + ?Sized> Composer<'a, M> {
    pub fn new(table: &'a LayoutTable, measure: &'a M) -> Self {
        Self {
            table,
            measure,
            substitution: Substitution::new(table.fallback_chars.iter().copied()),
        }
    }

    /// Compose all entries, two per page.
    pub fn compose_pages(&self, entries: &[Entry]) -> Vec<RenderPage> {
        entries
            .chunks(ENTRIES_PER_PAGE)
            .enumerate()
            .map(|(i, pair)| self.compose_page(i + 1, pair))
            .collect()
    }

    /// Compose one page holding `entries` left to right.
    pub fn compose_page(&self, page_number: usize, entries: &[Entry]) -> RenderPage {
        let mut page = RenderPage::new(page_number);
        for (slot, entry) in entries.iter().take(ENTRIES_PER_PAGE).enumerate() {
            let x_offset = slot as f32 * self.table.second_slot_offset;
            self.compose_entry(entry, x_offset, &mut page);
        }
        page
    }

    /// Append the frame and every field of `entry`, shifted right by
    /// `x_offset`.
    pub fn compose_entry(&self, entry: &Entry, x_offset: f32, page: &mut RenderPage) {
        for shape in &self.table.frame {
            page.commands.push(DrawCommand::Stroke {
                shape: shape.offset(x_offset),
                width: self.table.frame_line_width,
            });
        }

        let typesetter = Typesetter::new(self.measure, &self.substitution);
        let mut glyphs = Vec::new();
        for layout in &self.table.fields {
            place_field(&typesetter, layout, entry, x_offset, &mut glyphs);
        }
        page.commands.extend(glyphs.into_iter().map(DrawCommand::Glyph));
    }
}

fn place_field<M: TextMeasure + ?Sized>(
    typesetter: &Typesetter<'_, M>,
    layout: &FieldLayout,
    entry: &Entry,
    x_offset: f32,
    out: &mut Vec<PlacedGlyph>,
) {
    let text = field_text(entry, layout.field);
    let style = Style::new(layout.font_size, layout.adjustments.map()).with_pitch(layout.pitch);
    let y = layout.y;

    match layout.flow {
        Flow::Column => {
            let x = layout.x.resolve(0) + x_offset;
            typesetter.column(text, x, y, style, out);
        }
        Flow::WrappedColumns {
            max_chars,
            line_spacing,
        } => {
            let x = layout.x.resolve(wrap_count(text, max_chars)) + x_offset;
            typesetter.wrapped_columns(text, x, y, style, max_chars, line_spacing, out);
        }
        Flow::Lines {
            max_chars,
            line_height,
            centered,
        } => {
            let x = layout.x.resolve(0) + x_offset;
            typesetter.lines(
                text,
                x,
                y,
                layout.font_size,
                max_chars,
                line_height,
                centered,
                out,
            );
        }
        Flow::NameWithReading {
            reading_size,
            reading_dx,
            reading_gap,
        } => {
            let x = layout.x.resolve(0) + x_offset;
            let reading = Reading {
                size: reading_size,
                dx: reading_dx,
                gap: reading_gap,
            };
            typesetter.name_with_reading(&entry.name, &entry.furigana, x, y, style, reading, out);
        }
    }
}

/// The entry text a field displays.
fn field_text(entry: &Entry, field: Field) -> &str {
    match field {
        Field::DepartmentYear => &entry.department_year,
        Field::Name => &entry.name,
        Field::WorkInfo => &entry.work_info,
        Field::Transcription => &entry.transcription,
        Field::Comment => &entry.comment,
        Field::StudyNotes => &entry.study_notes,
        Field::WorkCaption => &entry.work_caption,
        Field::Resubmission => &entry.resubmission,
    }
}
