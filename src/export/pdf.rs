//! PDF backend: [`RenderPage`]s to PDF bytes.
//!
//! Each face used on the pages is embedded whole as a Type0 font with
//! Identity-H encoding, so glyph ids go straight into the content stream.
//! A ToUnicode map is written for the glyphs actually drawn.

use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, TextRenderingMode, UnicodeCmap};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::compose::{DrawCommand, RenderPage};
use crate::error::Result;
use crate::font::{FontFace, FontRole, FontSet, Outline};
use crate::layout::table::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::layout::{PlacedGlyph, Shape};

const ROLES: [FontRole; 2] = [FontRole::Primary, FontRole::Fallback];

const IDENTITY_H: Name<'static> = Name(b"Identity-H");

fn identity_system_info() -> SystemInfo<'static> {
    SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    }
}

/// Sequential object id allocation.
struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        let id = Ref::new(self.0);
        self.0 += 1;
        id
    }
}

/// Glyphs drawn from one face, for the width array and ToUnicode map.
#[derive(Default)]
struct FontUsage {
    glyphs: BTreeMap<u16, char>,
}

/// Object ids of one embedded face.
struct FontRefs {
    type0: Ref,
    cid: Ref,
    descriptor: Ref,
    file: Ref,
    to_unicode: Ref,
}

impl FontRefs {
    fn alloc(alloc: &mut RefAlloc) -> Self {
        Self {
            type0: alloc.next(),
            cid: alloc.next(),
            descriptor: alloc.next(),
            file: alloc.next(),
            to_unicode: alloc.next(),
        }
    }
}

/// Serialize pages to a complete PDF document.
///
/// `bold_ratio` enables emulated bold: every glyph is filled and stroked
/// with a line width of `size * ratio`.
pub fn write_pdf(
    pages: &[RenderPage],
    fonts: &FontSet,
    bold_ratio: Option<f32>,
) -> Result<Vec<u8>> {
    let mut alloc = RefAlloc(1);
    let catalog_id = alloc.next();
    let tree_id = alloc.next();
    let info_id = alloc.next();

    let mut pdf = Pdf::new();
    let mut usage: [FontUsage; 2] = Default::default();
    let mut missing: HashSet<(FontRole, char)> = HashSet::new();

    let mut page_ids = Vec::with_capacity(pages.len());
    let mut contents = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, bold_ratio, |glyph| {
            let face = fonts.face(glyph.face);
            let gid = match face.glyph_id(glyph.ch) {
                Some(gid) => gid,
                None => {
                    if missing.insert((glyph.face, glyph.ch)) {
                        log::warn!(
                            "{} has no glyph for {:?} (U+{:04X})",
                            face.postscript_name(),
                            glyph.ch,
                            glyph.ch as u32
                        );
                    }
                    0
                }
            };
            usage[role_index(glyph.face)]
                .glyphs
                .entry(gid)
                .or_insert(glyph.ch);
            gid
        });
        page_ids.push(alloc.next());
        contents.push((alloc.next(), content));
    }

    let font_refs: Vec<(FontRole, FontRefs)> = ROLES
        .iter()
        .filter(|role| !usage[role_index(**role)].glyphs.is_empty())
        .map(|role| (*role, FontRefs::alloc(&mut alloc)))
        .collect();

    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.document_info(info_id)
        .producer(TextStr(concat!("meihyo ", env!("CARGO_PKG_VERSION"))));

    for (page_id, (content_id, _)) in page_ids.iter().zip(&contents) {
        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(tree_id)
            .contents(*content_id);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for (role, refs) in &font_refs {
            font_dict.pair(Name(role.resource_name().as_bytes()), refs.type0);
        }
    }

    for (content_id, content) in &contents {
        let compressed = deflate(content)?;
        pdf.stream(*content_id, &compressed).filter(Filter::FlateDecode);
    }

    for (role, refs) in &font_refs {
        let face = fonts.face(*role);
        write_font(&mut pdf, refs, face, &usage[role_index(*role)])?;
    }

    log::debug!("wrote {} pages, {} embedded faces", pages.len(), font_refs.len());
    Ok(pdf.finish())
}

fn role_index(role: FontRole) -> usize {
    match role {
        FontRole::Primary => 0,
        FontRole::Fallback => 1,
    }
}

/// Build the uncompressed content stream of one page.
///
/// `glyph_id` resolves the glyph id drawn for each placed glyph.
fn page_content(
    page: &RenderPage,
    bold_ratio: Option<f32>,
    mut glyph_id: impl FnMut(&PlacedGlyph) -> u16,
) -> Vec<u8> {
    let mut content = Content::new();

    for command in &page.commands {
        match command {
            DrawCommand::Stroke { shape, width } => {
                content.save_state();
                content.set_line_width(*width);
                content.set_stroke_rgb(0.0, 0.0, 0.0);
                match *shape {
                    Shape::Rect {
                        x,
                        y,
                        width,
                        height,
                    } => {
                        content.rect(x, y, width, height);
                    }
                    Shape::Line { x1, y1, x2, y2 } => {
                        content.move_to(x1, y1);
                        content.line_to(x2, y2);
                    }
                }
                content.stroke();
                content.restore_state();
            }
            DrawCommand::Glyph(glyph) => {
                let gid = glyph_id(glyph);
                draw_glyph(&mut content, glyph, gid, bold_ratio);
            }
        }
    }

    content.finish().to_vec()
}

fn draw_glyph(content: &mut Content, glyph: &PlacedGlyph, gid: u16, bold_ratio: Option<f32>) {
    if let Some(ratio) = bold_ratio {
        content.set_line_width(glyph.size * ratio);
        content.set_stroke_rgb(0.0, 0.0, 0.0);
    }
    content.begin_text();
    content.set_font(Name(glyph.face.resource_name().as_bytes()), glyph.size);
    if bold_ratio.is_some() {
        content.set_text_rendering_mode(TextRenderingMode::FillStroke);
    }
    content.set_text_matrix(text_matrix(glyph));
    content.show(Str(&gid.to_be_bytes()));
    if bold_ratio.is_some() {
        content.set_text_rendering_mode(TextRenderingMode::Fill);
    }
    content.end_text();
}

/// Text matrix for a glyph.
///
/// A rotated glyph turns about its draw position and is then shifted a
/// quarter em down in its own frame, which centers sideways glyphs on the
/// column axis.
fn text_matrix(glyph: &PlacedGlyph) -> [f32; 6] {
    match glyph.rotation {
        None => [1.0, 0.0, 0.0, 1.0, glyph.x, glyph.y],
        Some(angle) => {
            let (sin, cos) = angle.to_radians().sin_cos();
            let (sin, cos) = (snap(sin), snap(cos));
            let shift = glyph.size / 4.0;
            [
                cos,
                sin,
                -sin,
                cos,
                glyph.x + shift * sin,
                glyph.y - shift * cos,
            ]
        }
    }
}

/// Round values within float noise of an integer, so quarter turns are exact.
fn snap(v: f32) -> f32 {
    let rounded = v.round();
    if (v - rounded).abs() < 1e-6 { rounded } else { v }
}

fn write_font(pdf: &mut Pdf, refs: &FontRefs, face: &FontFace, usage: &FontUsage) -> Result<()> {
    let base_font = Name(face.postscript_name().as_bytes());
    let outline = face.outline();

    pdf.type0_font(refs.type0)
        .base_font(base_font)
        .encoding_predefined(IDENTITY_H)
        .descendant_font(refs.cid)
        .to_unicode(refs.to_unicode);

    {
        let mut cid = pdf.cid_font(refs.cid);
        cid.subtype(match outline {
            Outline::TrueType => CidFontType::Type2,
            Outline::Cff => CidFontType::Type0,
        });
        cid.base_font(base_font);
        cid.system_info(identity_system_info());
        cid.font_descriptor(refs.descriptor);
        cid.default_width(face.advance_1000(0));
        if outline == Outline::TrueType {
            cid.cid_to_gid_map_predefined(Name(b"Identity"));
        }
        let mut widths = cid.widths();
        for &gid in usage.glyphs.keys() {
            widths.consecutive(gid, [face.advance_1000(gid)]);
        }
    }

    {
        let [x_min, y_min, x_max, y_max] = face.bbox();
        let mut descriptor = pdf.font_descriptor(refs.descriptor);
        descriptor
            .name(base_font)
            .flags(FontFlags::SYMBOLIC)
            .bbox(Rect::new(x_min, y_min, x_max, y_max))
            .italic_angle(0.0)
            .ascent(face.ascent())
            .descent(face.descent())
            .cap_height(face.cap_height())
            .stem_v(80.0);
        match outline {
            Outline::TrueType => descriptor.font_file2(refs.file),
            Outline::Cff => descriptor.font_file3(refs.file),
        };
    }

    {
        let data = face.data();
        let compressed = deflate(data)?;
        let mut stream = pdf.stream(refs.file, &compressed);
        stream.filter(Filter::FlateDecode);
        match outline {
            Outline::TrueType => stream.pair(Name(b"Length1"), data.len() as i32),
            Outline::Cff => stream.pair(Name(b"Subtype"), Name(b"OpenType")),
        };
    }

    let mut cmap: UnicodeCmap = UnicodeCmap::new(Name(b"Custom"), identity_system_info());
    for (&gid, &ch) in &usage.glyphs {
        cmap.pair(gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.cmap(refs.to_unicode, &cmap_data);

    log::debug!(
        "embedded {} ({} bytes, {} glyphs used)",
        face.postscript_name(),
        face.data().len(),
        usage.glyphs.len()
    );
    Ok(())
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(6));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
