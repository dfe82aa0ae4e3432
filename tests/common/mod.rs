//! Shared fixtures: a tiny TrueType font builder and roster CSV samples.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use meihyo::FontPaths;

/// Advance width of every glyph, in font units (1000 per em).
pub const ADVANCE: u16 = 1000;

/// Characters the primary test face maps.
pub const PRIMARY_CHARS: &str = "文学部年山田太郎佐藤花子（やまだたろうさとはなこ）臨王羲之「蘭亭序」永和九、歳在癸丑。線の強弱を意識しました再提出です漢字創１３　０２ＡＢＣ桜";

/// Characters the fallback test face maps.
pub const FALLBACK_CHARS: &str = "嵗俻山";

/// Build a minimal TrueType font mapping each of `chars` to its own
/// (empty) glyph. Glyph 0 is `.notdef`.
pub fn tiny_font(chars: &str) -> Vec<u8> {
    let mut mapped: Vec<char> = chars.chars().collect();
    mapped.sort_unstable();
    mapped.dedup();
    let num_glyphs = mapped.len() as u16 + 1;

    let tables: [(&[u8; 4], Vec<u8>); 7] = [
        (b"cmap", cmap(&mapped)),
        (b"glyf", vec![0; 4]),
        (b"head", head()),
        (b"hhea", hhea(num_glyphs)),
        (b"hmtx", hmtx(num_glyphs)),
        (b"loca", vec![0; 2 * (num_glyphs as usize + 1)]),
        (b"maxp", maxp(num_glyphs)),
    ];
    sfnt(&tables)
}

fn sfnt(tables: &[(&[u8; 4], Vec<u8>)]) -> Vec<u8> {
    let num_tables = tables.len() as u16;
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    let search_range = (1u16 << entry_selector) * 16;

    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&num_tables.to_be_bytes());
    out.extend_from_slice(&search_range.to_be_bytes());
    out.extend_from_slice(&entry_selector.to_be_bytes());
    out.extend_from_slice(&(num_tables * 16 - search_range).to_be_bytes());

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in tables {
        out.extend_from_slice(*tag);
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }
    out.extend_from_slice(&body);
    out
}

/// Format 12 cmap under platform 3 / encoding 10.
fn cmap(mapped: &[char]) -> Vec<u8> {
    let groups = mapped.len() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&1u16.to_be_bytes());
    out.extend_from_slice(&3u16.to_be_bytes());
    out.extend_from_slice(&10u16.to_be_bytes());
    out.extend_from_slice(&12u32.to_be_bytes());

    out.extend_from_slice(&12u16.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&(16 + 12 * groups).to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&groups.to_be_bytes());
    for (i, ch) in mapped.iter().enumerate() {
        let cp = *ch as u32;
        out.extend_from_slice(&cp.to_be_bytes());
        out.extend_from_slice(&cp.to_be_bytes());
        out.extend_from_slice(&(i as u32 + 1).to_be_bytes());
    }
    out
}

fn head() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(&0x5F0F_3CF5u32.to_be_bytes());
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&1000u16.to_be_bytes());
    out.extend_from_slice(&[0; 16]);
    for v in [0i16, -120, 1000, 880] {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out.extend_from_slice(&0u16.to_be_bytes());
    out.extend_from_slice(&8u16.to_be_bytes());
    out.extend_from_slice(&2i16.to_be_bytes());
    out.extend_from_slice(&0i16.to_be_bytes());
    out.extend_from_slice(&0i16.to_be_bytes());
    assert_eq!(out.len(), 54);
    out
}

fn hhea(num_metrics: u16) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    for v in [880i16, -120, 0] {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out.extend_from_slice(&ADVANCE.to_be_bytes());
    for v in [0i16, 0, 1000, 1, 0, 0, 0, 0, 0, 0, 0] {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out.extend_from_slice(&num_metrics.to_be_bytes());
    assert_eq!(out.len(), 36);
    out
}

fn hmtx(num_glyphs: u16) -> Vec<u8> {
    let mut out = Vec::new();
    for _ in 0..num_glyphs {
        out.extend_from_slice(&ADVANCE.to_be_bytes());
        out.extend_from_slice(&0i16.to_be_bytes());
    }
    out
}

fn maxp(num_glyphs: u16) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    out.extend_from_slice(&num_glyphs.to_be_bytes());
    out
}

/// Write a primary and a fallback test face into `dir`.
pub fn write_fonts(dir: &Path) -> FontPaths {
    let primary = dir.join("primary.ttf");
    let fallback = dir.join("fallback.ttf");
    fs::write(&primary, tiny_font(PRIMARY_CHARS)).expect("write primary font");
    fs::write(&fallback, tiny_font(FALLBACK_CHARS)).expect("write fallback font");
    FontPaths::new(primary, fallback)
}

/// Header of the submission form export.
pub const ROSTER_HEADER: &str = "タイムスタンプ,氏名,ふりがな,学部,学年,作品形式,作者名,創作の種類,作品名（臨書）,作品名（創作）,釈文（臨書）,釈文（創作）,コメント（臨書）,コメント（創作）,臨書解説,再提出";

/// A three-row roster: one reproduction, one creation, one resubmission.
pub fn roster_csv() -> String {
    [
        ROSTER_HEADER,
        "2024/01/01 10:00,山田太郎,やまだたろう,文学部,3年,臨,王羲之,,蘭亭序,,永和九年、歳在癸丑。,,線の強弱を意識しました。,,ABC 123,",
        "2024/01/02 11:00,佐藤花子,さとうはなこ,文学部,1年,創,,漢字,,桜,,桜,,意識しました。,,",
        "2024/01/03 12:00,山田太郎,やまだたろう,文学部,3年,臨,王羲之,,蘭亭序,,永和九年。,,再提出です。,,,再提出",
    ]
    .join("\n")
        + "\n"
}
