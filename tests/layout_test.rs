use std::fs;

use meihyo::Error;
use meihyo::compose::Composer;
use meihyo::font::Substitution;
use meihyo::layout::{
    AdjustmentMap, AnchorX, Field, FullWidth, LayoutTable, Style, Typesetter, wrap_count,
};
use meihyo::roster::Entry;
use tempfile::TempDir;

#[test]
fn test_wrap_count_literal() {
    let text = "永".repeat(110);
    assert_eq!(wrap_count(&text, 55), 1);
    assert_eq!(wrap_count(&"永".repeat(111), 55), 2);
    assert_eq!(wrap_count("", 55), 0);
}

#[test]
fn test_two_full_columns() {
    let substitution = Substitution::default();
    let typesetter = Typesetter::new(&FullWidth, &substitution);
    let plain = AdjustmentMap::default();

    let mut out = Vec::new();
    let text = "永".repeat(110);
    typesetter.wrapped_columns(&text, 172.0, 786.0, Style::new(10.0, &plain), 55, 20.0, &mut out);

    assert_eq!(out.len(), 110);
    assert!(out[..55].iter().all(|g| g.line == 0 && g.x == 172.0));
    assert!(out[55..].iter().all(|g| g.line == 1 && g.x == 152.0));
    assert_eq!(out[55].y, 786.0);
}

#[test]
fn test_closing_mark_hangs_in_full_column() {
    let substitution = Substitution::default();
    let typesetter = Typesetter::new(&FullWidth, &substitution);
    let plain = AdjustmentMap::default();

    let mut out = Vec::new();
    let text = format!("{}。次", "永".repeat(3));
    typesetter.wrapped_columns(&text, 100.0, 500.0, Style::new(10.0, &plain), 3, 20.0, &mut out);

    let mark = out.iter().find(|g| g.ch == '。').unwrap();
    assert_eq!(mark.line, 0);
    let next = out.iter().find(|g| g.ch == '次').unwrap();
    assert_eq!((next.line, next.x, next.y), (1, 80.0, 500.0));
    assert_eq!(wrap_count(&text, 3), 1);
}

#[test]
fn test_layout_file_override() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.json");

    let mut table = LayoutTable::standard();
    let name = table.fields.iter_mut().find(|f| f.field == Field::Name).unwrap();
    name.x = AnchorX::Fixed(240.0);
    name.y = 600.0;
    fs::write(&path, table.to_json().unwrap()).unwrap();

    let loaded = LayoutTable::load(&path).unwrap();
    assert_eq!(loaded, table);

    let entry = Entry {
        name: "山田".to_string(),
        ..Entry::default()
    };
    let page = Composer::new(&loaded, &FullWidth).compose_page(1, &[entry]);
    let first = page.glyphs().next().unwrap();
    assert_eq!((first.ch, first.x, first.y), ('山', 240.0, 600.0));
}

#[test]
fn test_layout_file_defaults_optional_keys() {
    let json = r#"{
        "frame": [],
        "fields": [
            {
                "field": "name",
                "x": 250.0,
                "y": 495.0,
                "font_size": 28.0,
                "flow": { "kind": "column" }
            }
        ]
    }"#;
    let table = LayoutTable::from_json(json).unwrap();
    let standard = LayoutTable::standard();
    assert_eq!(table.frame_line_width, standard.frame_line_width);
    assert_eq!(table.second_slot_offset, 300.0);
    assert_eq!(table.fallback_chars, vec!['嵗', '俻']);
    assert_eq!(table.fields[0].pitch, 1.0);
}

#[test]
fn test_invalid_layout_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.json");

    let mut table = LayoutTable::standard();
    table.fields[0].x = AnchorX::ByWrapCount(Vec::new());
    fs::write(&path, table.to_json().unwrap()).unwrap();
    assert!(matches!(
        LayoutTable::load(&path),
        Err(Error::InvalidLayout(_))
    ));

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(LayoutTable::load(&path), Err(Error::Json(_))));
}
