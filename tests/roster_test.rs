mod common;

use std::fs;

use meihyo::Error;
use meihyo::roster::{Entry, Record, parse_table, prepare, read_table};
use proptest::prelude::*;
use tempfile::TempDir;

#[test]
fn test_read_roster_entries() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("roster.csv");
    fs::write(&input, common::roster_csv()).unwrap();

    let entries: Vec<Entry> = read_table(&input)
        .unwrap()
        .iter()
        .map(Entry::from_raw)
        .collect();
    assert_eq!(entries.len(), 3);

    let copy = &entries[0];
    assert_eq!(copy.department_year, "文学部 3年");
    assert_eq!(copy.name, "山田太郎");
    assert_eq!(copy.furigana, "（やまだたろう）");
    assert_eq!(copy.work_info, "臨　王羲之　「蘭亭序」");
    assert_eq!(copy.work_caption, "王羲之「蘭亭序」");
    assert_eq!(copy.transcription, "永和九年、歳在癸丑。");
    assert_eq!(copy.comment, "線の強弱を意識しました。");
    assert_eq!(copy.study_notes, "ＡＢＣ　１２３");
    assert_eq!(copy.resubmission, "");

    let creation = &entries[1];
    assert_eq!(creation.work_info, "漢字　「桜」");
    assert_eq!(creation.work_caption, "");
    assert_eq!(creation.transcription, "桜");
    assert_eq!(creation.comment, "意識しました。");

    assert_eq!(entries[2].resubmission, "再提出");
}

#[test]
fn test_read_shift_jis_roster() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("roster.csv");
    let csv = common::roster_csv();
    let (bytes, _, unmappable) = encoding_rs::SHIFT_JIS.encode(&csv);
    assert!(!unmappable);
    fs::write(&input, &bytes).unwrap();

    let records = read_table(&input).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].get("氏名"), "佐藤花子");
}

#[test]
fn test_read_utf8_bom_roster() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("roster.csv");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(common::roster_csv().as_bytes());
    fs::write(&input, bytes).unwrap();

    let records = read_table(&input).unwrap();
    assert_eq!(records[0].get("タイムスタンプ"), "2024/01/01 10:00");
}

#[test]
fn test_missing_input_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.csv");
    match read_table(&input) {
        Err(Error::InputNotFound(path)) => assert_eq!(path, input),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_short_rows_read_empty_cells() {
    let records = parse_table("氏名,ふりがな,学部\n山田太郎\n").unwrap();
    let entry = Entry::from_raw(&records[0]);
    assert_eq!(entry.name, "山田太郎");
    assert_eq!(entry.furigana, "（）");
    assert_eq!(entry.work_info, "");
}

#[test]
fn test_work_info_without_author() {
    let row = Record::new()
        .with("作品形式", "創")
        .with("作者名", "無し")
        .with("作品名（創作）", "桜");
    let entry = Entry::from_raw(&row);
    assert_eq!(entry.work_info, "創　「桜」");
    assert_eq!(entry.work_caption, "「桜」");
}

#[test]
fn test_prepare_on_fixture_is_idempotent() {
    for record in parse_table(&common::roster_csv()).unwrap() {
        let once = prepare(&record);
        assert_eq!(prepare(&once), once);
    }
}

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("臨".to_string()),
        Just("無し".to_string()),
        Just("再提出".to_string()),
        Just("２回以上".to_string()),
        "[a-zｱ-ﾝﾞ 0-9山田（）]{0,8}",
    ]
}

const COLUMNS: &[&str] = &[
    "タイムスタンプ",
    "氏名",
    "ふりがな",
    "学部",
    "学年",
    "作品形式",
    "作者名",
    "創作の種類",
    "作品名（臨書）",
    "作品名（創作）",
    "釈文（臨書）",
    "コメント（創作）",
    "臨書解説",
    "再提出",
];

proptest! {
    #[test]
    fn prop_prepare_idempotent(cells in prop::collection::vec(prop::option::of(cell()), COLUMNS.len())) {
        let record: Record = COLUMNS
            .iter()
            .zip(cells)
            .filter_map(|(column, value)| value.map(|v| (column.to_string(), v)))
            .collect();
        let once = prepare(&record);
        prop_assert_eq!(prepare(&once), once);
    }
}
