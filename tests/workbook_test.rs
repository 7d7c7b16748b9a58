//! ワークブック検証の統合テスト
//!
//! 共通ライブラリの XlsxSink で入力ファイルを生成し、検証後の出力を calamine で読み戻す。

use calamine::{open_workbook_auto, Data, Range, Reader};
use jp_punct_validator::error::ValidatorError;
use jp_punct_validator::workbook::{self, RunOptions};
use punct_validator_common::{CellValue, CharacterMap, RowSink, Sheet, XlsxSink};
use std::path::Path;
use tempfile::tempdir;

fn write_fixture(path: &Path) {
    let mut sink = XlsxSink::new();
    sink.commit_sheet(
        &Sheet::new("訳文")
            .with_row(vec![
                CellValue::from("English"),
                CellValue::from("Japanese"),
                CellValue::Empty,
                CellValue::Empty,
                CellValue::from("Note"),
            ])
            .with_row(["Hello(world)", "Hello(world)"])
            .with_row(["plain", "plain"])
            .with_row(["AB", "A：B"])
            .with_row(vec![CellValue::Number(5.0), CellValue::Empty, CellValue::Empty, CellValue::Empty, CellValue::from("memo")]),
    )
    .unwrap();
    sink.commit_sheet(&Sheet::new("Sheet2").with_row(["src", "dst"]).with_row(["A,B.", "A,B."]))
        .unwrap();
    std::fs::write(path, sink.finalize().unwrap()).unwrap();
}

fn read_range(path: &Path, sheet: &str) -> Range<Data> {
    let mut book = open_workbook_auto(path).expect("出力ファイルを開けない");
    book.worksheet_range(sheet).expect("シートが見つからない")
}

fn text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn cells(range: &Range<Data>) -> Vec<(usize, usize, Data)> {
    range.used_cells().map(|(r, c, d)| (r, c, d.clone())).collect()
}

#[test]
fn test_validate_file_annotates_all_sheets() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("translation.xlsx");
    write_fixture(&input);
    let output = workbook::output_path_for(&input, "_validated", None);

    let map = CharacterMap::japanese();
    let report = workbook::validate_file(&input, &output, &map, &RunOptions::default())
        .expect("検証に失敗");

    assert!(report.is_success());
    assert_eq!(report.sheets.len(), 2);
    assert_eq!(report.sheets[0].name, "訳文");
    assert_eq!(report.sheets[0].rows, 4);
    assert_eq!(report.sheets[0].annotated_rows, 2);
    assert_eq!(report.sheets[1].fixed_rows, 1);

    let book = open_workbook_auto(&output).expect("出力ファイルを開けない");
    assert_eq!(book.sheet_names(), vec!["訳文".to_string(), "Sheet2".to_string()]);

    let range = read_range(&output, "訳文");
    assert_eq!(text(&range, 0, 0), "English");
    assert_eq!(text(&range, 0, 2), "Fixed Japanese");
    assert_eq!(text(&range, 0, 3), "Reason for Change / Validation");
    assert_eq!(text(&range, 0, 4), "Note");

    assert_eq!(text(&range, 1, 2), "Hello（world）");
    assert_eq!(
        text(&range, 1, 3),
        "Missing: '（'; Missing: '）'; Replaced '(' with '（'; Replaced ')' with '）'"
    );

    assert_eq!(text(&range, 2, 2), "plain");
    assert_eq!(text(&range, 2, 3), "");

    assert_eq!(text(&range, 3, 2), "A：B");
    assert_eq!(text(&range, 3, 3), "Additional: '：'");

    assert_eq!(range.get_value((4, 0)), Some(&Data::Float(5.0)));
    assert_eq!(text(&range, 4, 3), "");
    assert_eq!(text(&range, 4, 4), "memo");

    let range = read_range(&output, "Sheet2");
    assert_eq!(text(&range, 1, 2), "A、B。");
    assert_eq!(
        text(&range, 1, 3),
        "Missing: '、'; Missing: '。'; Replaced ',' with '、'; Replaced '.' with '。'"
    );
}

#[test]
fn test_input_file_untouched() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("book.xlsx");
    write_fixture(&input);
    let before = std::fs::read(&input).unwrap();

    let output = dir.path().join("out").join("book_checked.xlsx");
    let map = CharacterMap::japanese();
    workbook::validate_file(&input, &output, &map, &RunOptions::default()).unwrap();

    assert_eq!(std::fs::read(&input).unwrap(), before);
    assert!(output.exists());
}

#[test]
fn test_parallel_matches_sequential() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("book.xlsx");
    write_fixture(&input);
    let map = CharacterMap::japanese();

    let sequential = dir.path().join("seq.xlsx");
    let parallel = dir.path().join("par.xlsx");
    workbook::validate_file(&input, &sequential, &map, &RunOptions::default()).unwrap();
    workbook::validate_file(
        &input,
        &parallel,
        &map,
        &RunOptions { parallel: true, show_progress: false },
    )
    .unwrap();

    for sheet in ["訳文", "Sheet2"] {
        assert_eq!(cells(&read_range(&sequential, sheet)), cells(&read_range(&parallel, sheet)));
    }
}

#[test]
fn test_custom_map_from_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("book.xlsx");
    write_fixture(&input);

    let map = CharacterMap::from_json(r#"[{"half": "(", "full": "〔"}]"#).unwrap();
    let output = dir.path().join("custom.xlsx");
    workbook::validate_file(&input, &output, &map, &RunOptions::default()).unwrap();

    let range = read_range(&output, "訳文");
    assert_eq!(text(&range, 1, 2), "Hello〔world)");
    // 対象外の記号は注記されない
    assert_eq!(text(&range, 3, 3), "");
}

#[test]
fn test_missing_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out.xlsx");
    let map = CharacterMap::japanese();

    let result = workbook::validate_file(
        &dir.path().join("missing.xlsx"),
        &output,
        &map,
        &RunOptions::default(),
    );
    assert!(matches!(result, Err(ValidatorError::FileNotFound(_))));
    assert!(!output.exists());
}

#[test]
fn test_unsupported_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("rows.csv");
    std::fs::write(&input, "a,b\n").unwrap();

    let map = CharacterMap::japanese();
    let result = workbook::validate_file(&input, &dir.path().join("out.xlsx"), &map, &RunOptions::default());
    assert!(matches!(result, Err(ValidatorError::UnsupportedFormat(_))));
}

#[test]
fn test_corrupt_workbook_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("broken.xlsx");
    std::fs::write(&input, b"not a zip archive").unwrap();
    let output = dir.path().join("broken_validated.xlsx");

    let map = CharacterMap::japanese();
    let result = workbook::validate_file(&input, &output, &map, &RunOptions::default());
    assert!(matches!(result, Err(ValidatorError::WorkbookOpen { .. })));
    assert!(!output.exists());
}

#[test]
fn test_output_must_differ_from_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("book.xlsx");
    write_fixture(&input);

    let map = CharacterMap::japanese();
    let result = workbook::validate_file(&input, &input, &map, &RunOptions::default());
    assert!(matches!(result, Err(ValidatorError::OutputExists(_))));
}
