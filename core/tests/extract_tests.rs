mod common;

use common::SheetFixture;
use iul_core::{AuthorRanges, ExtractOptions, Workbook, extract};

fn default_fixture() -> Vec<SheetFixture<'static>> {
    vec![
        SheetFixture {
            name: "Лист управления",
            cells: vec![("B3", "ИУЛ-42"), ("D7", "версия 1.0")],
        },
        SheetFixture {
            name: "Содержание",
            cells: vec![
                ("D5", "Разраб."),
                ("E5", "Иванов"),
                ("D6", "Разраб."),
                ("E6", "Сидоров"),
                ("F5", "Проверил"),
                ("G5", "Петров"),
            ],
        },
    ]
}

#[test]
fn default_ranges_yield_full_author_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.xlsx");
    common::write_workbook(&path, &default_fixture());

    let workbook = Workbook::open(&path).expect("open");
    let report = extract(&workbook, &ExtractOptions::default());

    assert!(report.warnings.is_empty());
    // D5:E23 and F5:G23, both end-inclusive.
    assert_eq!(report.authors.len(), 38);
    assert_eq!(report.authors[0].role, "Разраб.");
    assert_eq!(report.authors[0].name, "Иванов");
    assert_eq!(report.authors[1].name, "Сидоров");
    assert_eq!(report.authors[2].role, "");
    assert_eq!(report.authors[19].role, "Проверил");
    assert_eq!(report.authors[19].name, "Петров");
    assert_eq!(report.authors[37].name, "");
}

#[test]
fn control_sheet_read_verbatim() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.xlsx");
    common::write_workbook(&path, &default_fixture());

    let workbook = Workbook::open(&path).expect("open");
    let report = extract(&workbook, &ExtractOptions::default());

    assert_eq!(report.control.cell(2, 1), "ИУЛ-42");
    assert_eq!(report.control.cell(6, 3), "версия 1.0");
    assert_eq!(report.control.cell(0, 0), "");
}

#[test]
fn missing_sheets_degrade_with_warnings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.xlsx");
    common::write_workbook(
        &path,
        &[SheetFixture {
            name: "Прочее",
            cells: vec![("A1", "x")],
        }],
    );

    let workbook = Workbook::open(&path).expect("open");
    let report = extract(&workbook, &ExtractOptions::default());

    assert!(report.control.is_empty());
    assert!(report.authors.is_empty());
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings[0].contains("Лист управления"));
    assert!(report.warnings[1].contains("Содержание"));
}

#[test]
fn from_start_policy_stops_at_last_populated_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.xlsx");
    common::write_workbook(
        &path,
        &[SheetFixture {
            name: "Содержание",
            cells: vec![("B2", "Разраб."), ("C2", "Иванов"), ("C4", "Петров")],
        }],
    );

    let workbook = Workbook::open(&path).expect("open");
    let options = ExtractOptions {
        author_ranges: AuthorRanges::parse_from_start("B2").expect("parse"),
        ..ExtractOptions::default()
    };
    let report = extract(&workbook, &options);

    assert_eq!(report.authors.len(), 3);
    assert_eq!(report.authors[0].name, "Иванов");
    assert_eq!(report.authors[1].role, "");
    assert_eq!(report.authors[2].name, "Петров");
}

#[test]
fn custom_sheet_names_respected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data.xlsx");
    common::write_workbook(
        &path,
        &[
            SheetFixture {
                name: "Control",
                cells: vec![("A1", "title")],
            },
            SheetFixture {
                name: "Staff",
                cells: vec![("D5", "Lead"), ("E5", "Smith")],
            },
        ],
    );

    let workbook = Workbook::open(&path).expect("open");
    let options = ExtractOptions {
        control_sheet: "Control".to_string(),
        author_sheet: "Staff".to_string(),
        ..ExtractOptions::default()
    };
    let report = extract(&workbook, &options);

    assert!(report.warnings.is_empty());
    assert_eq!(report.control.cell(0, 0), "title");
    assert_eq!(report.authors[0].role, "Lead");
}
