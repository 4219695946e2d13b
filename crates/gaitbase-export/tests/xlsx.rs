use std::path::Path;

use gaitbase_export::config::ReportConfig;
use gaitbase_export::data::ReportData;
use gaitbase_export::error::ExportError;
use gaitbase_export::render::Renderer;
use gaitbase_export::xlsx::{render_workbook, save_workbook, workbook_bytes};

fn write_template(path: &Path) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_mut(&0).unwrap();
    sheet.get_cell_mut("A1").set_value("{score}");
    sheet
        .get_style_mut("A1")
        .get_number_format_mut()
        .set_format_code(umya_spreadsheet::NumberingFormat::FORMAT_DATE_XLSX14);
    sheet.get_cell_mut("B1").set_value("N/A");
    sheet.get_cell_mut("A2").set_value("{other}");
    sheet.get_cell_mut("C3").set_value_number(12.5);
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

fn format_code(book: &umya_spreadsheet::Spreadsheet, cell: &str) -> Option<String> {
    book.get_sheet(&0)
        .unwrap()
        .get_style(cell)
        .get_number_format()
        .map(|f| f.get_format_code().to_string())
}

fn renderer() -> Renderer {
    let mut config = ReportConfig::default();
    config
        .xls_replace_strings
        .insert("N/A".to_string(), "-".to_string());
    Renderer::new(config)
}

#[test]
fn substitutes_cells_and_keeps_styles() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.xlsx");
    write_template(&template);
    let before = umya_spreadsheet::reader::xlsx::read(&template).unwrap();

    let mut data = ReportData::default();
    data.insert("score", "N/A");
    data.insert("other", "7");
    data.mark_defaulted("other");

    let book = render_workbook(&template, &data, &renderer()).unwrap();
    let sheet = book.get_sheet(&0).unwrap();
    assert_eq!(sheet.get_value("A1"), "-");
    assert_eq!(sheet.get_value("B1"), "N/A");
    assert_eq!(sheet.get_value("A2"), "");
    assert_eq!(sheet.get_value("C3"), "12.5");
    assert_eq!(format_code(&book, "A1"), format_code(&before, "A1"));
}

#[test]
fn saved_report_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.xlsx");
    let output = dir.path().join("report.xlsx");
    write_template(&template);

    let mut data = ReportData::default();
    data.insert("score", "4");
    data.insert("other", "5");

    let book = render_workbook(&template, &data, &renderer()).unwrap();
    save_workbook(&book, &output).unwrap();
    assert!(!workbook_bytes(&book).unwrap().is_empty());

    let reread = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    assert_eq!(reread.get_sheet(&0).unwrap().get_value("A1"), "4");
}

#[test]
fn unknown_placeholder_fails_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.xlsx");
    write_template(&template);

    let mut data = ReportData::default();
    data.insert("score", "4");

    let err = render_workbook(&template, &data, &renderer()).unwrap_err();
    assert!(matches!(err, ExportError::MissingField { name } if name == "other"));
}

#[test]
fn missing_template() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_workbook(
        &dir.path().join("missing.xlsx"),
        &ReportData::default(),
        &renderer(),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::TemplateNotFound(_)));
}
