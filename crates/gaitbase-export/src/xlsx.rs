use std::path::Path;

use umya_spreadsheet::{reader::xlsx, CellRawValue, Worksheet, XlsxError};

pub use umya_spreadsheet::Spreadsheet;

use crate::data::ReportData;
use crate::error::ExportError;
use crate::render::Renderer;

/// Read an XLSX template and render the text cells of its first sheet.
///
/// Only cells whose text changed are written back; cell styles are left
/// as they are in the template.
pub fn render_workbook(
    template: &Path,
    data: &ReportData,
    renderer: &Renderer,
) -> Result<Spreadsheet, ExportError> {
    if !template.exists() {
        return Err(ExportError::TemplateNotFound(template.display().to_string()));
    }
    let mut book = xlsx::read(template)?;
    let sheet = book
        .get_sheet_mut(&0)
        .ok_or_else(|| XlsxError::CellError("template has no worksheets".into()))?;
    let changed = render_sheet(sheet, data, renderer)?;
    tracing::info!(template = %template.display(), cells = changed, "rendered XLSX report");
    Ok(book)
}

/// Render every text cell of `sheet` in place. Returns the number of cells
/// rewritten.
pub fn render_sheet(
    sheet: &mut Worksheet,
    data: &ReportData,
    renderer: &Renderer,
) -> Result<usize, ExportError> {
    let mut updates: Vec<((u32, u32), String)> = Vec::new();
    for cell in sheet.get_cell_collection() {
        let text = match cell.get_cell_value().get_raw_value() {
            CellRawValue::String(s) => s.to_string(),
            CellRawValue::RichText(rt) => rt.get_text().to_string(),
            _ => continue,
        };
        if text.is_empty() {
            continue;
        }
        let rendered = renderer.render_cell(&text, data.values(), data.defaulted())?;
        if rendered != text {
            let coord = cell.get_coordinate();
            updates.push(((*coord.get_col_num(), *coord.get_row_num()), rendered));
        }
    }

    let count = updates.len();
    for (coord, text) in updates {
        sheet.get_cell_mut(coord).set_value_string(text);
    }
    Ok(count)
}

pub fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<(), ExportError> {
    umya_spreadsheet::writer::xlsx::write(book, path)?;
    tracing::info!(path = %path.display(), "saved XLSX report");
    Ok(())
}

pub fn workbook_bytes(book: &Spreadsheet) -> Result<Vec<u8>, ExportError> {
    let mut buf: Vec<u8> = Vec::new();
    umya_spreadsheet::writer::xlsx::write_writer(book, &mut buf)?;
    Ok(buf)
}
