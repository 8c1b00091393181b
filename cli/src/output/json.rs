use anyhow::Result;
use iul_core::{AuthorRow, ExtractReport, FileRecord, index_to_address};
use serde_json::json;
use std::io::Write;

pub fn write_file_table(w: &mut impl Write, records: &[FileRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, records)?;
    writeln!(w)?;
    Ok(())
}

/// Serialize the extraction result. The control grid flattens to an
/// address-keyed object so consumers never deal with ragged arrays.
pub fn write_extract_report(w: &mut impl Write, report: &ExtractReport) -> Result<()> {
    let control: serde_json::Map<String, serde_json::Value> = report
        .control
        .iter_cells()
        .filter(|(_, _, value)| !value.is_empty())
        .map(|(row, col, value)| (index_to_address(row, col), json!(value)))
        .collect();

    let authors: Vec<&AuthorRow> = report.authors.iter().collect();

    let doc = json!({
        "control": control,
        "authors": authors,
        "warnings": report.warnings,
    });
    serde_json::to_writer_pretty(&mut *w, &doc)?;
    writeln!(w)?;
    Ok(())
}
