use iul_core::{ExtractReport, FileRecord, index_to_address};
use std::io::{self, Write};

/// Write the scanned file table: one line per record, aligned on the name.
pub fn write_file_table(w: &mut impl Write, records: &[FileRecord]) -> io::Result<()> {
    let name_width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".chars().count());

    writeln!(
        w,
        "{:name_width$}  {:>8}  {:>12}  {}",
        "Name", "CRC-32", "Size", "Modified"
    )?;
    for record in records {
        writeln!(
            w,
            "{:name_width$}  {:>8}  {:>12}  {}",
            record.name, record.checksum, record.size, record.created_at
        )?;
    }
    Ok(())
}

/// Write the extraction result: populated control cells by address, then the
/// author table.
pub fn write_extract_report(w: &mut impl Write, report: &ExtractReport) -> io::Result<()> {
    writeln!(w, "Control sheet:")?;
    if report.control.is_empty() {
        writeln!(w, "  (empty)")?;
    }
    for (row, col, value) in report.control.iter_cells() {
        if !value.is_empty() {
            writeln!(w, "  {}: {}", index_to_address(row, col), value)?;
        }
    }

    writeln!(w)?;
    writeln!(w, "Authors ({}):", report.authors.len())?;
    for author in &report.authors {
        writeln!(w, "  {:12} {}", author.role, author.name)?;
    }
    Ok(())
}
