use crate::OutputFormat;
use crate::output::{json, text};
use anyhow::{Context, Result};
use iul_core::{AuthorRanges, ExtractOptions, Workbook, extract};
use std::io;
use std::process::ExitCode;

pub fn run(
    workbook_path: &str,
    control_sheet: &str,
    author_sheet: &str,
    author_ranges: &str,
    authors_from: Option<&str>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let options = build_options(control_sheet, author_sheet, author_ranges, authors_from)?;

    let workbook = Workbook::open(workbook_path)
        .with_context(|| format!("Failed to open workbook: {}", workbook_path))?;
    let report = extract(&workbook, &options);

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => text::write_extract_report(&mut handle, &report)?,
        OutputFormat::Json => json::write_extract_report(&mut handle, &report)?,
    }

    Ok(ExitCode::from(0))
}

pub fn build_options(
    control_sheet: &str,
    author_sheet: &str,
    author_ranges: &str,
    authors_from: Option<&str>,
) -> Result<ExtractOptions> {
    let ranges = match authors_from {
        Some(start) => AuthorRanges::parse_from_start(start)
            .with_context(|| format!("Invalid start cell: {}", start))?,
        None => AuthorRanges::parse_explicit(author_ranges)
            .with_context(|| format!("Invalid author ranges: {}", author_ranges))?,
    };

    Ok(ExtractOptions {
        control_sheet: control_sheet.to_string(),
        author_sheet: author_sheet.to_string(),
        author_ranges: ranges,
    })
}
