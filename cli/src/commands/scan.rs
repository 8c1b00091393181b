use crate::OutputFormat;
use crate::output::{json, text};
use anyhow::{Context, Result};
use iul_core::scan_dir;
use std::io;
use std::path::Path;
use std::process::ExitCode;

pub fn run(dir: &str, format: OutputFormat) -> Result<ExitCode> {
    let records = scan_dir(Path::new(dir))
        .with_context(|| format!("Failed to scan folder: {}", dir))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text => text::write_file_table(&mut handle, &records)?,
        OutputFormat::Json => json::write_file_table(&mut handle, &records)?,
    }

    Ok(ExitCode::from(0))
}
