use anyhow::{Context, Result, bail};
use iul_core::{
    BoundaryPolicy, DEFAULT_EXTRA_ROLES, RenderPayload, TableModel, Workbook,
    assign_roles_split, checksum_file, extract, find_companion_workbook, render_document,
    scan_dir,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

pub fn run(
    dir: &str,
    workbook_path: Option<&str>,
    template: &str,
    output: &str,
    control_sheet: &str,
    author_sheet: &str,
    author_ranges: &str,
) -> Result<ExitCode> {
    let dir = Path::new(dir);

    let records = scan_dir(dir).with_context(|| format!("Failed to scan folder: {}", dir.display()))?;
    let files = TableModel::from_rows(records, BoundaryPolicy::default());

    let (workbook_file, discovered) = resolve_workbook(dir, workbook_path)?;
    let workbook = Workbook::open(&workbook_file)
        .with_context(|| format!("Failed to open workbook: {}", workbook_file.display()))?;

    let options = super::extract::build_options(control_sheet, author_sheet, author_ranges, None)?;
    let report = extract(&workbook, &options);
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut authors = TableModel::from_rows(report.authors, BoundaryPolicy::default());
    if discovered {
        // The legacy folder import labels the first half designers and the
        // second half reviewers.
        let mut rows = authors.rows().to_vec();
        assign_roles_split(&mut rows, DEFAULT_EXTRA_ROLES[0], DEFAULT_EXTRA_ROLES[1]);
        authors.replace_rows(rows);
    }

    let workbook_record = checksum_file(&workbook_file)
        .with_context(|| format!("Failed to checksum workbook: {}", workbook_file.display()))?;

    let payload = RenderPayload::build(
        files.rows(),
        &report.control,
        authors.rows(),
        &workbook_record,
    );

    render_document(Path::new(template), Path::new(output), &payload)
        .with_context(|| format!("Failed to render template: {}", template))?;

    println!("Wrote {}", output);
    Ok(ExitCode::from(0))
}

/// Use the explicit workbook path when given; otherwise look for
/// `<folder>.xlsx` near the scanned folder. The flag reports whether
/// discovery was used, since discovery also reassigns author roles.
fn resolve_workbook(dir: &Path, explicit: Option<&str>) -> Result<(PathBuf, bool)> {
    if let Some(path) = explicit {
        return Ok((PathBuf::from(path), false));
    }
    match find_companion_workbook(dir) {
        Some(path) => Ok((path, true)),
        None => bail!(
            "No workbook found for folder {}; pass one with --workbook",
            dir.display()
        ),
    }
}
