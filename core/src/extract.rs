//! Spreadsheet extraction: the control grid and the author table.
//!
//! The workbook carries two specially-named sheets: a free-form control grid
//! read verbatim, and an authoring sheet holding role/name pairs inside
//! declared two-column ranges. A missing sheet degrades to an empty table
//! with a warning on the report; only opening the workbook itself can fail.

use crate::addressing::{CellAddress, CellRange, RangeParseError, parse_range_list};
use crate::grid::SheetGrid;
use crate::table_model::TableModel;
use crate::workbook::Workbook;
use serde::Serialize;

pub const DEFAULT_CONTROL_SHEET: &str = "Лист управления";
pub const DEFAULT_AUTHOR_SHEET: &str = "Содержание";
pub const DEFAULT_AUTHOR_RANGES: &str = "D5:E23,F5:G23";

/// Extra role labels offered alongside the roles found in the workbook.
pub const DEFAULT_EXTRA_ROLES: [&str; 2] = ["Разраб.", "Проверил"];

/// One role/name pair from the authoring sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorRow {
    pub role: String,
    pub name: String,
}

/// Where on the authoring sheet the role/name pairs live.
///
/// Two policies exist in the field: fully declared `start:end` ranges, and a
/// start cell read down to the last populated row. Both are selected by
/// configuration, never varied per call site. The representation is opaque:
/// every constructor enforces that explicit ranges are exactly two columns
/// wide (role, name), so extraction never silently drops columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRanges(RangeKind);

#[derive(Debug, Clone, PartialEq, Eq)]
enum RangeKind {
    Explicit(Vec<CellRange>),
    FromStart(CellAddress),
}

impl AuthorRanges {
    /// Declared ranges, each exactly two columns wide.
    pub fn explicit(ranges: Vec<CellRange>) -> Result<AuthorRanges, RangeParseError> {
        for range in &ranges {
            if range.width() != 2 {
                return Err(RangeParseError::Malformed {
                    input: range.to_string(),
                });
            }
        }
        Ok(AuthorRanges(RangeKind::Explicit(ranges)))
    }

    /// Read downward from `start` (two columns) to the last populated row.
    pub fn from_start(start: CellAddress) -> AuthorRanges {
        AuthorRanges(RangeKind::FromStart(start))
    }

    /// Parse a comma-separated declaration such as `D5:E23,F5:G23`.
    pub fn parse_explicit(input: &str) -> Result<AuthorRanges, RangeParseError> {
        AuthorRanges::explicit(parse_range_list(input)?)
    }

    pub fn parse_from_start(input: &str) -> Result<AuthorRanges, RangeParseError> {
        let start: CellAddress = input.trim().parse()?;
        Ok(AuthorRanges::from_start(start))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub control_sheet: String,
    pub author_sheet: String,
    pub author_ranges: AuthorRanges,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            control_sheet: DEFAULT_CONTROL_SHEET.to_string(),
            author_sheet: DEFAULT_AUTHOR_SHEET.to_string(),
            author_ranges: AuthorRanges::parse_explicit(DEFAULT_AUTHOR_RANGES)
                .expect("default author ranges are well-formed"),
        }
    }
}

/// Extraction result: both tables plus warnings for anything that degraded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractReport {
    pub control: SheetGrid,
    pub authors: Vec<AuthorRow>,
    pub warnings: Vec<String>,
}

/// Pull the control grid and author rows out of an opened workbook.
pub fn extract(workbook: &Workbook, options: &ExtractOptions) -> ExtractReport {
    let mut warnings = Vec::new();

    let control = match workbook.sheet(&options.control_sheet) {
        Some(grid) => grid.clone(),
        None => {
            warnings.push(format!(
                "sheet '{}' not found; control table left empty",
                options.control_sheet
            ));
            SheetGrid::new()
        }
    };

    let authors = match workbook.sheet(&options.author_sheet) {
        Some(grid) => author_rows(grid, &options.author_ranges),
        None => {
            warnings.push(format!(
                "sheet '{}' not found; author table left empty",
                options.author_sheet
            ));
            Vec::new()
        }
    };

    ExtractReport {
        control,
        authors,
        warnings,
    }
}

/// Flatten the declared ranges into author rows: ranges in declaration
/// order, each range's rows top-to-bottom. Rows shorter than a range pad
/// with the empty string.
fn author_rows(grid: &SheetGrid, ranges: &AuthorRanges) -> Vec<AuthorRow> {
    match &ranges.0 {
        RangeKind::Explicit(list) => {
            let mut rows = Vec::new();
            for range in list {
                for row in range.rows() {
                    rows.push(AuthorRow {
                        role: grid.cell(row, range.start.col).to_string(),
                        name: grid.cell(row, range.start.col + 1).to_string(),
                    });
                }
            }
            rows
        }
        RangeKind::FromStart(start) => {
            let last_populated = (start.row..grid.nrows())
                .filter(|&row| {
                    !grid.cell(row, start.col).is_empty()
                        || !grid.cell(row, start.col + 1).is_empty()
                })
                .last();

            match last_populated {
                Some(last) => (start.row..=last)
                    .map(|row| AuthorRow {
                        role: grid.cell(row, start.col).to_string(),
                        name: grid.cell(row, start.col + 1).to_string(),
                    })
                    .collect(),
                None => Vec::new(),
            }
        }
    }
}

/// Unique role values in first-seen order, extended with the fixed extra
/// labels (appended as-is, matching the legacy picker).
pub fn distinct_roles(rows: &[AuthorRow], extra: &[&str]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        if !seen.iter().any(|role| role == &row.role) {
            seen.push(row.role.clone());
        }
    }
    for label in extra {
        seen.push((*label).to_string());
    }
    seen
}

/// Reassign roles in halves: the first `len / 2` rows take `first`, the rest
/// take `second` (the legacy folder-import behavior).
pub fn assign_roles_split(rows: &mut [AuthorRow], first: &str, second: &str) {
    let half = rows.len() / 2;
    for (index, row) in rows.iter_mut().enumerate() {
        row.role = if index < half {
            first.to_string()
        } else {
            second.to_string()
        };
    }
}

impl TableModel<AuthorRow> {
    /// Distinct roles of the current rows plus the default extra labels.
    pub fn role_choices(&self) -> Vec<String> {
        distinct_roles(self.rows(), &DEFAULT_EXTRA_ROLES)
    }
}
