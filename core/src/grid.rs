//! Ragged string grids read from worksheet parts.
//!
//! The extraction contract is string-shaped: every cell is the text a user
//! would see, and rows keep the ragged lengths the spreadsheet reader
//! produced. Storage is never padded; lookups past the end of a row (or past
//! the last row) return the empty string.

/// A row-major grid of formatted cell text.
///
/// # Invariants
///
/// No row ends in an empty string, and the last row is non-empty; trailing
/// emptiness is trimmed on construction so that `nrows`/`ncols` describe the
/// populated extent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetGrid {
    rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new() -> SheetGrid {
        SheetGrid { rows: Vec::new() }
    }

    /// Build a grid from raw rows, trimming trailing empty cells from each
    /// row and trailing empty rows from the sheet.
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> SheetGrid {
        for row in &mut rows {
            while row.last().is_some_and(|cell| cell.is_empty()) {
                row.pop();
            }
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        SheetGrid { rows }
    }

    /// Cell text at (row, col); empty string when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    pub fn ncols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate stored cells as `(row, col, text)`, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, text)| (r, c, text.as_str()))
        })
    }
}
