//! Cell addressing: A1-style addresses and rectangular cell ranges.
//!
//! All indices are zero-based; A1 ↔ (row 0, col 0). Range declarations such
//! as `D5:E23` follow spreadsheet convention and are inclusive of both
//! corners.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cell address: {input}")]
pub struct AddressParseError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("malformed cell range: {input}")]
    Malformed { input: String },
    #[error("cell range end precedes start: {input}")]
    Reversed { input: String },
    #[error(transparent)]
    Address(#[from] AddressParseError),
}

/// Convert zero-based (row, col) indices to an A1 address string.
pub fn index_to_address(row: usize, col: usize) -> String {
    let mut remaining = col;
    let mut label = String::new();

    loop {
        label.push((b'A' + (remaining % 26) as u8) as char);
        if remaining < 26 {
            break;
        }
        remaining = remaining / 26 - 1;
    }

    label.chars().rev().collect::<String>() + &(row + 1).to_string()
}

/// Parse an A1 address into zero-based (row, col) indices.
/// Returns `None` for malformed addresses.
pub fn address_to_index(a1: &str) -> Option<(usize, usize)> {
    let mut col: usize = 0;
    let mut row: usize = 0;
    let mut saw_letter = false;
    let mut saw_digit = false;

    for ch in a1.chars() {
        if ch.is_ascii_alphabetic() {
            if saw_digit {
                // Letters after digits are not allowed.
                return None;
            }
            saw_letter = true;
            let upper = ch.to_ascii_uppercase() as u8;
            col = col
                .checked_mul(26)?
                .checked_add((upper - b'A' + 1) as usize)?;
        } else if ch.is_ascii_digit() {
            saw_digit = true;
            row = row
                .checked_mul(10)?
                .checked_add((ch as u8 - b'0') as usize)?;
        } else {
            return None;
        }
    }

    if !saw_letter || !saw_digit || row == 0 || col == 0 {
        return None;
    }

    Some((row - 1, col - 1))
}

/// A zero-based cell position, convertible to and from A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

impl CellAddress {
    pub fn new(row: usize, col: usize) -> CellAddress {
        CellAddress { row, col }
    }

    pub fn to_a1(&self) -> String {
        index_to_address(self.row, self.col)
    }
}

impl FromStr for CellAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = address_to_index(s).ok_or_else(|| AddressParseError {
            input: s.to_string(),
        })?;
        Ok(CellAddress { row, col })
    }
}

impl std::fmt::Display for CellAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// A rectangular cell range, inclusive of both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Parse a `start:end` declaration such as `D5:E23`.
    pub fn parse(input: &str) -> Result<CellRange, RangeParseError> {
        let trimmed = input.trim();
        let (start_raw, end_raw) = trimmed.split_once(':').ok_or_else(|| {
            RangeParseError::Malformed {
                input: trimmed.to_string(),
            }
        })?;

        let start: CellAddress = start_raw.trim().parse()?;
        let end: CellAddress = end_raw.trim().parse()?;

        if end.row < start.row || end.col < start.col {
            return Err(RangeParseError::Reversed {
                input: trimmed.to_string(),
            });
        }

        Ok(CellRange { start, end })
    }

    /// Number of rows covered, end-inclusive.
    pub fn height(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    /// Number of columns covered, end-inclusive.
    pub fn width(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    pub fn rows(&self) -> impl Iterator<Item = usize> {
        self.start.row..=self.end.row
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Parse a comma-separated list of range declarations, e.g. `D5:E23,F5:G23`.
///
/// Ranges keep their declaration order; an empty list is malformed.
pub fn parse_range_list(input: &str) -> Result<Vec<CellRange>, RangeParseError> {
    let parts: Vec<&str> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        return Err(RangeParseError::Malformed {
            input: input.to_string(),
        });
    }

    parts.into_iter().map(CellRange::parse).collect()
}
