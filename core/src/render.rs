//! Report payload assembly.
//!
//! The document template addresses its data by field name, so the payload
//! mirrors the template contract exactly: `Items` for the scanned files,
//! `Excel` for the workbook's own record, `Control` as a cell-address map
//! over the control grid, and `Authors` for the role/name table. Field names
//! are part of the contract and serialize in PascalCase.

use crate::addressing::index_to_address;
use crate::checksum::FileRecord;
use crate::extract::AuthorRow;
use crate::grid::SheetGrid;
use serde::Serialize;
use std::collections::BTreeMap;

/// One scanned file as the template sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckedFile {
    pub file_name: String,
    pub checksum: String,
    pub file_size: String,
    pub created_at: String,
}

impl From<&FileRecord> for CheckedFile {
    fn from(record: &FileRecord) -> CheckedFile {
        CheckedFile {
            file_name: record.name.clone(),
            checksum: record.checksum.clone(),
            file_size: record.size.clone(),
            created_at: record.created_at.clone(),
        }
    }
}

/// One author line as the template sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthorEntry {
    pub title: String,
    pub name: String,
}

impl From<&AuthorRow> for AuthorEntry {
    fn from(row: &AuthorRow) -> AuthorEntry {
        AuthorEntry {
            title: row.role.clone(),
            name: row.name.clone(),
        }
    }
}

/// Everything the document template can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderPayload {
    pub items: Vec<CheckedFile>,
    pub excel: CheckedFile,
    pub control: BTreeMap<String, String>,
    pub authors: Vec<AuthorEntry>,
}

impl RenderPayload {
    /// Assemble the payload from scan and extraction results plus the
    /// workbook's own checksum record.
    pub fn build(
        items: &[FileRecord],
        control: &SheetGrid,
        authors: &[AuthorRow],
        workbook_record: &FileRecord,
    ) -> RenderPayload {
        RenderPayload {
            items: items.iter().map(CheckedFile::from).collect(),
            excel: CheckedFile::from(workbook_record),
            control: control_map(control),
            authors: authors.iter().map(AuthorEntry::from).collect(),
        }
    }
}

/// Flatten a grid into an address-keyed map. Every stored cell is mapped,
/// interior empties included: a template token for a present-but-empty cell
/// must substitute to "" rather than survive as a literal token. Trailing
/// emptiness is already trimmed from grid storage.
fn control_map(grid: &SheetGrid) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (row, col, value) in grid.iter_cells() {
        map.insert(index_to_address(row, col), value.to_string());
    }
    map
}
