//! ИУЛ report assembly: scan a folder of deliverables, extract control and
//! author tables from a companion workbook, and render everything into a
//! Word-document template.
//!
//! This crate provides:
//! - Opening and parsing Excel workbooks (`.xlsx` files) into string grids
//! - A CRC-32/IEEE checksum pass over a directory of deliverable files
//! - Ordered, mutable table models with move/delete operations for view bindings
//! - Render-payload assembly and Word-template substitution
//!
//! # Quick Start
//!
//! ```ignore
//! use iul_core::{ExtractOptions, RenderPayload, Workbook, extract, scan_dir};
//!
//! let files = scan_dir("./deliverables".as_ref())?;
//! let workbook = Workbook::open("./deliverables.xlsx".as_ref())?;
//! let report = extract(&workbook, &ExtractOptions::default());
//! let meta = iul_core::checksum_file("./deliverables.xlsx".as_ref())?;
//! let payload = RenderPayload::build(&files, &report.control, &report.authors, &meta);
//! iul_core::render_document("./template.docx".as_ref(), "./result.docx".as_ref(), &payload)?;
//! ```

pub mod addressing;
pub mod checksum;
pub mod container;
pub mod discover;
pub mod docx_template;
pub mod extract;
pub mod grid;
pub mod render;
pub mod sheet_parser;
pub mod table_model;
pub mod workbook;

pub use addressing::{
    AddressParseError, CellAddress, CellRange, RangeParseError, address_to_index,
    index_to_address, parse_range_list,
};
pub use checksum::{FileRecord, ScanError, checksum_file, scan_dir};
pub use container::{ContainerError, ContainerLimits, OpcContainer};
pub use discover::find_companion_workbook;
pub use docx_template::{RenderError, render_document};
pub use extract::{
    AuthorRanges, AuthorRow, ExtractOptions, ExtractReport, assign_roles_split, distinct_roles,
    extract, DEFAULT_EXTRA_ROLES,
};
pub use grid::SheetGrid;
pub use render::{AuthorEntry, CheckedFile, RenderPayload};
pub use sheet_parser::SheetParseError;
pub use table_model::{BoundaryPolicy, TableModel};
pub use workbook::{Workbook, WorkbookError};
