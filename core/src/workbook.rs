//! Workbook opening: container access plus worksheet parsing.

use crate::container::{ContainerError, OpcContainer};
use crate::grid::SheetGrid;
use crate::sheet_parser::{
    SheetParseError, parse_relationships, parse_shared_strings, parse_sheet_xml,
    parse_workbook_xml, resolve_sheet_target,
};
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkbookError {
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
    #[error("sheet parse error: {0}")]
    Parse(#[from] SheetParseError),
    #[error("xl/workbook.xml missing or unreadable")]
    WorkbookXmlMissing,
    #[error("worksheet XML missing for sheet {sheet_name}")]
    WorksheetXmlMissing { sheet_name: String },
}

/// A named worksheet and its extracted grid.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSheet {
    pub name: String,
    pub grid: SheetGrid,
}

/// A parsed workbook: sheets in workbook order.
#[derive(Debug, Clone, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<NamedSheet>,
}

impl Workbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Workbook, WorkbookError> {
        let mut container = OpcContainer::open_from_path(path)?;
        Self::from_container(&mut container)
    }

    pub fn open_from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Workbook, WorkbookError> {
        let mut container = OpcContainer::open_from_reader(reader)?;
        Self::from_container(&mut container)
    }

    fn from_container(container: &mut OpcContainer) -> Result<Workbook, WorkbookError> {
        let shared_strings = match container.read_file_optional("xl/sharedStrings.xml")? {
            Some(bytes) => parse_shared_strings(&bytes)?,
            None => Vec::new(),
        };

        let workbook_bytes = container
            .read_file("xl/workbook.xml")
            .map_err(|_| WorkbookError::WorkbookXmlMissing)?;
        let descriptors = parse_workbook_xml(&workbook_bytes)?;

        let relationships = match container.read_file_optional("xl/_rels/workbook.xml.rels")? {
            Some(bytes) => parse_relationships(&bytes)?,
            None => HashMap::new(),
        };

        let mut sheets = Vec::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.iter().enumerate() {
            let target = resolve_sheet_target(descriptor, &relationships, index);
            let sheet_bytes =
                container
                    .read_file(&target)
                    .map_err(|_| WorkbookError::WorksheetXmlMissing {
                        sheet_name: descriptor.name.clone(),
                    })?;
            let grid = parse_sheet_xml(&sheet_bytes, &shared_strings)?;
            sheets.push(NamedSheet {
                name: descriptor.name.clone(),
                grid,
            });
        }

        Ok(Workbook { sheets })
    }

    /// Look up a sheet's grid by exact name.
    pub fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .map(|sheet| &sheet.grid)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }
}
