//! OPC (Open Packaging Conventions) container handling.
//!
//! Both `.xlsx` workbooks and `.docx` templates are ZIP-based OPC packages;
//! this module wraps the archive with size limits and validates that
//! `[Content_Types].xml` is present.

use std::io::{Read, Seek};
use std::path::Path;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Debug, Clone, Copy)]
pub struct ContainerLimits {
    pub max_entries: usize,
    pub max_part_uncompressed_bytes: u64,
    pub max_total_uncompressed_bytes: u64,
}

impl Default for ContainerLimits {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            max_part_uncompressed_bytes: 64 * 1024 * 1024,
            max_total_uncompressed_bytes: 256 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(String),
    #[error("not a ZIP container")]
    NotZipContainer,
    #[error("not an OPC package (missing [Content_Types].xml)")]
    NotOpcPackage,
    #[error("file not found in package: {path}")]
    FileNotFound { path: String },
    #[error("package has too many entries: {entries} (limit: {max_entries})")]
    TooManyEntries { entries: usize, max_entries: usize },
    #[error("part '{path}' is too large: {size} bytes (limit: {limit} bytes)")]
    PartTooLarge { path: String, size: u64, limit: u64 },
    #[error("total uncompressed size exceeds limit: {limit} bytes")]
    TotalTooLarge { limit: u64 },
}

pub(crate) trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

pub struct OpcContainer {
    archive: ZipArchive<Box<dyn ReadSeek>>,
    limits: ContainerLimits,
    total_read: u64,
}

impl OpcContainer {
    pub fn open_from_reader<R: Read + Seek + 'static>(
        reader: R,
    ) -> Result<OpcContainer, ContainerError> {
        Self::open_from_reader_with_limits(reader, ContainerLimits::default())
    }

    pub fn open_from_reader_with_limits<R: Read + Seek + 'static>(
        reader: R,
        limits: ContainerLimits,
    ) -> Result<OpcContainer, ContainerError> {
        let reader: Box<dyn ReadSeek> = Box::new(reader);
        let archive = ZipArchive::new(reader).map_err(|err| match err {
            ZipError::InvalidArchive(_) | ZipError::UnsupportedArchive(_) => {
                ContainerError::NotZipContainer
            }
            ZipError::Io(e) => ContainerError::Io(e),
            other => ContainerError::Zip(other.to_string()),
        })?;

        if archive.len() > limits.max_entries {
            return Err(ContainerError::TooManyEntries {
                entries: archive.len(),
                max_entries: limits.max_entries,
            });
        }

        let mut container = OpcContainer {
            archive,
            limits,
            total_read: 0,
        };

        if container.archive.by_name("[Content_Types].xml").is_err() {
            return Err(ContainerError::NotOpcPackage);
        }

        Ok(container)
    }

    pub fn open_from_path(path: impl AsRef<Path>) -> Result<OpcContainer, ContainerError> {
        let file = std::fs::File::open(path)?;
        Self::open_from_reader(file)
    }

    /// Read a named part in full, enforcing the per-part and total size limits.
    pub fn read_file(&mut self, name: &str) -> Result<Vec<u8>, ContainerError> {
        let size = {
            let file = self.archive.by_name(name).map_err(|e| match e {
                ZipError::FileNotFound => ContainerError::FileNotFound {
                    path: name.to_string(),
                },
                ZipError::Io(io_err) => ContainerError::Io(io_err),
                other => ContainerError::Zip(other.to_string()),
            })?;
            file.size()
        };
        self.check_part_size(name, size)?;

        let mut file = self
            .archive
            .by_name(name)
            .map_err(|e| ContainerError::Zip(e.to_string()))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;

        self.total_read += size;
        Ok(buf)
    }

    /// Like [`read_file`](Self::read_file), but a missing part is `Ok(None)`.
    pub fn read_file_optional(&mut self, name: &str) -> Result<Option<Vec<u8>>, ContainerError> {
        match self.read_file(name) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(ContainerError::FileNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read every entry in archive order as `(name, bytes)` pairs.
    ///
    /// Used when re-packing a template: the output package must carry every
    /// part of the input, not just the ones being rewritten.
    pub fn read_all_entries(&mut self) -> Result<Vec<(String, Vec<u8>)>, ContainerError> {
        let mut entries = Vec::with_capacity(self.archive.len());

        for index in 0..self.archive.len() {
            let (name, size) = {
                let file = self
                    .archive
                    .by_index(index)
                    .map_err(|e| ContainerError::Zip(e.to_string()))?;
                (file.name().to_string(), file.size())
            };
            self.check_part_size(&name, size)?;

            let mut file = self
                .archive
                .by_index(index)
                .map_err(|e| ContainerError::Zip(e.to_string()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)?;
            self.total_read += size;

            entries.push((name, buf));
        }

        Ok(entries)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.archive.file_names()
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn limits(&self) -> &ContainerLimits {
        &self.limits
    }

    fn check_part_size(&self, name: &str, size: u64) -> Result<(), ContainerError> {
        if size > self.limits.max_part_uncompressed_bytes {
            return Err(ContainerError::PartTooLarge {
                path: name.to_string(),
                size,
                limit: self.limits.max_part_uncompressed_bytes,
            });
        }
        if self.total_read.saturating_add(size) > self.limits.max_total_uncompressed_bytes {
            return Err(ContainerError::TotalTooLarge {
                limit: self.limits.max_total_uncompressed_bytes,
            });
        }
        Ok(())
    }
}
