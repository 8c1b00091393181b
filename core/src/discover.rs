//! Companion workbook discovery.
//!
//! A scanned deliverable folder conventionally has a workbook named after it
//! (`<folder>.xlsx`) somewhere under the grandparent directory. Discovery is
//! a convenience only; callers that know the workbook path pass it directly.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Search for `<dirname>.xlsx` under the grandparent of `scanned_dir`.
///
/// Unreadable subtrees are skipped rather than failing the search. Returns
/// the first match in walk order, or `None` when the folder has no file name
/// or no match exists. When duplicate-named workbooks exist in the subtree
/// the winner is the first one encountered; the legacy scanner walked the
/// whole tree and kept the last, so such layouts may resolve differently.
pub fn find_companion_workbook(scanned_dir: &Path) -> Option<PathBuf> {
    let dir_name = scanned_dir.file_name()?;
    let mut wanted = dir_name.to_os_string();
    wanted.push(".xlsx");

    let search_root = scanned_dir.join("..").join("..");
    WalkDir::new(search_root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == wanted)
        .map(|entry| entry.into_path())
}
