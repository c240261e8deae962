//! Directory listing - reading, filtering hidden entries, sorting.

pub(crate) mod reading;
pub(crate) mod sorting;

#[cfg(test)]
mod reading_test;

use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Instant;

use crate::file_system::{BrowseError, ResolvedPath};

pub use sorting::{compare_names, sort_entries};

/// Whether an entry is a directory or anything else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Directory,
    File,
}

/// One visible entry in a directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Request path for this entry, in the same form as the listing's requested path.
    pub relative_path: String,
    /// Lower-cased, with the leading dot (".jpg"). Empty for directories and extensionless files.
    pub extension: String,
    /// Whether the extension is in the thumbnail/viewer allow-list.
    pub is_image: bool,
}

impl DirectoryEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// The result of one listing request. Built fresh every time, never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryListing {
    #[serde(rename = "path")]
    pub requested_path: String,
    pub absolute_path: String,
    #[serde(rename = "items")]
    pub entries: Vec<DirectoryEntry>,
}

/// Lists a resolved directory: hidden entries dropped, directories first, then files.
///
/// Reads the directory once and never recurses. A missing target fails with `NotFound`,
/// anything that isn't a directory with `NotADirectory`.
pub fn list_directory(resolved: &ResolvedPath) -> Result<DirectoryListing, BrowseError> {
    let start = Instant::now();
    let path = &resolved.absolute;

    let metadata = fs::metadata(path).map_err(|e| BrowseError::from_io(&e, &resolved.requested))?;
    if !metadata.is_dir() {
        return Err(BrowseError::NotADirectory {
            path: resolved.requested.clone(),
        });
    }

    let mut entries = reading::read_entries(resolved).map_err(|e| BrowseError::from_io(&e, &resolved.requested))?;
    sort_entries(&mut entries);

    log::debug!(
        "list_directory: path={}, entries={}, total={}ms",
        path.display(),
        entries.len(),
        start.elapsed().as_millis()
    );

    Ok(DirectoryListing {
        requested_path: resolved.requested.clone(),
        absolute_path: resolved.absolute_display(),
        entries,
    })
}
