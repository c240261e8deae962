//! Low-level directory reading and DirectoryEntry construction.

use std::fs;
use std::io;
use std::path::Path;

use crate::file_system::ResolvedPath;
use crate::file_system::listing::{DirectoryEntry, EntryKind};
use crate::thumbnails::is_image_extension;

/// Names starting with this marker are hidden and never listed.
const HIDDEN_MARKER: char = '.';

/// Reads the visible entries of a directory, unsorted.
pub(crate) fn read_entries(resolved: &ResolvedPath) -> io::Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(&resolved.absolute)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if is_hidden(&name) {
            continue;
        }
        let kind = entry_kind(&entry);
        entries.push(build_entry(resolved, name, kind));
    }
    Ok(entries)
}

pub(crate) fn is_hidden(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}

/// Classifies an entry. Symlinks take their target's kind; unreadable entries count as files.
fn entry_kind(entry: &fs::DirEntry) -> EntryKind {
    let Ok(file_type) = entry.file_type() else {
        return EntryKind::File;
    };
    let is_dir = if file_type.is_symlink() {
        fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false)
    } else {
        file_type.is_dir()
    };
    if is_dir { EntryKind::Directory } else { EntryKind::File }
}

fn build_entry(resolved: &ResolvedPath, name: String, kind: EntryKind) -> DirectoryEntry {
    let extension = match kind {
        EntryKind::Directory => String::new(),
        EntryKind::File => extension_of(&name),
    };
    let is_image = is_image_extension(&extension);
    DirectoryEntry {
        relative_path: resolved.child_request_path(&name),
        name,
        kind,
        extension,
        is_image,
    }
}

/// Lower-cased extension with its leading dot, or empty if the name has none.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
