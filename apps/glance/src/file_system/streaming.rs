//! Raw file reads with an extension-derived content type.
//!
//! Whole-file transfer only: no range requests.

use std::fs;
use std::time::Instant;

use crate::file_system::listing::reading::extension_of;
use crate::file_system::{BrowseError, ResolvedPath};

/// Bytes of a file plus the content type to serve them with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContents {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Maps a lower-cased extension (with or without the leading dot) to a content type.
///
/// Static table lookup, no content sniffing. Unknown extensions get
/// `application/octet-stream`.
pub fn content_type_for_extension(extension: &str) -> String {
    let ext = extension.trim_start_matches('.');
    if ext.is_empty() {
        return mime_guess::mime::APPLICATION_OCTET_STREAM.to_string();
    }
    mime_guess::from_ext(ext).first_or_octet_stream().to_string()
}

/// Reads a whole file. Directories are rejected up front with `IsADirectory`.
pub fn read_file(resolved: &ResolvedPath) -> Result<FileContents, BrowseError> {
    let start = Instant::now();
    let path = &resolved.absolute;

    let metadata = fs::metadata(path).map_err(|e| BrowseError::from_io(&e, &resolved.requested))?;
    if metadata.is_dir() {
        return Err(BrowseError::IsADirectory {
            path: resolved.requested.clone(),
        });
    }

    let bytes = fs::read(path).map_err(|e| BrowseError::from_io(&e, &resolved.requested))?;
    let name = path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    let content_type = content_type_for_extension(&extension_of(&name));

    log::debug!(
        "read_file: path={}, bytes={}, content_type={}, total={}ms",
        path.display(),
        bytes.len(),
        content_type,
        start.elapsed().as_millis()
    );

    Ok(FileContents { bytes, content_type })
}
