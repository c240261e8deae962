//! File system access: path confinement, directory listing, and raw file reads.
//!
//! Everything here is read-only and synchronous. Callers on an async runtime
//! dispatch these through `spawn_blocking`.

pub mod listing;
pub mod path_resolver;
pub mod streaming;


pub use listing::{DirectoryEntry, DirectoryListing, EntryKind, list_directory};
pub use path_resolver::{ResolvedPath, resolve};
pub use streaming::{FileContents, content_type_for_extension, read_file};

use serde::Serialize;
use std::io;

/// Errors surfaced by listing, streaming, and thumbnail operations.
///
/// Each failure maps to exactly one kind, so callers can tell them apart.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum BrowseError {
    /// Confinement policy rejected the path.
    AccessDenied { path: String, hint: String },
    NotFound { path: String },
    NotADirectory { path: String },
    IsADirectory { path: String },
    /// Thumbnail requested for a non-image extension.
    UnsupportedType { extension: String },
    /// Decoding, resizing, or encoding an image failed.
    Processing { message: String },
    Internal { message: String },
}

impl BrowseError {
    /// Maps an I/O error on `path` to the most specific kind.
    pub fn from_io(err: &io::Error, path: &str) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path: path.to_string() },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path: path.to_string() },
            io::ErrorKind::IsADirectory => Self::IsADirectory { path: path.to_string() },
            _ => Self::Internal {
                message: format!("{}: {}", path, err),
            },
        }
    }

    /// Stable machine-readable name of the kind, used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccessDenied { .. } => "accessDenied",
            Self::NotFound { .. } => "notFound",
            Self::NotADirectory { .. } => "notADirectory",
            Self::IsADirectory { .. } => "isADirectory",
            Self::UnsupportedType { .. } => "unsupportedType",
            Self::Processing { .. } => "processing",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for BrowseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessDenied { path, .. } => write!(f, "Access denied: {} is outside the allowed root", path),
            Self::NotFound { path } => write!(f, "Not found: {}", path),
            Self::NotADirectory { path } => write!(f, "Not a directory: {}", path),
            Self::IsADirectory { path } => write!(f, "Is a directory: {}", path),
            Self::UnsupportedType { extension } => {
                if extension.is_empty() {
                    write!(f, "Unsupported file type (no extension)")
                } else {
                    write!(f, "Unsupported file type: {}", extension)
                }
            }
            Self::Processing { message } => write!(f, "Image processing failed: {}", message),
            Self::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for BrowseError {}
