//! Turns a requested path string into a normalized absolute path and enforces confinement.
//!
//! Pure path algebra: nothing in here touches the file system, so the confinement decision
//! is made on the textual form before any `stat`, `readdir`, or `read` happens.

use std::path::{Component, Path, PathBuf};

use crate::config::{ALLOW_ANY_PATH_ENV, Config, ConfinementMode};
use crate::file_system::BrowseError;

/// A request path after home expansion and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The path exactly as the client sent it.
    pub requested: String,
    /// Normalized absolute form. Never contains `.` or `..` components.
    pub absolute: PathBuf,
    /// Whether `absolute` is the root or a descendant of it.
    pub within_root: bool,
}

impl ResolvedPath {
    /// Builds the request path for a child entry, in the same form the client used.
    ///
    /// Sending the result back resolves to `absolute.join(name)`.
    pub fn child_request_path(&self, name: &str) -> String {
        let base = self.requested.trim_end_matches('/');
        if base.is_empty() {
            if self.requested.starts_with('/') {
                format!("/{}", name)
            } else {
                name.to_string()
            }
        } else {
            format!("{}/{}", base, name)
        }
    }

    pub fn absolute_display(&self) -> String {
        self.absolute.to_string_lossy().to_string()
    }
}

/// Resolves `requested` against the configured root and applies the confinement policy.
///
/// - A leading `~` is replaced with the home directory.
/// - Empty and relative paths are taken relative to the root.
/// - In root-confined mode, a path outside the root fails with `AccessDenied`.
pub fn resolve(requested: &str, config: &Config) -> Result<ResolvedPath, BrowseError> {
    resolve_with_home(requested, config, dirs::home_dir().as_deref())
}

/// Same as `resolve` with an explicit home directory.
pub fn resolve_with_home(requested: &str, config: &Config, home: Option<&Path>) -> Result<ResolvedPath, BrowseError> {
    let expanded = expand_tilde(requested, home);
    let joined = if expanded.as_os_str().is_empty() {
        config.root.clone()
    } else if expanded.is_absolute() {
        expanded
    } else {
        config.root.join(expanded)
    };
    let absolute = normalize_path(&joined);
    let within_root = absolute.starts_with(&config.root);

    if config.confinement == ConfinementMode::RootConfined && !within_root {
        log::debug!(
            "resolve: denied requested={}, absolute={}, root={}",
            requested,
            absolute.display(),
            config.root.display()
        );
        return Err(BrowseError::AccessDenied {
            path: requested.to_string(),
            hint: format!(
                "Access is limited to {}. Set {}=1 to allow browsing any path.",
                config.root.display(),
                ALLOW_ANY_PATH_ENV
            ),
        });
    }

    Ok(ResolvedPath {
        requested: requested.to_string(),
        absolute,
        within_root,
    })
}

/// Expands a leading `~` segment (`~` or `~/...`) to `home`.
///
/// `~user` forms are left alone, as is everything when no home directory is known.
pub fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    if let Some(home) = home {
        if path == "~" {
            return home.to_path_buf();
        }
        if let Some(rest) = path.strip_prefix("~/") {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

/// Lexically normalizes a path: drops `.`, applies `..` by popping, collapses separators.
///
/// `..` never climbs above the root, so `/../etc` becomes `/etc`. Symlinks are not
/// consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // pop() returns false at the root, which is exactly where `..` should stop
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
