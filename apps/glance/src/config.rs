//! Process-wide configuration, built once at startup and read-only afterwards.
//!
//! Priority: environment variables > settings file > defaults.

use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::file_system::path_resolver::normalize_path;

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 9230;
/// Default longest edge for thumbnails, in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 128;

/// Env var that lifts root confinement. Quoted in 403 responses.
pub const ALLOW_ANY_PATH_ENV: &str = "GLANCE_ALLOW_ANY_PATH";

/// Whether requests may leave the configured root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfinementMode {
    /// Every resolved path must be the root or a descendant of it.
    RootConfined,
    /// Any absolute path is allowed.
    Unrestricted,
}

impl fmt::Display for ConfinementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootConfined => write!(f, "root-confined"),
            Self::Unrestricted => write!(f, "unrestricted"),
        }
    }
}

/// Optional settings file contents. Every field falls back to env/defaults when absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
    pub allow_any_path: Option<bool>,
    pub thumbnail_size: Option<u32>,
}

/// Reads settings from a JSON file. Returns defaults if the file is missing or malformed.
pub fn load_settings(path: &Path) -> Settings {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("Couldn't read settings file {}: {}", path.display(), e);
            return Settings::default();
        }
    };
    match serde_json::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Normalized absolute root. Relative request paths resolve against it.
    pub root: PathBuf,
    pub confinement: ConfinementMode,
    /// Default thumbnail max edge when the request doesn't give one.
    pub thumbnail_size: u32,
}

impl Config {
    /// Loads configuration from `GLANCE_SETTINGS` (if set) and environment variables.
    pub fn load() -> Self {
        let settings = env::var("GLANCE_SETTINGS")
            .ok()
            .map(|p| load_settings(Path::new(&p)))
            .unwrap_or_default();
        Self::from_settings_and_env(settings)
    }

    /// Merges settings with env var overrides: env vars > settings > defaults.
    pub fn from_settings_and_env(settings: Settings) -> Self {
        let host = env::var("GLANCE_HOST")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(settings.host)
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

        let port = env::var("GLANCE_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(settings.port)
            .unwrap_or(DEFAULT_PORT);

        let root = env::var("GLANCE_ROOT")
            .ok()
            .map(PathBuf::from)
            .or(settings.root)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"));

        let allow_any_path = env::var(ALLOW_ANY_PATH_ENV)
            .map(|v| v == "true" || v == "1")
            .ok()
            .or(settings.allow_any_path)
            .unwrap_or(false);

        let thumbnail_size = env::var("GLANCE_THUMBNAIL_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(settings.thumbnail_size)
            .unwrap_or(DEFAULT_THUMBNAIL_SIZE);

        Self::new(host, port, &root, allow_any_path, thumbnail_size)
    }

    /// Builds a config with a normalized root.
    pub fn new(host: IpAddr, port: u16, root: &Path, allow_any_path: bool, thumbnail_size: u32) -> Self {
        let root = if root.is_absolute() {
            normalize_path(root)
        } else {
            // A relative root is taken relative to the working directory, resolved once here
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
            normalize_path(&cwd.join(root))
        };
        Self {
            host,
            port,
            root,
            confinement: if allow_any_path {
                ConfinementMode::Unrestricted
            } else {
                ConfinementMode::RootConfined
            },
            thumbnail_size,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
