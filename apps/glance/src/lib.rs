// Deny unused code to catch dead code early
#![deny(unused)]
// Warn on unused dependencies to catch cfg mismatches
#![warn(unused_crate_dependencies)]
// Warn on redundant path prefixes (e.g., std::path::Path when Path is imported)
#![warn(unused_qualifications)]
// Use log::* macros instead of println!/eprintln! for proper log level control
#![deny(clippy::print_stdout, clippy::print_stderr)]

//noinspection RsUnusedImport
// Dev dependency used only by test modules
#[cfg(test)]
use tempfile as _;

pub mod client;
pub mod config;
pub mod file_system;
mod ignore_poison;
pub mod server;
pub mod thumbnails;
pub mod viewer;

use config::Config;

/// Starts the server with configuration from settings file and environment.
///
/// Blocks until the server stops. Logging respects `RUST_LOG` (default: info).
pub fn run() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = Config::load();
    log::info!(
        "Starting glance: root={}, confinement={}",
        config.root.display(),
        config.confinement
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {}", e))?;

    runtime.block_on(server::start_server(config))
}
