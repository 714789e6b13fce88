//! Default values for library-sync configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const DEFAULT_CONFIG_FILENAME: &str = ".library-sync.yaml";

/// Where `apply` copies selected resources when `--output` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = ".library-sync/resources";

/// Returns the library root used when the configuration names none.
///
/// This is `.library-sync/library` next to the configuration file, and can
/// be overridden by `library_path` in the config, the `--library` CLI flag,
/// or the `LIBRARY_SYNC_LIBRARY` environment variable.
pub fn default_library_path(config_dir: &Path) -> PathBuf {
    config_dir.join(".library-sync").join("library")
}

/// Returns the location of the global configuration file.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/library-sync/config.yaml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/library-sync/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\library-sync\config.yaml`
///
/// Returns `None` if the platform config directory cannot be determined.
/// Overridden by `--global-config` or `LIBRARY_SYNC_GLOBAL_CONFIG`.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("library-sync").join("config.yaml"))
}
