//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `library-sync` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! Options shared by every command (config location, library root, color)
//! are global flags collected into a [`Context`]. [`Context::load`] gathers
//! the configuration, the library snapshot and its dependency graph once,
//! and [`Session::select`] runs the selection engine over them.

pub mod apply;
pub mod completions;
pub mod list;
pub mod preview;
pub mod validate;

use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use library_sync::config::{self, ProjectConfig};
use library_sync::defaults;
use library_sync::library::{self, LibrarySnapshot};
use library_sync::output::OutputConfig;
use library_sync::phases::dependencies::DependencyGraph;
use library_sync::phases::orchestrator;
use library_sync::phases::report::StructuredSelection;
use library_sync::suggestions;

/// Global options shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    pub config_path: PathBuf,
    pub global_config: Option<PathBuf>,
    pub library: Option<PathBuf>,
    pub color: String,
}

/// Everything the engine needs, loaded from disk.
pub struct Session {
    pub config: ProjectConfig,
    pub library_root: PathBuf,
    pub snapshot: LibrarySnapshot,
    pub graph: DependencyGraph,
}

impl Context {
    pub fn output(&self) -> OutputConfig {
        OutputConfig::from_env_and_flag(&self.color)
    }

    /// Load the configuration, scan the library and read its manifests.
    pub fn load(&self) -> Result<Session> {
        let config_path = &self.config_path;
        if !config_path.exists() {
            return Err(suggestions::config_not_found(config_path));
        }

        let global = self
            .global_config
            .clone()
            .or_else(defaults::global_config_path);

        let config = config::load(config_path, global.as_deref()).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load config from {}: {}",
                config_path.display(),
                e
            )
        })?;

        let config_dir = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let library_root = match &self.library {
            Some(root) => root.clone(),
            None => config.library_root(&config_dir),
        };

        if !library_root.is_dir() {
            return Err(suggestions::library_not_found(&library_root));
        }

        debug!("Scanning library at {}", library_root.display());
        let snapshot = LibrarySnapshot::scan(&library_root)?;
        let declarations = library::load_dependencies(&library_root, &snapshot);
        let graph = DependencyGraph::build(&snapshot, &declarations);

        Ok(Session {
            config,
            library_root,
            snapshot,
            graph,
        })
    }
}

impl Session {
    /// Run the selection engine.
    pub fn select(&self) -> StructuredSelection {
        orchestrator::execute(self.config.resources.as_ref(), &self.snapshot, &self.graph)
    }
}
