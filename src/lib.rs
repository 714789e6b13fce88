//! # Library Sync
//!
//! This library decides which resources of a shared library (prompts,
//! templates, patterns, configs, scripts and workflows) a project selects.
//! It is used by the `library-sync` command-line tool, but the selection
//! engine has no I/O of its own and can be embedded anywhere.
//!
//! ## Quick Example
//!
//! ```
//! use library_sync::config;
//! use library_sync::library::LibrarySnapshot;
//! use library_sync::phases::{dependencies::DependencyGraph, orchestrator};
//! use library_sync::resource::ResourceCategory;
//!
//! let snapshot = LibrarySnapshot::from_files(
//!     ResourceCategory::Prompts,
//!     ["code-review.md", "code-legacy.md", "deployment.md"],
//! );
//!
//! let config = config::parse(r#"
//! resources:
//!   prompts:
//!     include: ["code-*"]
//!     exclude: ["code-legacy.md"]
//! "#).unwrap();
//!
//! let selection = orchestrator::execute(
//!     config.resources.as_ref(),
//!     &snapshot,
//!     &DependencyGraph::new(),
//! );
//! let prompts = selection.category(ResourceCategory::Prompts).unwrap();
//! assert_eq!(prompts.selected, vec!["code-review.md"]);
//! assert_eq!(prompts.excluded_explicitly[0].path, "code-legacy.md");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The `.library-sync.yaml` schema, with one
//!   optional include/exclude rule per category.
//! - **Patterns (`pattern`)**: Segment-aware wildcard matching of
//!   library-relative paths.
//! - **Library (`library`)**: An immutable snapshot of the library's paths and
//!   the dependency declarations found in resource manifests.
//! - **Phases (`phases`)**: The selection pipeline: filtering, dependency
//!   expansion, validation and reporting.
//!
//! ## Execution Flow
//!
//! Callers gather inputs once, up front:
//!
//! 1.  Load the configuration with [`config::load`].
//! 2.  Scan the library with [`library::LibrarySnapshot::scan`] and read its
//!     manifests with [`library::load_dependencies`].
//! 3.  Build a [`phases::dependencies::DependencyGraph`].
//! 4.  Call [`phases::orchestrator::execute`] and render the resulting
//!     [`phases::report::StructuredSelection`].

pub mod config;
pub mod defaults;
pub mod error;
pub mod library;
pub mod output;
pub mod pattern;
pub mod phases;
pub mod resource;
pub mod suggestions;

#[cfg(test)]
mod pattern_proptest;
