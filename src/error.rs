//! # Error Handling
//!
//! This module defines the centralized error type for `library-sync`. It uses
//! `thiserror` to build a single `Error` enum covering every failure mode of
//! the configuration loader and the library scanner.
//!
//! ## Key Components
//!
//! - **`Error`**: All fatal errors. Each variant carries enough context to
//!   produce a useful message on its own.
//! - **`Result<T>`**: Alias for `std::result::Result<T, Error>`.
//!
//! Note that the selection engine itself never returns an error. Patterns
//! that match nothing, missing literal entries and unresolved dependencies
//! are reported as [`crate::phases::validation::Warning`] values so callers
//! can decide how strict to be. Only malformed configuration and I/O
//! problems end up here.

use thiserror::Error;

/// Main error type for library-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file is structurally invalid.
    ///
    /// Covers YAML that does not fit the schema, unknown resource
    /// categories and empty selection patterns.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The library root is missing or unusable.
    #[error("Library error: {message}")]
    Library { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An error while walking the library directory tree.
    #[error("Library scan error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An error occurred during serialization.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
