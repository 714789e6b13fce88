//! Implementation of the resource selection pipeline.
//!
//! ## Overview
//!
//! Selection runs in four phases over an immutable library snapshot:
//! 1. Filtering - Apply each category's include/exclude rule to its paths
//! 2. Dependency Expansion - Add everything selected resources depend on
//! 3. Validation - Flag patterns that match nothing and missing literals
//! 4. Reporting - Group records into a `StructuredSelection` for renderers
//!
//! The orchestrator wires these together. Every phase is a pure function of
//! its inputs: nothing here touches the filesystem, and nothing here fails.
//! Problems with the configuration surface as warnings in the report, and
//! the caller decides whether they are fatal.

pub mod dependencies;
pub mod filter;
pub mod orchestrator;
pub mod report;
pub mod validation;

// Phase aliases, in pipeline order
pub use dependencies as phase2;
pub use filter as phase1;
pub use report as phase4;
pub use validation as phase3;
