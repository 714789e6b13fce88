//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_sample_library().with_config(configs::SELECT_ALL);
//!     fixture.command().arg("list").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// No `resources:` section: everything is selected.
    pub const SELECT_ALL: &str = "version: \"1.0\"\nlibrary_path: library\n";

    /// Include/exclude rules for prompts and patterns.
    pub const WITH_RULES: &str = r#"
version: "1.0"
library_path: library
resources:
  prompts:
    include: ["code-*", "testing/*"]
    exclude: ["code-legacy.md", "testing/experimental/*"]
  patterns:
    include: ["auth/*"]
    exclude: ["auth/legacy/*"]
  configs:
    include: []
"#;

    /// Rules producing one `NotFound` and one `NoMatches` warning.
    pub const WITH_WARNINGS: &str = r#"
library_path: library
resources:
  prompts:
    include: ["code-review.md", "nonexistent-prompt", "missing-*"]
"#;

    /// Rules whose patterns all resolve.
    pub const CLEAN: &str = r#"
library_path: library
resources:
  prompts:
    include: ["code-review.md"]
"#;

    /// Unknown category name.
    pub const UNKNOWN_CATEGORY: &str = r#"
library_path: library
resources:
  snippets:
    include: ["*"]
"#;
}

/// Files of the sample library, relative to the fixture root.
pub const SAMPLE_LIBRARY: &[(&str, &str)] = &[
    ("library/prompts/code-review.md", "# Code review\n"),
    ("library/prompts/code-legacy.md", "# Legacy review\n"),
    ("library/prompts/deployment.md", "# Deployment\n"),
    ("library/prompts/testing/unit.md", "# Unit tests\n"),
    ("library/prompts/testing/experimental/fuzz.md", "# Fuzzing\n"),
    ("library/patterns/auth/oauth.md", "# OAuth\n"),
    ("library/patterns/auth/legacy/basic.md", "# Basic auth\n"),
    ("library/patterns/logging.md", "# Logging\n"),
    ("library/configs/eslint-config.json", "{\"root\": true}\n"),
    ("library/configs/prettier-config.json", "{}\n"),
    (
        "library/templates/nextjs-app/meta.yml",
        "name: \"NextJS Application\"\ndependencies:\n  configs:\n    - \"eslint-config\"\n",
    ),
    ("library/templates/nextjs-app/package.json", "{}\n"),
];

/// A temporary project directory with a library and a config file.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Populate `library/` with [`SAMPLE_LIBRARY`].
    pub fn with_sample_library(self) -> Self {
        SAMPLE_LIBRARY
            .iter()
            .fold(self, |fixture, (path, content)| fixture.with_file(path, content))
    }

    /// Add a `.library-sync.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child(".library-sync.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(".library-sync.yaml")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture's directory.
    ///
    /// The global config is pointed at a file that does not exist so the
    /// developer's own configuration never leaks into tests, and colors are
    /// disabled for stable output.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("library-sync");
        cmd.current_dir(self.path())
            .env("LIBRARY_SYNC_GLOBAL_CONFIG", self.path().join("no-global.yaml"))
            .env_remove("LIBRARY_SYNC_CONFIG")
            .env_remove("LIBRARY_SYNC_LIBRARY")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
