//! # Library Snapshot
//!
//! Enumerates the resources of a library once per invocation so the
//! selection pipeline can work on an immutable, in-memory view.
//!
//! A library is a directory with one sub-directory per
//! [`ResourceCategory`]:
//!
//! ```text
//! library/
//! ├── prompts/code-review.md
//! ├── templates/nextjs-app/meta.yml
//! ├── patterns/auth/oauth.md
//! └── configs/eslint-config.json
//! ```
//!
//! Both files and directories become entries. Entries are ordered by a
//! depth-first walk with siblings sorted by name, which makes every
//! downstream result deterministic. Hidden entries (names starting with `.`)
//! are skipped.
//!
//! Directory resources may carry a `meta.yml` (or `meta.yaml`) manifest
//! declaring dependencies on other resources; see [`load_dependencies`].

use log::{debug, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::phases::dependencies::{DependencyDeclaration, DependencyRef};
use crate::resource::{LibraryPath, ResourceCategory};

/// Manifest file names looked up inside directory resources, in order.
pub const MANIFEST_FILENAMES: [&str; 2] = ["meta.yml", "meta.yaml"];

/// Read-only list of every resource path available in a library.
#[derive(Debug, Clone, Default)]
pub struct LibrarySnapshot {
    entries: BTreeMap<ResourceCategory, Vec<LibraryPath>>,
    directories: HashSet<LibraryPath>,
    known: HashSet<LibraryPath>,
}

impl LibrarySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicates are ignored so insertion order stays
    /// that of the first occurrence.
    pub fn push(&mut self, path: LibraryPath, is_dir: bool) {
        if !self.known.insert(path.clone()) {
            return;
        }
        if is_dir {
            self.directories.insert(path.clone());
        }
        self.entries.entry(path.category).or_default().push(path);
    }

    /// Build a snapshot of plain file entries for one category.
    pub fn from_files<I, S>(category: ResourceCategory, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut snapshot = Self::new();
        snapshot.extend_files(category, paths);
        snapshot
    }

    /// Append plain file entries for one category.
    pub fn extend_files<I, S>(&mut self, category: ResourceCategory, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.push(LibraryPath::new(category, path.as_ref()), false);
        }
    }

    /// Walk `root` and collect every category directory found under it.
    pub fn scan(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::Library {
                message: format!("library root {} does not exist", root.display()),
            });
        }

        let mut snapshot = Self::new();
        for category in ResourceCategory::ALL {
            let category_dir = root.join(category.as_str());
            if !category_dir.is_dir() {
                continue;
            }

            let walker = WalkDir::new(&category_dir)
                .min_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !is_hidden(entry.file_name().to_string_lossy().as_ref()));

            for entry in walker {
                let entry = entry?;
                let relative = relative_string(&category_dir, entry.path());
                snapshot.push(
                    LibraryPath::new(category, &relative),
                    entry.file_type().is_dir(),
                );
            }
            debug!(
                "Scanned {} entries in {}",
                snapshot.paths(category).len(),
                category_dir.display()
            );
        }

        Ok(snapshot)
    }

    /// Entries of one category, in snapshot order.
    pub fn paths(&self, category: ResourceCategory) -> &[LibraryPath] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Categories with at least one entry, in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = ResourceCategory> + '_ {
        self.entries.keys().copied()
    }

    pub fn contains(&self, path: &LibraryPath) -> bool {
        self.known.contains(path)
    }

    pub fn is_dir(&self, path: &LibraryPath) -> bool {
        self.directories.contains(path)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Absolute location of a snapshot entry under `root`.
    pub fn resolve(root: &Path, path: &LibraryPath) -> PathBuf {
        let mut full = root.join(path.category.as_str());
        for segment in path.relative.split('/') {
            full.push(segment);
        }
        full
    }
}

/// Contents of a resource manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceManifest {
    /// Referenced resources, by category. Other keys are ignored.
    #[serde(default)]
    pub dependencies: BTreeMap<ResourceCategory, Vec<String>>,
}

impl ResourceManifest {
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn into_refs(self) -> Vec<DependencyRef> {
        self.dependencies
            .into_iter()
            .flat_map(|(category, names)| {
                names
                    .into_iter()
                    .map(move |name| DependencyRef::new(category, &name))
            })
            .collect()
    }
}

/// Read the manifests of every directory resource in `snapshot`.
///
/// Unreadable or malformed manifests are logged and skipped; they never
/// abort the listing.
pub fn load_dependencies(root: &Path, snapshot: &LibrarySnapshot) -> Vec<DependencyDeclaration> {
    let mut declarations = Vec::new();

    for category in snapshot.categories() {
        for path in snapshot.paths(category) {
            if !snapshot.is_dir(path) {
                continue;
            }

            let dir = LibrarySnapshot::resolve(root, path);
            let Some(manifest_path) = MANIFEST_FILENAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
            else {
                continue;
            };

            let manifest = std::fs::read_to_string(&manifest_path)
                .map_err(Error::from)
                .and_then(|content| ResourceManifest::parse(&content));

            match manifest {
                Ok(manifest) => {
                    let requires = manifest.into_refs();
                    if !requires.is_empty() {
                        debug!("{} declares {} dependencies", path, requires.len());
                        declarations.push(DependencyDeclaration {
                            origin: path.clone(),
                            requires,
                        });
                    }
                }
                Err(e) => {
                    warn!(
                        "Skipping manifest {}: {}",
                        manifest_path.display(),
                        e
                    );
                }
            }
        }
    }

    declarations
}

/// Names starting with `.` are never library entries.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// `path` relative to `base`, joined with `/`.
pub fn relative_string(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_collects_files_and_directories_in_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "patterns/logging.md", "log");
        write(root, "patterns/auth/oauth.md", "oauth");
        write(root, "patterns/auth/jwt.md", "jwt");
        write(root, "prompts/code-review.md", "review");
        write(root, "prompts/.hidden.md", "nope");
        fs::create_dir_all(root.join("unrelated")).unwrap();

        let snapshot = LibrarySnapshot::scan(root).unwrap();

        let patterns: Vec<_> = snapshot
            .paths(ResourceCategory::Patterns)
            .iter()
            .map(|p| p.relative.as_str())
            .collect();
        assert_eq!(
            patterns,
            vec!["auth", "auth/jwt.md", "auth/oauth.md", "logging.md"]
        );
        assert!(snapshot.is_dir(&LibraryPath::new(ResourceCategory::Patterns, "auth")));
        assert!(!snapshot.is_dir(&LibraryPath::new(ResourceCategory::Patterns, "logging.md")));

        let prompts = snapshot.paths(ResourceCategory::Prompts);
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            snapshot.categories().collect::<Vec<_>>(),
            vec![ResourceCategory::Prompts, ResourceCategory::Patterns]
        );
        assert_eq!(snapshot.len(), 5);
    }

    #[test]
    fn test_scan_missing_root() {
        let err = LibrarySnapshot::scan(Path::new("/nonexistent/library")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_empty_library_yields_empty_snapshot() {
        let temp = TempDir::new().unwrap();
        let snapshot = LibrarySnapshot::scan(temp.path()).unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.paths(ResourceCategory::Prompts).is_empty());
    }

    #[test]
    fn test_push_ignores_duplicates() {
        let mut snapshot = LibrarySnapshot::from_files(ResourceCategory::Prompts, ["a.md", "b.md"]);
        snapshot.push(LibraryPath::new(ResourceCategory::Prompts, "./a.md"), false);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.paths(ResourceCategory::Prompts)[0].relative, "a.md");
    }

    #[test]
    fn test_resolve_builds_host_path() {
        let path = LibraryPath::new(ResourceCategory::Patterns, "auth/oauth.md");
        let full = LibrarySnapshot::resolve(Path::new("/lib"), &path);
        assert_eq!(full, Path::new("/lib").join("patterns").join("auth").join("oauth.md"));
    }

    #[test]
    fn test_load_dependencies_reads_directory_manifests() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            "templates/nextjs-app/meta.yml",
            r#"name: "NextJS Application"
description: "Full-featured NextJS application template"
dependencies:
  configs:
    - "eslint-config"
    - "prettier-config"
  patterns:
    - "react-patterns"
"#,
        );
        write(root, "templates/plain/README.md", "no manifest");
        write(root, "configs/eslint-config.json", "{}");

        let snapshot = LibrarySnapshot::scan(root).unwrap();
        let declarations = load_dependencies(root, &snapshot);

        assert_eq!(declarations.len(), 1);
        let decl = &declarations[0];
        assert_eq!(decl.origin.to_string(), "templates/nextjs-app");
        let refs: Vec<String> = decl.requires.iter().map(|r| r.to_string()).collect();
        assert_eq!(
            refs,
            vec![
                "patterns/react-patterns",
                "configs/eslint-config",
                "configs/prettier-config"
            ]
        );
    }

    #[test]
    fn test_malformed_manifest_is_skipped() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "templates/broken/meta.yaml", "dependencies: [unclosed");
        write(root, "templates/odd/meta.yml", "dependencies:\n  snippets: [\"x\"]\n");

        testing_logger::setup();
        let snapshot = LibrarySnapshot::scan(root).unwrap();
        assert!(load_dependencies(root, &snapshot).is_empty());

        testing_logger::validate(|captured| {
            let warnings: Vec<_> = captured
                .iter()
                .filter(|entry| entry.level == log::Level::Warn)
                .collect();
            assert_eq!(warnings.len(), 2);
            assert!(warnings
                .iter()
                .all(|entry| entry.body.starts_with("Skipping manifest")));
        });
    }

    #[test]
    fn test_manifest_parse_empty() {
        let manifest = ResourceManifest::parse("").unwrap();
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn test_manifest_descriptive_keys_are_ignored() {
        let manifest = ResourceManifest::parse(
            "name: \"NextJS Application\"\ndescription: \"App template\"\nversion: 2\ndependencies:\n  configs: [\"eslint-config\"]\n",
        )
        .unwrap();
        assert_eq!(
            manifest.dependencies.get(&ResourceCategory::Configs),
            Some(&vec!["eslint-config".to_string()])
        );
    }

    #[test]
    fn test_relative_string_uses_forward_slashes() {
        let base = Path::new("/lib/templates/app");
        assert_eq!(relative_string(base, &base.join("src").join("main.ts")), "src/main.ts");
        assert_eq!(relative_string(base, base), "");
        assert!(is_hidden(".git"));
        assert!(!is_hidden("meta.yml"));
    }
}
