//! Core resource types shared by the selection pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pattern::normalize_path;

/// The top-level resource kinds of a library.
///
/// The declaration order is the canonical order used for every
/// per-category iteration and for report output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Prompts,
    Templates,
    Patterns,
    Configs,
    Scripts,
    Workflows,
}

impl ResourceCategory {
    /// Every category, in canonical order.
    pub const ALL: [ResourceCategory; 6] = [
        ResourceCategory::Prompts,
        ResourceCategory::Templates,
        ResourceCategory::Patterns,
        ResourceCategory::Configs,
        ResourceCategory::Scripts,
        ResourceCategory::Workflows,
    ];

    /// Directory name of this category under the library root.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceCategory::Prompts => "prompts",
            ResourceCategory::Templates => "templates",
            ResourceCategory::Patterns => "patterns",
            ResourceCategory::Configs => "configs",
            ResourceCategory::Scripts => "scripts",
            ResourceCategory::Workflows => "workflows",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown resource category `{}` (expected one of: {})",
                    s,
                    ResourceCategory::ALL.map(|c| c.as_str()).join(", ")
                )
            })
    }
}

/// A normalized, category-scoped path to a library resource.
///
/// `relative` never contains empty segments or host separators, so it can
/// be fed to the pattern matcher as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LibraryPath {
    pub category: ResourceCategory,
    pub relative: String,
}

impl LibraryPath {
    pub fn new(category: ResourceCategory, relative: &str) -> Self {
        Self {
            category,
            relative: normalize_path(relative),
        }
    }

    /// A path nested below this one in the same category.
    pub fn join(&self, rest: &str) -> Self {
        Self::new(self.category, &format!("{}/{}", self.relative, rest))
    }

    /// Last segment of the relative path.
    pub fn file_name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(&self.relative)
    }

    /// Relative path of the containing directory, empty at category level.
    pub fn parent(&self) -> &str {
        self.relative
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .unwrap_or("")
    }
}

impl fmt::Display for LibraryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.relative)
    }
}

impl Serialize for LibraryPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a record ended up included or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Reason {
    /// An include pattern matched and no exclude pattern did.
    MatchedInclude { pattern: String },
    /// The category has no rule, so everything is selected.
    SelectedByDefault,
    /// An exclude pattern matched.
    ExcludedByRule { pattern: String },
    /// Pulled in because a selected resource declares it as a dependency.
    DependencyOf { origin: LibraryPath },
    /// Nothing in the include list matched.
    Unmatched,
}

/// One resource as seen by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    pub path: LibraryPath,
    pub included: bool,
    pub reason: Reason,
}

impl ResourceRecord {
    pub fn included(path: LibraryPath, reason: Reason) -> Self {
        Self {
            path,
            included: true,
            reason,
        }
    }

    pub fn not_included(path: LibraryPath, reason: Reason) -> Self {
        Self {
            path,
            included: false,
            reason,
        }
    }

    pub fn category(&self) -> ResourceCategory {
        self.path.category
    }

    pub fn is_excluded_by_rule(&self) -> bool {
        matches!(self.reason, Reason::ExcludedByRule { .. })
    }
}
