//! # Configuration Schema and Parsing
//!
//! This module defines the structures behind `.library-sync.yaml` and the
//! logic for loading it.
//!
//! ## Key Components
//!
//! - **`ProjectConfig`**: The whole file. Only `resources:` drives selection;
//!   `version` and `library_path` are informational and locational.
//!
//! - **`ResourceSelection`**: One optional [`SelectionRule`] per
//!   [`ResourceCategory`]. A category without a rule selects everything,
//!   which keeps configurations written before resource selection existed
//!   working unchanged. This is expressed with `Option`, so it can never be
//!   confused with a rule whose `include` list is empty (which selects
//!   nothing).
//!
//! - **`SelectionRule`**: The `include` / `exclude` pattern lists for a
//!   category.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//! library_path: ./library
//! resources:
//!   prompts:
//!     include: ["code-*", "testing/*"]
//!     exclude: ["testing/experimental/*"]
//!   templates:
//!     include: ["nextjs-app"]
//! ```
//!
//! ## Layering
//!
//! A global configuration (see [`crate::defaults::global_config_path`]) may
//! provide defaults. [`load`] merges the project file over it: scalar fields
//! from the project win when set, and per category a non-empty `include` or
//! `exclude` list in the project replaces the global one.

use crate::error::{Error, Result};
use crate::resource::ResourceCategory;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Include/exclude patterns for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionRule {
    /// Patterns selecting resources. Empty means nothing is selected.
    #[serde(default)]
    pub include: Vec<String>,
    /// Patterns removing resources. These always win over `include`.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl SelectionRule {
    pub fn new<I, E, S>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Reject structurally invalid rules.
    pub fn validate(&self, category: ResourceCategory) -> Result<()> {
        for (side, patterns) in [("include", &self.include), ("exclude", &self.exclude)] {
            if patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::ConfigParse {
                    message: format!("empty pattern in resources.{}.{}", category, side),
                    hint: Some(
                        "Remove the empty entry, or use \"*\" to select everything".to_string(),
                    ),
                });
            }
        }
        Ok(())
    }

    /// Merge `override_rule` over `self`: each non-empty list replaces the
    /// corresponding base list.
    pub fn merged_with(&self, override_rule: &SelectionRule) -> SelectionRule {
        SelectionRule {
            include: if override_rule.include.is_empty() {
                self.include.clone()
            } else {
                override_rule.include.clone()
            },
            exclude: if override_rule.exclude.is_empty() {
                self.exclude.clone()
            } else {
                override_rule.exclude.clone()
            },
        }
    }
}

/// The `resources:` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSelection {
    rules: BTreeMap<ResourceCategory, SelectionRule>,
}

impl ResourceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper, mostly for tests and programmatic use.
    pub fn with_rule(mut self, category: ResourceCategory, rule: SelectionRule) -> Self {
        self.rules.insert(category, rule);
        self
    }

    /// The rule for `category`, or `None` when everything is selected.
    pub fn rule_for(&self, category: ResourceCategory) -> Option<&SelectionRule> {
        self.rules.get(&category)
    }

    /// Categories with an explicit rule, in canonical order.
    pub fn categories(&self) -> impl Iterator<Item = ResourceCategory> + '_ {
        self.rules.keys().copied()
    }

    pub fn validate(&self) -> Result<()> {
        for (category, rule) in &self.rules {
            rule.validate(*category)?;
        }
        Ok(())
    }

    /// Merge two optional selections, `override_sel` taking precedence.
    pub fn merge(
        base: Option<&ResourceSelection>,
        override_sel: Option<&ResourceSelection>,
    ) -> Option<ResourceSelection> {
        match (base, override_sel) {
            (None, None) => None,
            (Some(base), None) => Some(base.clone()),
            (None, Some(over)) => Some(over.clone()),
            (Some(base), Some(over)) => {
                let mut rules = base.rules.clone();
                for (category, rule) in &over.rules {
                    let merged = match rules.get(category) {
                        Some(existing) => existing.merged_with(rule),
                        None => rule.clone(),
                    };
                    rules.insert(*category, merged);
                }
                Some(ResourceSelection { rules })
            }
        }
    }
}

/// A parsed `.library-sync.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Schema version, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Library root, relative to the directory holding the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,
    /// Resource selection rules. Absent means "select everything".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceSelection>,
}

impl ProjectConfig {
    /// Layer `project` over `self`.
    pub fn merged_with(&self, project: &ProjectConfig) -> ProjectConfig {
        ProjectConfig {
            version: project.version.clone().or_else(|| self.version.clone()),
            library_path: project
                .library_path
                .clone()
                .or_else(|| self.library_path.clone()),
            resources: ResourceSelection::merge(self.resources.as_ref(), project.resources.as_ref()),
        }
    }

    /// Resolve the library root for a config file living in `config_dir`.
    pub fn library_root(&self, config_dir: &Path) -> PathBuf {
        match &self.library_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => config_dir.join(path),
            None => crate::defaults::default_library_path(config_dir),
        }
    }
}

/// Parse a YAML string into a [`ProjectConfig`].
///
/// An empty document yields the default configuration.
pub fn parse(yaml_content: &str) -> Result<ProjectConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }

    let config: ProjectConfig =
        serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(format!(
                "Each entry under `resources:` must be one of {} with `include`/`exclude` lists",
                ResourceCategory::ALL.map(|c| c.as_str()).join(", ")
            )),
        })?;

    if let Some(resources) = &config.resources {
        resources.validate()?;
    }

    Ok(config)
}

/// Read and parse a configuration file.
pub fn from_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Load the project configuration, layered over the global one when it
/// exists.
pub fn load(project_path: &Path, global_path: Option<&Path>) -> Result<ProjectConfig> {
    let project = from_file(project_path)?;

    match global_path {
        Some(global) if global.is_file() => {
            debug!("Merging global configuration from {}", global.display());
            let base = from_file(global)?;
            Ok(base.merged_with(&project))
        }
        _ => Ok(project),
    }
}
