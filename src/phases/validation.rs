//! Phase 3: Validation
//!
//! Cross-checks a category's include patterns against what the library
//! actually contains. Everything produced here is advisory: a [`Warning`]
//! never changes the selection, and callers choose whether to treat them as
//! fatal (`validate --strict`) or informational (`list`, `preview`).

use serde::Serialize;
use std::fmt;

use crate::config::SelectionRule;
use crate::pattern::{Pattern, PatternSet};
use crate::phases::dependencies::DependencyGraph;
use crate::resource::{LibraryPath, ResourceCategory, ResourceRecord};

/// What is wrong with a pattern or reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WarningKind {
    /// A literal include names a path the library does not have.
    NotFound,
    /// A wildcard include matches nothing.
    NoMatches,
    /// An include matches paths, but the exclude list removes all of them.
    FullyExcluded,
    /// A selected resource depends on something the library does not have.
    UnresolvedDependency { origin: LibraryPath },
}

/// An advisory finding about the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub category: ResourceCategory,
    /// The offending include pattern, or the dependency name as declared.
    pub pattern: String,
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl Warning {
    pub fn new(category: ResourceCategory, pattern: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            category,
            pattern: pattern.into(),
            kind,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::NotFound => write!(
                f,
                "{}: '{}' not found in library",
                self.category, self.pattern
            ),
            WarningKind::NoMatches => write!(
                f,
                "{}: pattern '{}' matches no resources",
                self.category, self.pattern
            ),
            WarningKind::FullyExcluded => write!(
                f,
                "{}: everything matched by '{}' is excluded",
                self.category, self.pattern
            ),
            WarningKind::UnresolvedDependency { origin } => write!(
                f,
                "{}: dependency '{}' of {} not found in library",
                self.category, self.pattern, origin
            ),
        }
    }
}

/// Check every include pattern of `rule` against `paths`.
///
/// Warnings come out in include-list order, at most one per pattern.
pub fn validate(
    category: ResourceCategory,
    rule: &SelectionRule,
    paths: &[LibraryPath],
) -> Vec<Warning> {
    let exclude = PatternSet::new(&rule.exclude);

    rule.include
        .iter()
        .filter_map(|source| {
            let pattern = Pattern::new(source);
            let matched: Vec<&LibraryPath> = paths
                .iter()
                .filter(|path| pattern.matches(&path.relative))
                .collect();

            let kind = if matched.is_empty() {
                if pattern.is_literal() {
                    WarningKind::NotFound
                } else {
                    WarningKind::NoMatches
                }
            } else if matched
                .iter()
                .all(|path| exclude.first_match(&path.relative).is_some())
            {
                WarningKind::FullyExcluded
            } else {
                return None;
            };

            Some(Warning::new(category, source.as_str(), kind))
        })
        .collect()
}

/// Warnings for unresolved dependencies of resources that ended up selected.
pub fn unresolved_warnings(records: &[ResourceRecord], graph: &DependencyGraph) -> Vec<Warning> {
    graph
        .unresolved()
        .iter()
        .filter(|missing| {
            records
                .iter()
                .any(|record| record.included && record.path == missing.origin)
        })
        .map(|missing| {
            Warning::new(
                missing.reference.category,
                missing.reference.name.as_str(),
                WarningKind::UnresolvedDependency {
                    origin: missing.origin.clone(),
                },
            )
        })
        .collect()
}
