//! Phase 4: Reporting
//!
//! Groups the expanded records by category and counts them. The resulting
//! [`StructuredSelection`] is the only thing presentation code (`list`,
//! `preview`, `validate`, `apply`) sees of the engine, so it carries
//! everything they render and nothing they would have to recompute.
//!
//! No matching happens here. Ordering is taken from the records, which the
//! earlier phases keep in snapshot order, so equal inputs give byte-identical
//! JSON.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::phases::validation::{Warning, WarningKind};
use crate::resource::{LibraryPath, Reason, ResourceCategory, ResourceRecord};

/// A path removed by an exclude pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedEntry {
    pub path: String,
    pub pattern: String,
}

/// A path selected only because something else needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEntry {
    pub path: String,
    pub required_by: LibraryPath,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionCounts {
    pub selected: usize,
    pub excluded: usize,
    pub unmatched: usize,
    pub dependencies: usize,
}

/// Selection result for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySelection {
    pub category: ResourceCategory,
    /// Every included relative path, dependencies among them.
    pub selected: Vec<String>,
    pub excluded_explicitly: Vec<ExcludedEntry>,
    pub dependencies: Vec<DependencyEntry>,
    pub counts: SelectionCounts,
}

impl CategorySelection {
    fn new(category: ResourceCategory) -> Self {
        Self {
            category,
            selected: Vec::new(),
            excluded_explicitly: Vec::new(),
            dependencies: Vec::new(),
            counts: SelectionCounts::default(),
        }
    }

    fn add(&mut self, record: &ResourceRecord) {
        let relative = record.path.relative.clone();
        if record.included {
            if let Reason::DependencyOf { origin } = &record.reason {
                self.dependencies.push(DependencyEntry {
                    path: relative.clone(),
                    required_by: origin.clone(),
                });
                self.counts.dependencies += 1;
            }
            self.selected.push(relative);
            self.counts.selected += 1;
            return;
        }

        match &record.reason {
            Reason::ExcludedByRule { pattern } => {
                self.excluded_explicitly.push(ExcludedEntry {
                    path: relative,
                    pattern: pattern.clone(),
                });
                self.counts.excluded += 1;
            }
            _ => self.counts.unmatched += 1,
        }
    }
}

/// The engine's final answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredSelection {
    pub categories: Vec<CategorySelection>,
    pub warnings: Vec<Warning>,
}

impl StructuredSelection {
    pub fn total_selected(&self) -> usize {
        self.categories.iter().map(|c| c.counts.selected).sum()
    }

    pub fn category(&self, category: ResourceCategory) -> Option<&CategorySelection> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Selected resources across all categories, for the apply step.
    pub fn selected_paths(&self) -> Vec<LibraryPath> {
        self.categories
            .iter()
            .flat_map(|c| {
                c.selected
                    .iter()
                    .map(move |relative| LibraryPath::new(c.category, relative))
            })
            .collect()
    }

    /// Paths removed by an exclude pattern, across all categories.
    pub fn excluded_paths(&self) -> Vec<LibraryPath> {
        self.categories
            .iter()
            .flat_map(|c| {
                c.excluded_explicitly
                    .iter()
                    .map(move |entry| LibraryPath::new(c.category, &entry.path))
            })
            .collect()
    }

    /// Pretty-printed JSON, as emitted by `list --json`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization {
            message: e.to_string(),
        })
    }

    /// Narrow the report to one category plus the resources it pulled in
    /// from other categories through dependencies.
    ///
    /// Other categories keep only those dependency entries. Warnings are
    /// kept when they concern the category or an unresolved dependency of
    /// something it reached.
    pub fn only(self, category: ResourceCategory) -> StructuredSelection {
        let mut reached: HashSet<LibraryPath> = self
            .category(category)
            .map(|c| {
                c.selected
                    .iter()
                    .map(|relative| LibraryPath::new(category, relative))
                    .collect()
            })
            .unwrap_or_default();

        loop {
            let before = reached.len();
            for selection in &self.categories {
                for dependency in &selection.dependencies {
                    if reached.contains(&dependency.required_by) {
                        reached.insert(LibraryPath::new(selection.category, &dependency.path));
                    }
                }
            }
            if reached.len() == before {
                break;
            }
        }

        let categories = self
            .categories
            .into_iter()
            .filter_map(|selection| {
                if selection.category == category {
                    return Some(selection);
                }
                let dependencies: Vec<DependencyEntry> = selection
                    .dependencies
                    .into_iter()
                    .filter(|d| {
                        reached.contains(&LibraryPath::new(selection.category, &d.path))
                    })
                    .collect();
                if dependencies.is_empty() {
                    return None;
                }
                let selected: Vec<String> = dependencies.iter().map(|d| d.path.clone()).collect();
                Some(CategorySelection {
                    category: selection.category,
                    counts: SelectionCounts {
                        selected: selected.len(),
                        dependencies: dependencies.len(),
                        ..SelectionCounts::default()
                    },
                    selected,
                    excluded_explicitly: Vec::new(),
                    dependencies,
                })
            })
            .collect();

        let warnings = self
            .warnings
            .into_iter()
            .filter(|w| match &w.kind {
                WarningKind::UnresolvedDependency { origin } => {
                    w.category == category || reached.contains(origin)
                }
                _ => w.category == category,
            })
            .collect();

        StructuredSelection {
            categories,
            warnings,
        }
    }
}

/// Group `records` by category and attach `warnings`.
pub fn report(records: &[ResourceRecord], warnings: Vec<Warning>) -> StructuredSelection {
    let mut categories: Vec<CategorySelection> = Vec::new();

    for category in ResourceCategory::ALL {
        let mut selection = CategorySelection::new(category);
        let mut seen = false;
        for record in records.iter().filter(|r| r.category() == category) {
            selection.add(record);
            seen = true;
        }
        if seen {
            categories.push(selection);
        }
    }

    StructuredSelection {
        categories,
        warnings,
    }
}
