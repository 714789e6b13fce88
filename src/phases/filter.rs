//! Phase 1: Filtering
//!
//! Applies one category's [`SelectionRule`] to every path of that category
//! in the snapshot and classifies each path:
//!
//! - no rule configured: included, [`Reason::SelectedByDefault`];
//! - an exclude pattern matches: not included, [`Reason::ExcludedByRule`];
//! - an include pattern matches: included, [`Reason::MatchedInclude`];
//! - otherwise: not included, [`Reason::Unmatched`].
//!
//! Exclude is checked before include, so it always wins. An empty include
//! list matches nothing. Each path is judged on its own; selecting a
//! directory says nothing about its children. Output preserves snapshot
//! order.

use log::trace;

use crate::config::SelectionRule;
use crate::pattern::{Pattern, PatternSet};
use crate::resource::{LibraryPath, Reason, ResourceRecord};

/// Classification of every path of one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub records: Vec<ResourceRecord>,
}

impl FilterOutcome {
    /// Included paths, in snapshot order.
    pub fn selected(&self) -> Vec<&LibraryPath> {
        self.records
            .iter()
            .filter(|r| r.included)
            .map(|r| &r.path)
            .collect()
    }

    /// Paths removed by an exclude pattern, in snapshot order.
    pub fn excluded(&self) -> Vec<&LibraryPath> {
        self.records
            .iter()
            .filter(|r| r.is_excluded_by_rule())
            .map(|r| &r.path)
            .collect()
    }

    pub fn into_records(self) -> Vec<ResourceRecord> {
        self.records
    }
}

/// Filter `paths` with `rule`. `None` selects every path.
pub fn filter(rule: Option<&SelectionRule>, paths: &[LibraryPath]) -> FilterOutcome {
    let Some(rule) = rule else {
        return FilterOutcome {
            records: paths
                .iter()
                .map(|path| ResourceRecord::included(path.clone(), Reason::SelectedByDefault))
                .collect(),
        };
    };

    let include = PatternSet::new(&rule.include);
    let exclude = PatternSet::new(&rule.exclude);

    let records = paths
        .iter()
        .map(|path| {
            let record = classify(&include, &exclude, path);
            trace!("{} -> {:?}", path, record.reason);
            record
        })
        .collect();

    FilterOutcome { records }
}

fn classify(include: &PatternSet, exclude: &PatternSet, path: &LibraryPath) -> ResourceRecord {
    if let Some(pattern) = exclude.first_match(&path.relative) {
        return ResourceRecord::not_included(
            path.clone(),
            Reason::ExcludedByRule {
                pattern: pattern.as_str().to_string(),
            },
        );
    }

    match include.first_match(&path.relative).map(Pattern::as_str) {
        Some(pattern) => ResourceRecord::included(
            path.clone(),
            Reason::MatchedInclude {
                pattern: pattern.to_string(),
            },
        ),
        None => ResourceRecord::not_included(path.clone(), Reason::Unmatched),
    }
}
