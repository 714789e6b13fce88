//! Runs the selection phases in order.

use log::debug;
use std::collections::BTreeSet;

use crate::config::ResourceSelection;
use crate::library::LibrarySnapshot;
use crate::phases::report::StructuredSelection;
use crate::phases::{phase1, phase2, phase3, phase4};
use crate::resource::ResourceCategory;

/// Select resources from `snapshot` according to `selection`.
///
/// `None` (no `resources:` section at all) selects everything. Categories are
/// processed if the library has entries for them or the configuration has a
/// rule for them, so patterns for an empty category still get validated.
pub fn execute(
    selection: Option<&ResourceSelection>,
    snapshot: &LibrarySnapshot,
    graph: &phase2::DependencyGraph,
) -> StructuredSelection {
    let mut categories: BTreeSet<ResourceCategory> = snapshot.categories().collect();
    if let Some(selection) = selection {
        categories.extend(selection.categories());
    }

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for category in categories {
        let paths = snapshot.paths(category);
        let rule = selection.and_then(|s| s.rule_for(category));

        // Phase 1: Filter
        let outcome = phase1::filter(rule, paths);
        debug!(
            "{}: {} of {} selected by rule",
            category,
            outcome.selected().len(),
            paths.len()
        );

        // Phase 3 (per category): Validate patterns against the snapshot
        if let Some(rule) = rule {
            warnings.extend(phase3::validate(category, rule, paths));
        }

        records.extend(outcome.into_records());
    }

    // Phase 2: Expand dependencies
    let records = phase2::expand(records, graph);
    warnings.extend(phase3::unresolved_warnings(&records, graph));

    // Phase 4: Report
    phase4::report(&records, warnings)
}
