//! Property-based tests for pattern matching and selection.
//!
//! These tests use proptest to generate random paths and rules and verify
//! that the engine's invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::config::SelectionRule;
    use crate::library::LibrarySnapshot;
    use crate::pattern::{matches, normalize_path, Pattern};
    use crate::phases::dependencies::{expand, DependencyGraph};
    use crate::phases::filter::filter;
    use crate::phases::orchestrator;
    use crate::resource::{LibraryPath, Reason, ResourceCategory, ResourceRecord};
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[a-z0-9][a-z0-9._-]{0,7}"
    }

    fn rel_path() -> impl Strategy<Value = String> {
        prop::collection::vec(segment(), 1..4).prop_map(|parts| parts.join("/"))
    }

    fn paths() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(rel_path(), 0..12)
    }

    // ============================================================================
    // Pattern matcher properties
    // ============================================================================

    proptest! {
        /// Property: matching never panics, whatever the input
        #[test]
        fn matches_is_total(pattern in ".*", path in ".*") {
            let _ = matches(&pattern, &path);
        }

        /// Property: a wildcard-free pattern matches exactly its own path
        #[test]
        fn literal_matches_itself_only(a in rel_path(), b in rel_path()) {
            prop_assert!(matches(&a, &a));
            prop_assert_eq!(matches(&a, &b), a == b);
        }

        /// Property: a bare `*` matches every path
        #[test]
        fn bare_star_matches_everything(path in rel_path()) {
            prop_assert!(matches("*", &path));
        }

        /// Property: `prefix/*` matches everything below prefix
        #[test]
        fn trailing_star_spans_segments(prefix in rel_path(), rest in rel_path()) {
            let pattern = format!("{}/*", prefix);
            let path = format!("{}/{}", prefix, rest);
            prop_assert!(matches(&pattern, &path));
        }

        /// Property: normalization is idempotent
        #[test]
        fn normalize_is_idempotent(path in "[a-z/\\\\.]{0,20}") {
            let once = normalize_path(&path);
            prop_assert_eq!(normalize_path(&once), once.clone());
        }

        /// Property: host separators never change the outcome
        #[test]
        fn backslashes_match_like_slashes(path in rel_path()) {
            let windows = path.replace('/', "\\");
            let pattern = Pattern::new(&path);
            prop_assert_eq!(pattern.matches(&windows), pattern.matches(&path));
        }
    }

    // ============================================================================
    // Filter and expansion properties
    // ============================================================================

    proptest! {
        /// Property: a path matching any exclude pattern is never selected
        #[test]
        fn exclude_always_wins(all in paths(), pick in 0usize..12) {
            prop_assume!(!all.is_empty());
            let excluded = all[pick % all.len()].clone();
            let snapshot = LibrarySnapshot::from_files(ResourceCategory::Prompts, &all);
            let rule = SelectionRule::new(vec!["*".to_string()], vec![excluded.clone()]);

            let outcome = filter(Some(&rule), snapshot.paths(ResourceCategory::Prompts));
            prop_assert!(outcome.selected().iter().all(|p| p.relative != excluded));
        }

        /// Property: an empty include list selects nothing
        #[test]
        fn empty_include_selects_nothing(all in paths()) {
            let snapshot = LibrarySnapshot::from_files(ResourceCategory::Configs, &all);
            let outcome = filter(
                Some(&SelectionRule::default()),
                snapshot.paths(ResourceCategory::Configs),
            );
            prop_assert!(outcome.selected().is_empty());
        }

        /// Property: expansion terminates on arbitrary graphs and is idempotent
        #[test]
        fn expand_is_idempotent(
            edges in prop::collection::vec((0usize..6, 0usize..6), 0..20),
            roots in prop::collection::vec(any::<bool>(), 6),
        ) {
            let node = |i: usize| LibraryPath::new(ResourceCategory::Templates, &format!("t{}", i));
            let mut graph = DependencyGraph::new();
            for (from, to) in &edges {
                graph.add_edge(&node(*from), &node(*to));
            }
            let records: Vec<ResourceRecord> = roots
                .iter()
                .enumerate()
                .map(|(i, &selected)| {
                    if selected {
                        ResourceRecord::included(node(i), Reason::SelectedByDefault)
                    } else {
                        ResourceRecord::not_included(node(i), Reason::Unmatched)
                    }
                })
                .collect();

            let once = expand(records, &graph);
            prop_assert_eq!(once.len(), 6);
            let twice = expand(once.clone(), &graph);
            prop_assert_eq!(once, twice);
        }

        /// Property: identical inputs give byte-identical reports
        #[test]
        fn report_is_deterministic(all in paths(), include in rel_path()) {
            let snapshot = LibrarySnapshot::from_files(ResourceCategory::Patterns, &all);
            let selection = crate::config::ResourceSelection::new().with_rule(
                ResourceCategory::Patterns,
                SelectionRule::new(vec![include, "*".to_string()], Vec::<String>::new()),
            );
            let graph = DependencyGraph::new();
            let first = orchestrator::execute(Some(&selection), &snapshot, &graph);
            let second = orchestrator::execute(Some(&selection), &snapshot, &graph);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }
}
