//! # Error Suggestions
//!
//! Helper functions for error messages that say what went wrong AND how to
//! fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use library_sync::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Configuration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

use crate::resource::ResourceCategory;

/// Generate an error for when the configuration file is not found.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Create a .library-sync.yaml file in your project root\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Set LIBRARY_SYNC_CONFIG environment variable",
        path = path.display()
    )
}

/// Generate an error for when the library root does not exist.
pub fn library_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Library not found: {path}\n\n\
         hint: Set library_path in .library-sync.yaml\n\
         hint: Use --library to point at a library directory\n\
         hint: Set LIBRARY_SYNC_LIBRARY environment variable",
        path = path.display()
    )
}

/// Generate an error for `validate --strict` when warnings were found.
pub fn strict_validation_failed(warnings: usize) -> anyhow::Error {
    anyhow::anyhow!(
        "Validation failed in strict mode: {warnings} warning(s)\n\n\
         hint: Fix or remove the patterns listed above\n\
         hint: Run without --strict to treat warnings as informational"
    )
}

/// Generate an error for an unknown resource category.
///
/// Suggests the closest valid category when one is near enough.
pub fn unknown_category(name: &str) -> anyhow::Error {
    let valid: Vec<&str> = ResourceCategory::ALL.iter().map(|c| c.as_str()).collect();

    let did_you_mean = find_similar(name, &valid)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown resource category: {name}{did_you_mean}\n\n\
         Valid categories are: {categories}",
        categories = valid.join(", ")
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }

    previous[b.len()]
}
