//! # Preview Command Implementation
//!
//! Shows what the configuration does to each category: which resources are
//! selected, which were removed by an exclude pattern, which were pulled in
//! as dependencies, and any warnings about the patterns themselves.
//!
//! Read-only.

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};

use library_sync::output::{dim, emoji, heading, OutputConfig};
use library_sync::phases::report::StructuredSelection;

use super::Context;

/// Show selected and excluded resources
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Hide the lists and print only per-category counts
    #[arg(long)]
    pub summary: bool,
}

/// Execute the `preview` command.
pub fn execute(args: PreviewArgs, context: &Context) -> Result<()> {
    let session = context.load()?;
    let selection = session.select();
    let out = context.output();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(
        handle,
        "{} Preview of selected resources from {}",
        emoji(&out, "🔍", "[PREVIEW]"),
        session.library_root.display()
    )?;
    write_preview(&mut handle, &selection, &out, args.summary)?;
    Ok(())
}

fn write_preview<W: Write>(
    w: &mut W,
    selection: &StructuredSelection,
    out: &OutputConfig,
    summary_only: bool,
) -> io::Result<()> {
    for category in &selection.categories {
        let counts = &category.counts;
        writeln!(w)?;
        writeln!(w, "{}", heading(out, category.category.as_str()))?;
        writeln!(
            w,
            "  selected: {}, excluded: {}, unmatched: {}, dependencies: {}",
            counts.selected, counts.excluded, counts.unmatched, counts.dependencies
        )?;
        if summary_only {
            continue;
        }

        for path in &category.selected {
            match category.dependencies.iter().find(|d| &d.path == path) {
                Some(dep) => writeln!(
                    w,
                    "  + {} {}",
                    path,
                    dim(out, &format!("(dependency of {})", dep.required_by))
                )?,
                None => writeln!(w, "  + {}", path)?,
            }
        }

        if !category.excluded_explicitly.is_empty() {
            writeln!(w, "  Excluded:")?;
            for entry in &category.excluded_explicitly {
                writeln!(
                    w,
                    "  - {} {}",
                    entry.path,
                    dim(out, &format!("(excluded by {})", entry.pattern))
                )?;
            }
        }
    }

    writeln!(w)?;
    writeln!(
        w,
        "{} {} resource(s) selected",
        emoji(out, "📊", "[TOTAL]"),
        selection.total_selected()
    )?;

    if !selection.warnings.is_empty() {
        writeln!(w)?;
        for warning in &selection.warnings {
            writeln!(w, "{} {}", emoji(out, "⚠️", "[WARN]"), warning)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture;
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
library_path: library
resources:
  prompts:
    include: ["code-*", "missing.md"]
    exclude: ["code-legacy.md"]
  configs:
    include: []
"#;

    fn render(summary_only: bool) -> String {
        let temp = TempDir::new().unwrap();
        let context = fixture(temp.path(), CONFIG);
        let selection = context.load().unwrap().select();

        let mut buffer = Vec::new();
        write_preview(
            &mut buffer,
            &selection,
            &OutputConfig { use_color: false },
            summary_only,
        )
        .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_preview_lists_selected_excluded_and_dependencies() {
        let text = render(false);

        assert!(text.contains("prompts\n  selected: 1, excluded: 1, unmatched: 1, dependencies: 0\n"));
        assert!(text.contains("  + code-review.md\n"));
        assert!(text.contains("  Excluded:\n  - code-legacy.md (excluded by code-legacy.md)\n"));
        assert!(text.contains("  + eslint-config.json (dependency of templates/nextjs-app)\n"));
        assert!(text.contains("[WARN] prompts: 'missing.md' not found in library"));
    }

    #[test]
    fn test_summary_hides_lists() {
        let text = render(true);
        assert!(text.contains("selected: 1, excluded: 1"));
        assert!(!text.contains("Excluded:"));
        assert!(!text.contains("+ code-review.md"));
    }

    #[test]
    fn test_execute() {
        let temp = TempDir::new().unwrap();
        let context = fixture(temp.path(), CONFIG);
        assert!(execute(PreviewArgs { summary: false }, &context).is_ok());
    }
}
