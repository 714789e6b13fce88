//! Apply command implementation
//!
//! Copies every selected resource from the library into the project:
//! 1. Load the configuration and scan the library
//! 2. Run the selection engine
//! 3. Copy each selected path to `<output>/<category>/<path>`
//!
//! Directory resources are copied with their contents, minus anything an
//! exclude pattern removed. Existing files are left alone unless `--force`
//! is given.

use anyhow::Result;
use clap::Args;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use library_sync::defaults::DEFAULT_OUTPUT_DIR;
use library_sync::library::{self, LibrarySnapshot};
use library_sync::output::emoji;
use library_sync::resource::LibraryPath;

use super::Context;

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Output directory
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Overwrite files that already exist
    #[arg(short, long)]
    pub force: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// What happened to one written path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyOutcome {
    Created,
    Copied,
    Skipped,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ApplySummary {
    copied: usize,
    directories: usize,
    skipped: usize,
}

/// Copies resources from a library root into an output directory.
///
/// Every target is handled at most once per run, so a file that is both
/// selected on its own and part of a selected directory is not reported
/// twice.
struct Copier<'a> {
    library_root: &'a Path,
    output: &'a Path,
    force: bool,
    excluded: HashSet<LibraryPath>,
    handled: HashSet<PathBuf>,
}

impl<'a> Copier<'a> {
    fn new(
        library_root: &'a Path,
        output: &'a Path,
        force: bool,
        excluded: Vec<LibraryPath>,
    ) -> Self {
        Self {
            library_root,
            output,
            force,
            excluded: excluded.into_iter().collect(),
            handled: HashSet::new(),
        }
    }

    /// Copy one resource, recursing into directories. Returns the targets
    /// written or skipped by this call.
    fn copy(&mut self, path: &LibraryPath) -> Result<Vec<(PathBuf, CopyOutcome)>> {
        let source = LibrarySnapshot::resolve(self.library_root, path);
        let mut outcomes = Vec::new();

        if !source.is_dir() {
            let target = destination(self.output, path);
            if self.handled.insert(target.clone()) {
                let outcome = copy_file(&source, &target, self.force)?;
                outcomes.push((target, outcome));
            }
            return Ok(outcomes);
        }

        let excluded = &self.excluded;
        let walker = WalkDir::new(&source)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                let nested = path.join(&library::relative_string(&source, entry.path()));
                !library::is_hidden(&name) && !excluded.contains(&nested)
            });

        for entry in walker {
            let entry = entry?;
            let nested = path.join(&library::relative_string(&source, entry.path()));
            let target = destination(self.output, &nested);
            if !self.handled.insert(target.clone()) {
                continue;
            }
            let outcome = if entry.file_type().is_dir() {
                create_dir(&target)?
            } else {
                copy_file(entry.path(), &target, self.force)?
            };
            outcomes.push((target, outcome));
        }

        Ok(outcomes)
    }
}

/// Execute the apply command
pub fn execute(args: ApplyArgs, context: &Context) -> Result<()> {
    let start_time = Instant::now();
    let out = context.output();

    let session = context.load()?;
    let selection = session.select();

    if !args.quiet {
        println!("{} Library Sync Apply", emoji(&out, "🔍", "[APPLY]"));
        if args.dry_run {
            println!(
                "{} DRY RUN MODE - No changes will be made",
                emoji(&out, "🔎", "[DRY-RUN]")
            );
        }
        println!();
    }

    let mut copier = Copier::new(
        &session.library_root,
        &args.output,
        args.force,
        selection.excluded_paths(),
    );
    let mut summary = ApplySummary::default();
    for path in selection.selected_paths() {
        if args.dry_run {
            if !args.quiet {
                println!(
                    "   Would copy {} -> {}",
                    path,
                    destination(&args.output, &path).display()
                );
            }
            continue;
        }

        for (target, outcome) in copier.copy(&path)? {
            match outcome {
                CopyOutcome::Created => summary.directories += 1,
                CopyOutcome::Copied => summary.copied += 1,
                CopyOutcome::Skipped => {
                    summary.skipped += 1;
                    if !args.quiet {
                        println!(
                            "{} Skipped existing {}",
                            emoji(&out, "⏭️", "[SKIP]"),
                            target.display()
                        );
                    }
                }
            }
        }
    }

    if !args.quiet {
        let duration = start_time.elapsed();
        if args.dry_run {
            println!(
                "\n{} {} resource(s) would be copied to {}",
                emoji(&out, "✅", "[OK]"),
                selection.total_selected(),
                args.output.display()
            );
        } else {
            println!(
                "\n{} Applied in {:.2}s: {} file(s) copied, {} director(ies) created, {} skipped",
                emoji(&out, "✅", "[OK]"),
                duration.as_secs_f64(),
                summary.copied,
                summary.directories,
                summary.skipped
            );
            println!("   Files written to: {}", args.output.display());
        }
    }

    Ok(())
}

fn destination(output: &Path, path: &LibraryPath) -> PathBuf {
    LibrarySnapshot::resolve(output, path)
}

fn create_dir(target: &Path) -> Result<CopyOutcome> {
    fs::create_dir_all(target).map_err(|e| {
        anyhow::anyhow!("Failed to create directory '{}': {}", target.display(), e)
    })?;
    Ok(CopyOutcome::Created)
}

fn copy_file(source: &Path, target: &Path, force: bool) -> Result<CopyOutcome> {
    if target.exists() && !force {
        return Ok(CopyOutcome::Skipped);
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create directory '{}': {}", parent.display(), e)
        })?;
    }
    fs::copy(source, target).map_err(|e| {
        anyhow::anyhow!(
            "Failed to copy '{}' to '{}': {}",
            source.display(),
            target.display(),
            e
        )
    })?;
    Ok(CopyOutcome::Copied)
}
