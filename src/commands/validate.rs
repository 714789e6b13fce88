//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks the
//! `resources:` section of `.library-sync.yaml` against the library without
//! copying anything.
//!
//! ## Functionality
//!
//! - **Configuration Validation**: Parses the configuration file, rejecting
//!   unknown categories, unknown keys and empty patterns.
//! - **Pattern Validation**: Reports literal entries missing from the library,
//!   wildcards matching nothing, and includes fully cancelled by excludes.
//! - **Dependency Validation**: Reports manifest dependencies the library
//!   cannot satisfy.
//!
//! Warnings are informational unless `--strict` is given, in which case any
//! warning makes the command fail.

use anyhow::Result;
use clap::Args;

use library_sync::output::emoji;
use library_sync::suggestions;

use super::Context;

/// Check configured patterns against the library
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, context: &Context) -> Result<()> {
    let out = context.output();
    println!(
        "{} Validating configuration: {}",
        emoji(&out, "🔍", "[SCAN]"),
        context.config_path.display()
    );

    let session = match context.load() {
        Ok(session) => {
            println!(
                "{} Configuration file parsed successfully",
                emoji(&out, "✅", "[OK]")
            );
            session
        }
        Err(e) => {
            println!(
                "{} Configuration could not be loaded",
                emoji(&out, "❌", "[ERR]")
            );
            return Err(e);
        }
    };

    let selection = session.select();

    println!("\n{} Selection Summary:", emoji(&out, "📊", "[INFO]"));
    println!("   Library: {}", session.library_root.display());
    println!("   Resources in library: {}", session.snapshot.len());
    for category in &selection.categories {
        println!(
            "   {}: {} selected",
            category.category, category.counts.selected
        );
    }

    println!(
        "\n{} Checking patterns and dependencies...",
        emoji(&out, "🔄", "[CHECK]")
    );
    for warning in &selection.warnings {
        println!("{} {}", emoji(&out, "⚠️", "[WARN]"), warning);
    }

    println!("\n{} Validation Result:", emoji(&out, "🎯", "[RESULT]"));

    if selection.warnings.is_empty() {
        println!("{} Configuration is valid", emoji(&out, "✅", "[OK]"));
        return Ok(());
    }

    if args.strict {
        println!(
            "{} Configuration has warnings (strict mode enabled)",
            emoji(&out, "❌", "[ERR]")
        );
        return Err(suggestions::strict_validation_failed(
            selection.warnings.len(),
        ));
    }

    println!(
        "{} Configuration is valid but has {} warning(s)",
        emoji(&out, "⚠️", "[WARN]"),
        selection.warnings.len()
    );
    Ok(())
}
