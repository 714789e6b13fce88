//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use library_sync::defaults::DEFAULT_CONFIG_FILENAME;

use crate::commands;

/// Library Sync - Select shared prompts, templates, patterns and configs
#[derive(Parser, Debug)]
#[command(name = "library-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the project configuration file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "LIBRARY_SYNC_CONFIG",
        default_value = DEFAULT_CONFIG_FILENAME
    )]
    config: PathBuf,

    /// Path to the global configuration file merged under the project one.
    ///
    /// Defaults to `config.yaml` in the platform config directory
    /// (`~/.config/library-sync` on Linux).
    #[arg(long, global = true, value_name = "FILE", env = "LIBRARY_SYNC_GLOBAL_CONFIG")]
    global_config: Option<PathBuf>,

    /// Library root directory, overriding `library_path` from the config
    #[arg(long, global = true, value_name = "DIR", env = "LIBRARY_SYNC_LIBRARY")]
    library: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the resources selected by the configuration
    List(commands::list::ListArgs),

    /// Show selected and excluded resources with counts and warnings
    Preview(commands::preview::PreviewArgs),

    /// Check configured patterns against the library
    Validate(commands::validate::ValidateArgs),

    /// Copy the selected resources into the project
    Apply(commands::apply::ApplyArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let context = commands::Context {
            config_path: self.config,
            global_config: self.global_config,
            library: self.library,
            color: self.color,
        };

        match self.command {
            Commands::List(args) => commands::list::execute(args, &context),
            Commands::Preview(args) => commands::preview::execute(args, &context),
            Commands::Validate(args) => commands::validate::execute(args, &context),
            Commands::Apply(args) => commands::apply::execute(args, &context),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
