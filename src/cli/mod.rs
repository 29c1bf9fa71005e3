//! Command-line interface for pagedeps.
//!
//! The binary loads an asset manifest, builds the catalog for the selected
//! profile and then answers questions about it. Each command lives in its own
//! module with its own argument struct and an `execute_with_manifest_path`
//! entry point.
//!
//! # Available Commands
//!
//! - `render` - resolve a set of requirements and print the page's HTML or JSON
//! - `validate` - check that the manifest builds and every package resolves
//! - `tree` - show the dependency tree of a library
//! - `list` - list the registered assets
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - raise or silence log output (written to stderr)
//! - `--manifest-path` - use this manifest instead of searching for `assets.toml`
//! - `--profile` - select the active profile (`PAGEDEPS_PROFILE`)
//!
//! # Example
//!
//! ```bash
//! pagedeps render lib:deform css:base package:forms --onload 'init();'
//! pagedeps --profile production render --format json lib:jquery.ui
//! pagedeps tree deform
//! pagedeps validate
//! ```

mod common;
mod list;
mod render;
mod tree;
mod validate;

pub use common::ManifestOptions;
pub use render::Requirement;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive. `None` keeps `RUST_LOG`, falling back to `warn`.
    pub log_level: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a stderr `tracing` subscriber for this configuration.
    ///
    /// Calling this twice is harmless; the second subscriber is ignored.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Resolve page assets from an asset manifest.
#[derive(Parser)]
#[command(
    name = "pagedeps",
    about = "Resolve the scripts, stylesheets and onload code a web page needs",
    version,
    long_about = "pagedeps reads an asset manifest (assets.toml), expands library dependencies and prints the ordered script and stylesheet tags for a page."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the asset manifest (defaults to the nearest assets.toml)
    #[arg(long, global = true, env = "PAGEDEPS_MANIFEST")]
    manifest_path: Option<PathBuf>,

    /// Profile selecting which URL variant is served
    #[arg(short, long, global = true, env = "PAGEDEPS_PROFILE")]
    profile: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the assets a page needs
    Render(render::RenderCommand),

    /// Check the manifest and every package in it
    Validate(validate::ValidateCommand),

    /// Show the dependency tree of a library
    Tree(tree::TreeCommand),

    /// List registered assets
    List(list::ListCommand),
}

impl Cli {
    /// Initialize logging and run the selected command.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config)
    }

    /// Translate `--verbose` / `--quiet` into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
        }
    }

    /// Run the selected command. Logging is expected to be set up already.
    pub fn execute_with_config(self, _config: CliConfig) -> Result<()> {
        let options = ManifestOptions {
            path: self.manifest_path,
            profile: self.profile,
        };

        match self.command {
            Commands::Render(cmd) => cmd.execute_with_manifest_path(options),
            Commands::Validate(cmd) => cmd.execute_with_manifest_path(options),
            Commands::Tree(cmd) => cmd.execute_with_manifest_path(options),
            Commands::List(cmd) => cmd.execute_with_manifest_path(options),
        }
    }
}
