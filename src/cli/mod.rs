//! Command-line interface.
//!
//! Three subcommands mirror the buildpack lifecycle:
//!
//! - `detect` prints the build plan requests found in an application
//! - `resolve` shows which catalog version a plan resolves to, without side effects
//! - `build` resolves and installs the runtime layer, reusing it when unchanged
//!
//! # Example
//!
//! ```bash
//! runtime-resolver detect --working-dir ./app > plan.toml
//! runtime-resolver resolve --plan plan.toml --catalog buildpack.toml --platform io.buildpacks.stacks.jammy
//! runtime-resolver --verbose build --plan plan.toml --layers ./layers
//! ```
//!
//! Diagnostics go to stderr through `tracing`; `RUST_LOG` overrides the
//! level chosen by `--verbose`/`--quiet`.

mod build;
mod detect;
mod resolve;


use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::build::BuildConfig;

/// Main CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "runtime-resolver",
    about = "Select, roll forward and install the .NET Core runtime for an application",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the runtime requests found in an application as a build plan
    Detect(detect::DetectCommand),

    /// Show which runtime version a plan resolves to
    Resolve(resolve::ResolveCommand),

    /// Resolve and install the runtime layer
    Build(build::BuildCommand),
}

/// Inputs shared by `resolve` and `build`.
#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Application root, scanned when no plan is given
    #[arg(long, default_value = ".")]
    working_dir: PathBuf,

    /// Build plan produced by `detect`
    #[arg(long, env = "CNB_BP_PLAN_PATH")]
    plan: Option<PathBuf>,

    /// Dependency catalog; defaults to buildpack.toml in the buildpack directory
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Buildpack directory holding buildpack.toml
    #[arg(long, env = "CNB_BUILDPACK_DIR", default_value = ".")]
    buildpack_dir: PathBuf,

    /// Target platform (stack) identifier
    #[arg(long, env = "CNB_STACK_ID")]
    platform: String,
}

impl InputArgs {
    fn to_config(&self, layers_dir: Option<PathBuf>) -> BuildConfig {
        let catalog_path =
            self.catalog.clone().unwrap_or_else(|| BuildConfig::default_catalog_path(&self.buildpack_dir));

        let mut config = BuildConfig::new(&self.working_dir, catalog_path, &self.platform);
        config.plan_path = self.plan.clone();
        config.layers_dir = layers_dir;
        config
    }
}

impl Cli {
    /// Initialize logging and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` renders it.
    pub fn execute(self) -> Result<ExitCode> {
        self.init_logging();

        match self.command {
            Commands::Detect(cmd) => cmd.execute(),
            Commands::Resolve(cmd) => cmd.execute(),
            Commands::Build(cmd) => cmd.execute(),
        }
    }

    /// Log level implied by the global flags.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_level()));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .without_time()
            .try_init();
    }
}
