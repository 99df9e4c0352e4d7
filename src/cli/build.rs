//! The `build` command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use super::InputArgs;
use crate::build::{Build, BuildOutcome};

/// Resolve the runtime and install it into its layer.
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(flatten)]
    pub(super) inputs: InputArgs,

    /// Layers directory
    #[arg(long, env = "CNB_LAYERS_DIR")]
    pub(super) layers: PathBuf,
}

impl BuildCommand {
    pub fn execute(self) -> Result<ExitCode> {
        let config = self.inputs.to_config(Some(self.layers.clone()));
        let outcome = Build::default().run(&config)?;
        let dependency = &outcome.selection().resolution.dependency;

        match &outcome {
            BuildOutcome::Reused {
                layer_path,
                ..
            } => println!(
                "{} {} {} ({})",
                "✓".green(),
                dependency.id,
                dependency.version,
                format!("reused {}", layer_path.display()).dimmed()
            ),
            BuildOutcome::Installed {
                layer_path,
                ..
            } => println!(
                "{} {} {} installed to {}",
                "✓".green(),
                dependency.id,
                dependency.version,
                layer_path.display()
            ),
        }

        Ok(ExitCode::SUCCESS)
    }
}
