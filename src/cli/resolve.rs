//! The `resolve` command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use super::InputArgs;
use crate::build::Build;

/// Show which catalog version a plan resolves to.
///
/// Reads the layer metadata when `--layers` is given, but never writes.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub(super) inputs: InputArgs,

    /// Layers directory to check for a reusable layer
    #[arg(long, env = "CNB_LAYERS_DIR")]
    pub(super) layers: Option<PathBuf>,
}

impl ResolveCommand {
    pub fn execute(self) -> Result<ExitCode> {
        let config = self.inputs.to_config(self.layers.clone());
        let selection = Build::default().select(&config)?;
        let dependency = &selection.resolution.dependency;

        println!("{} {}", dependency.id, dependency.version.green().bold());
        println!(
            "  requested: {} ({})",
            selection.resolution.requested_version, selection.request.source
        );
        println!("  matched:   {}", selection.resolution.matched_by);
        println!("  checksum:  {}", dependency.checksum);
        println!("  uri:       {}", dependency.uri);

        if self.layers.is_some() {
            let status = if selection.reusable() {
                "reusable".green()
            } else {
                "install required".yellow()
            };
            println!("  layer:     {status}");
        }

        Ok(ExitCode::SUCCESS)
    }
}
