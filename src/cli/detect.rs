//! The `detect` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::constants::DETECT_FAIL_CODE;
use crate::detect::detect_from_env;
use crate::plan::BuildPlan;
use crate::utils::safe_write;

/// Scan an application for runtime requests.
#[derive(Args, Debug)]
pub struct DetectCommand {
    /// Application root
    #[arg(long, default_value = ".")]
    working_dir: PathBuf,

    /// Write the plan here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl DetectCommand {
    pub fn execute(self) -> Result<ExitCode> {
        let requests = detect_from_env(&self.working_dir)
            .with_context(|| format!("Failed to detect application in {}", self.working_dir.display()))?;

        if requests.is_empty() {
            tracing::info!("No runtime version requested in {}", self.working_dir.display());
            return Ok(ExitCode::from(DETECT_FAIL_CODE));
        }

        let plan = BuildPlan::from_requests(&requests).to_toml_string().context("Failed to serialize build plan")?;

        match &self.output {
            Some(path) => safe_write(path, &plan)?,
            None => print!("{plan}"),
        }

        Ok(ExitCode::SUCCESS)
    }
}
