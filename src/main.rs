//! runtime-resolver CLI entry point
//!
//! Parses arguments, runs the command and renders any error with its
//! suggestion before exiting with status 1.

use clap::Parser;
use runtime_resolver::cli;
use runtime_resolver::core::user_friendly_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(code) => code,
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            ExitCode::FAILURE
        }
    }
}
