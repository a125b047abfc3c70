//! # Cabinet CLI
//!
//! Command-line front end for `cabinet_core`: price a carcass, generate a
//! workshop cutting list, or review a saved drawing-analysis response, and
//! export any of them as CSV or a DXF sheet layout.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod logging;
mod output;

use crate::cli::Cli;
use crate::logging::{init_logging, LogFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.log_json { LogFormat::Json } else { LogFormat::Compact };
    if let Err(error) = init_logging(cli.verbose, format) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }
    tracing::debug!(command = ?cli.command, "starting");

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) if commands::is_user_error(&error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
        Err(error) => {
            tracing::debug!(error = ?error, "command failed");
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
