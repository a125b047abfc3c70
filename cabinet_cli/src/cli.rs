//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "cabinet",
    version,
    about = "Cabinet panel sizes, prices and cutting lists",
    long_about = "Derive carcass panel sizes and prices from overall cabinet dimensions,\n\
                  generate workshop cutting lists, and export them as CSV or DXF layouts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long = "log-json", global = true)]
    pub log_json: bool,

    /// Configuration file (default: ./cabinet.toml when present)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price a cabinet's carcass components
    Price(PriceArgs),

    /// Generate the workshop cutting list for a cabinet
    CuttingList(CuttingListArgs),

    /// Review a saved drawing-analysis response
    Analysis(AnalysisArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Overall cabinet dimensions in millimeters
#[derive(Args, Debug, Clone, Copy)]
pub struct DimensionArgs {
    /// Overall height H (mm)
    #[arg(long, value_name = "MM")]
    pub height: f64,

    /// Overall width W (mm)
    #[arg(long, value_name = "MM")]
    pub width: f64,

    /// Overall depth D (mm)
    #[arg(long, value_name = "MM")]
    pub depth: f64,
}

/// Export destinations shared by every command
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Write CSV; without PATH a dated file name is used
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub csv: Option<Option<PathBuf>>,

    /// Write a DXF layout drawing; without PATH a dated file name is used
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub dxf: Option<Option<PathBuf>>,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub dimensions: DimensionArgs,

    /// Board price per m² (default from config)
    #[arg(long = "price-per-sq-m", value_name = "PRICE")]
    pub price_per_sq_m: Option<f64>,

    /// Override a cell after calculating, e.g. `gable.height=1000`
    #[arg(long = "edit", value_name = "COMPONENT.FIELD=VALUE")]
    pub edits: Vec<String>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args, Debug)]
pub struct CuttingListArgs {
    #[command(flatten)]
    pub dimensions: DimensionArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Args, Debug)]
pub struct AnalysisArgs {
    /// Analysis response saved as JSON
    #[arg(value_name = "RESPONSE")]
    pub response: PathBuf,

    /// Edit an item, e.g. `GABLE:1.width=550` (items are numbered from 1)
    #[arg(long = "edit", value_name = "CATEGORY:N.FIELD=VALUE")]
    pub edits: Vec<String>,

    /// Write the backend's own DXF drawing; without PATH a dated file name is used
    #[arg(long = "extract-dxf", value_name = "PATH", num_args = 0..=1)]
    pub extract_dxf: Option<Option<PathBuf>>,

    #[command(flatten)]
    pub export: ExportArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_price_args() {
        let cli = Cli::try_parse_from([
            "cabinet", "-v", "price", "--height", "2100", "--width", "600", "--depth", "560", "--edit",
            "gable.height=1000", "--csv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Command::Price(args) => {
                assert_eq!(args.dimensions.height, 2100.0);
                assert_eq!(args.edits, ["gable.height=1000"]);
                assert_eq!(args.export.csv, Some(None));
                assert_eq!(args.export.dxf, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_analysis_args() {
        let cli = Cli::try_parse_from(["cabinet", "analysis", "resp.json", "--extract-dxf", "out.dxf"]).unwrap();
        match cli.command {
            Command::Analysis(args) => {
                assert_eq!(args.response, PathBuf::from("resp.json"));
                assert_eq!(args.extract_dxf, Some(Some(PathBuf::from("out.dxf"))));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
