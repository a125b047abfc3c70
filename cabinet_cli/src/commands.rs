//! Command handlers.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use cabinet_core::calculations::{generate_cutting_list, CabinetDimensions, CabinetInputs};
use cabinet_core::export::{self, dxf};
use cabinet_core::analysis::AnalysisReport;
use cabinet_core::file_io::{load_analysis_response, load_config_or_default, write_export};
use cabinet_core::{AppConfig, CabinetError, CutCategory, PriceSession};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::cli::{AnalysisArgs, Cli, Command, CuttingListArgs, PriceArgs};
use crate::output::{print_cutting_list, print_ledger};

pub fn run(cli: &Cli) -> Result<()> {
    let config = load_config_or_default(cli.config.as_deref()).context("Could not load configuration")?;

    match &cli.command {
        Command::Price(args) => run_price(args, &config),
        Command::CuttingList(args) => run_cutting_list(args, &config),
        Command::Analysis(args) => run_analysis(args, &config),
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

/// True when the failure traces back to something the user typed.
pub fn is_user_error(error: &anyhow::Error) -> bool {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<CabinetError>())
        .is_some_and(CabinetError::is_user_error)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `Some(None)` means "flag given without a path": fall back to the dated name.
fn destination(flag: &Option<Option<PathBuf>>, default_name: impl FnOnce() -> String) -> Option<PathBuf> {
    flag.as_ref()
        .map(|path| path.clone().unwrap_or_else(|| PathBuf::from(default_name())))
}

fn save(path: &Path, contents: &[u8]) -> Result<()> {
    write_export(path, contents).with_context(|| format!("Could not write {}", path.display()))?;
    println!("Saved {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `gable.height=1000` → `("gable", "height", "1000")`
pub fn parse_ledger_edit(edit: &str) -> Result<(&str, &str, &str)> {
    let (target, value) = edit
        .split_once('=')
        .ok_or_else(|| anyhow!("Edit '{edit}' must look like COMPONENT.FIELD=VALUE"))?;
    let (component, field) = target
        .rsplit_once('.')
        .ok_or_else(|| anyhow!("Edit '{edit}' must look like COMPONENT.FIELD=VALUE"))?;
    Ok((component.trim(), field.trim(), value))
}

/// `GABLE:1.width=550` → `(Gable, 0, "width", "550")`; items are numbered from 1.
pub fn parse_item_edit(edit: &str) -> Result<(CutCategory, usize, &str, &str)> {
    let usage = || anyhow!("Edit '{edit}' must look like CATEGORY:N.FIELD=VALUE");
    let (target, value) = edit.split_once('=').ok_or_else(usage)?;
    let (item, field) = target.rsplit_once('.').ok_or_else(usage)?;
    let (category, number) = item.rsplit_once(':').ok_or_else(usage)?;

    let category: CutCategory = category.parse()?;
    let number: usize = number
        .trim()
        .parse()
        .with_context(|| format!("Item number in '{edit}' is not a whole number"))?;
    if number == 0 {
        bail!("Items are numbered from 1 in '{edit}'");
    }
    Ok((category, number - 1, field.trim(), value))
}

fn run_price(args: &PriceArgs, config: &AppConfig) -> Result<()> {
    let dims = args.dimensions;
    let inputs = CabinetInputs::new(dims.height, dims.width, dims.depth);
    let price_per_sq_m = args.price_per_sq_m.unwrap_or(config.pricing.price_per_sq_m);

    let mut session = PriceSession::new();
    session
        .calculate(&inputs, price_per_sq_m)
        .context("Could not calculate components")?;

    for edit in &args.edits {
        let (component, field, value) = parse_ledger_edit(edit)?;
        let stored = session
            .edit_cell(component, field, value)
            .with_context(|| format!("Could not apply edit '{edit}'"))?;
        info!(component, field, stored, "applied edit");
    }

    let ledger = session.require_ledger()?;
    let currency = config.pricing.currency.as_deref();
    if args.export.json {
        print_json(ledger)?;
    } else {
        print_ledger(ledger, currency);
    }

    if let Some(path) = destination(&args.export.csv, || export::price_csv_filename(today())) {
        let csv = export::ledger_to_csv_with_currency(ledger, currency)?;
        save(&path, csv.as_bytes())?;
    }
    if let Some(path) = destination(&args.export.dxf, || export::price_layout_filename(today())) {
        let drawing = export::to_layout_drawing_with(&export::ledger_layout_items(ledger), &config.layout);
        save(&path, drawing.as_bytes())?;
    }
    Ok(())
}

fn run_cutting_list(args: &CuttingListArgs, config: &AppConfig) -> Result<()> {
    let dims = CabinetDimensions::new(args.dimensions.width, args.dimensions.height, args.dimensions.depth);
    let list = generate_cutting_list(&dims, &config.workshop).context("Could not generate cutting list")?;
    let summary = list.summary();
    let stem = format!("{}x{}x{}", dims.width, dims.total_height, dims.depth);

    if args.export.json {
        print_json(&list)?;
    } else {
        print_cutting_list(&list, &summary);
    }

    if let Some(path) = destination(&args.export.csv, || export::cutting_list_csv_filename(&stem, today())) {
        save(&path, export::cutting_list_to_csv(&list)?.as_bytes())?;
    }
    if let Some(path) = destination(&args.export.dxf, || export::cutting_layout_filename(&stem, today())) {
        let drawing = dxf::to_layout_drawing_with(&dxf::cutting_list_layout_items(&list), &config.layout);
        save(&path, drawing.as_bytes())?;
    }
    Ok(())
}

fn analyzed_label(report: &AnalysisReport) -> String {
    match (report.analyzed_at(), report.timestamp.as_deref()) {
        (Some(at), _) => format!("analyzed {}", at.format("%Y-%m-%d %H:%M")),
        (None, Some(raw)) => raw.to_string(),
        (None, None) => "no timestamp".to_string(),
    }
}

fn run_analysis(args: &AnalysisArgs, config: &AppConfig) -> Result<()> {
    let mut report = load_analysis_response(&args.response)
        .with_context(|| format!("Could not load {}", args.response.display()))?;

    for edit in &args.edits {
        let (category, index, field, value) = parse_item_edit(edit)?;
        report
            .edit_item(category, index, field, value)
            .with_context(|| format!("Could not apply edit '{edit}'"))?;
    }

    if args.export.json {
        print_json(&report)?;
    } else {
        if !report.filename.is_empty() {
            println!("{} ({})", report.filename, analyzed_label(&report));
        }
        print_cutting_list(&report.results, &report.summary);
    }

    let stem = report.file_stem().to_string();
    if let Some(path) = destination(&args.export.csv, || export::cutting_list_csv_filename(&stem, today())) {
        save(&path, export::cutting_list_to_csv(&report.results)?.as_bytes())?;
    }
    if let Some(path) = destination(&args.export.dxf, || export::cutting_layout_filename(&stem, today())) {
        let drawing = dxf::to_layout_drawing_with(&dxf::cutting_list_layout_items(&report.results), &config.layout);
        save(&path, drawing.as_bytes())?;
    }
    if let Some(path) = destination(&args.extract_dxf, || export::analysis_layout_filename(&stem, today())) {
        let Some(bytes) = report.decode_dxf()? else {
            bail!("{} has no embedded DXF drawing", args.response.display());
        };
        save(&path, &bytes)?;
    }
    Ok(())
}
