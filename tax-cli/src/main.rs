use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use tax_cli::app::{self, EstimateForm};
use tax_cli::logging::{self, DEFAULT_LOG_LEVEL};
use tax_data::CatalogConfig;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive-bracket income tax estimator.
///
/// Looks up the jurisdiction's bracket table for the filing status, applies
/// the standard or additional deduction and any credits, and prints the
/// liability and effective rate. Amounts may be written as `60,000` or
/// `$60,000.50`.
#[derive(Debug, Parser)]
#[command(name = "tax-estimator")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Jurisdiction id (e.g. US, UK, CA).
    #[arg(short, long, default_value = "US")]
    jurisdiction: String,

    /// Filing status: single or joint.
    #[arg(short, long, default_value = "single")]
    status: String,

    /// Gross annual income.
    #[arg(short, long, allow_negative_numbers = true, required_unless_present = "list")]
    income: Option<String>,

    /// Additional deductions; replace the standard deduction when positive.
    #[arg(short, long, allow_negative_numbers = true)]
    deductions: Option<String>,

    /// Tax credits subtracted from the computed tax.
    #[arg(short, long, allow_negative_numbers = true)]
    credits: Option<String>,

    /// TOML file with jurisdiction metadata (defaults to the embedded data).
    #[arg(long)]
    jurisdictions_file: Option<PathBuf>,

    /// CSV file with bracket tables (defaults to the embedded data).
    #[arg(long)]
    brackets_file: Option<PathBuf>,

    /// Print the estimate as JSON.
    #[arg(long)]
    json: bool,

    /// List configured jurisdictions and their brackets, then exit.
    #[arg(long)]
    list: bool,

    /// Log filter (e.g. warn, debug, tax_core=trace). RUST_LOG takes precedence.
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let config = CatalogConfig {
        jurisdictions: cli.jurisdictions_file,
        brackets: cli.brackets_file,
    };
    debug!("loading catalog ({})", config.describe());
    let catalog = config
        .load()
        .with_context(|| format!("failed to load catalog ({})", config.describe()))?;

    if cli.list {
        print!("{}", app::render_catalog(&catalog));
        return Ok(());
    }

    let form = EstimateForm {
        jurisdiction: cli.jurisdiction,
        filing_status: cli.status,
        gross_income: cli.income.unwrap_or_default(),
        additional_deductions: cli.deductions.unwrap_or_default(),
        tax_credits: cli.credits.unwrap_or_default(),
    };
    let estimate = app::estimate(&catalog, &form).context("cannot compute estimate")?;

    if cli.json {
        println!("{}", estimate.render_json()?);
    } else {
        print!("{}", estimate.render_text());
    }

    Ok(())
}
