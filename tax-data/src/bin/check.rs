use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::FilingStatus;
use tax_data::CatalogConfig;
use tracing_subscriber::EnvFilter;

/// Validate jurisdiction metadata and bracket tables.
///
/// Loads the catalog exactly as the estimator would and prints a summary of
/// every jurisdiction. Exits non-zero if any table is inconsistent.
///
/// The brackets CSV should have the following columns:
/// - jurisdiction: Jurisdiction id (e.g., US)
/// - schedule: single, joint or both
/// - min: Lower bound of the bracket
/// - max: Upper bound (empty for unlimited)
/// - base_offset: Tax owed on all income below min
/// - rate: Marginal rate as a decimal (e.g., 0.22)
#[derive(Parser, Debug)]
#[command(name = "tax-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML file with jurisdiction metadata (defaults to the embedded data)
    #[arg(short, long)]
    jurisdictions: Option<PathBuf>,

    /// CSV file with bracket tables (defaults to the embedded data)
    #[arg(short, long)]
    brackets: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = CatalogConfig {
        jurisdictions: args.jurisdictions,
        brackets: args.brackets,
    };

    println!("Checking catalog ({})", config.describe());

    let catalog = config
        .load()
        .with_context(|| format!("Invalid catalog ({})", config.describe()))?;

    for system in catalog.systems() {
        println!(
            "{} - {} [{}], deduction cap {}",
            system.id, system.name, system.currency_symbol, system.max_deductible_amount
        );
        for status in FilingStatus::ALL {
            println!(
                "  {:<6} {} brackets, standard deduction {}",
                status.as_str(),
                system.brackets(status).len(),
                system.standard_deduction(status)
            );
        }
    }

    println!("Catalog OK: {} jurisdictions.", catalog.len());

    Ok(())
}
