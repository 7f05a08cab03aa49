//! Jurisdiction metadata in TOML.
//!
//! ```toml
//! [[jurisdiction]]
//! id = "US"
//! name = "United States (2023)"
//! currency_symbol = "$"
//! max_deductible_amount = 50000
//!
//! [jurisdiction.standard_deduction]
//! single = 12950
//! joint = 25900
//! ```
//!
//! Amounts may be written as integers or as quoted decimals (`"1234.50"`).

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::StandardDeduction;
use tracing::debug;

use crate::error::CatalogLoaderError;

/// Everything about a jurisdiction except its bracket tables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JurisdictionRecord {
    pub id: String,
    pub name: String,
    pub currency_symbol: String,
    pub standard_deduction: StandardDeduction,
    pub max_deductible_amount: Decimal,
}

#[derive(Debug, Deserialize)]
struct JurisdictionFile {
    #[serde(rename = "jurisdiction", default)]
    jurisdictions: Vec<JurisdictionRecord>,
}

/// Parses the `[[jurisdiction]]` entries of a TOML document.
pub fn parse_jurisdictions(toml_source: &str) -> Result<Vec<JurisdictionRecord>, CatalogLoaderError> {
    let file: JurisdictionFile = toml::from_str(toml_source)?;
    debug!(jurisdictions = file.jurisdictions.len(), "parsed jurisdiction metadata");
    Ok(file.jurisdictions)
}
