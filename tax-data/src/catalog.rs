use std::collections::HashSet;
use std::io::Read;

use tax_core::{CatalogError, FilingStatus, JurisdictionCatalog, JurisdictionTaxSystem};
use tracing::info;

use crate::brackets::{BracketLoader, BracketTables};
use crate::error::CatalogLoaderError;
use crate::jurisdictions::{JurisdictionRecord, parse_jurisdictions};

/// Jurisdiction metadata shipped with the crate.
pub const EMBEDDED_JURISDICTIONS: &str = include_str!("../data/jurisdictions.toml");

/// Bracket tables shipped with the crate.
pub const EMBEDDED_BRACKETS: &str = include_str!("../data/brackets.csv");

/// Builds a catalog from the data files embedded in the binary.
pub fn default_catalog() -> Result<JurisdictionCatalog, CatalogLoaderError> {
    CatalogLoader::load(EMBEDDED_JURISDICTIONS, EMBEDDED_BRACKETS.as_bytes())
}

/// Joins jurisdiction metadata with bracket tables.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse both sources and assemble the catalog.
    ///
    /// Every declared jurisdiction must have a single and a joint table, and
    /// every table must belong to a declared jurisdiction.
    pub fn load<R: Read>(
        jurisdictions_toml: &str,
        brackets_csv: R,
    ) -> Result<JurisdictionCatalog, CatalogLoaderError> {
        let records = parse_jurisdictions(jurisdictions_toml)?;
        let tables = BracketLoader::load(brackets_csv)?;
        Self::assemble(records, tables)
    }

    pub fn assemble(
        records: Vec<JurisdictionRecord>,
        mut tables: BracketTables,
    ) -> Result<JurisdictionCatalog, CatalogLoaderError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.trim().to_ascii_uppercase()) {
                return Err(CatalogError::DuplicateJurisdiction(record.id.clone()).into());
            }
        }

        let mut systems = Vec::with_capacity(records.len());
        for record in records {
            let mut take = |status: FilingStatus| {
                tables
                    .take(&record.id, status)
                    .ok_or_else(|| CatalogLoaderError::MissingBrackets {
                        jurisdiction: record.id.clone(),
                        status,
                    })
            };
            let single = take(FilingStatus::Single)?;
            let joint = take(FilingStatus::Joint)?;

            systems.push(JurisdictionTaxSystem {
                id: record.id,
                name: record.name,
                currency_symbol: record.currency_symbol,
                single,
                joint,
                standard_deduction: record.standard_deduction,
                max_deductible_amount: record.max_deductible_amount,
            });
        }

        if let Some(orphan) = tables.jurisdictions().first() {
            return Err(CatalogLoaderError::UndeclaredJurisdiction(
                (*orphan).to_string(),
            ));
        }

        let catalog = JurisdictionCatalog::new(systems)?;
        info!(
            jurisdictions = catalog.len(),
            ids = ?catalog.ids().collect::<Vec<_>>(),
            "jurisdiction catalog loaded"
        );
        Ok(catalog)
    }
}
