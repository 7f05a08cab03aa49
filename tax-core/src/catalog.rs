use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::compute;
use crate::error::TaxEngineError;
use crate::models::{FilingStatus, JurisdictionTaxSystem, TaxQuery, TaxResult};

/// Reasons a set of jurisdictions cannot form a catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog contains no jurisdictions")]
    Empty,

    #[error("jurisdiction '{0}' is defined more than once")]
    DuplicateJurisdiction(String),

    #[error("jurisdiction '{0}' has an empty id")]
    MissingId(String),

    #[error("jurisdiction '{id}': {field} must not be negative, got {value}")]
    NegativeAmount {
        id: String,
        field: &'static str,
        value: Decimal,
    },
}

/// Immutable set of configured jurisdictions, keyed by id.
///
/// Construct it once at startup and hand out shared references (or wrap it
/// in an `Arc`); nothing in it changes after [`JurisdictionCatalog::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JurisdictionCatalog {
    systems: BTreeMap<String, JurisdictionTaxSystem>,
}

impl JurisdictionCatalog {
    /// Builds a catalog from already-validated systems.
    ///
    /// Ids are compared case-insensitively.
    ///
    /// # Errors
    /// * [`CatalogError::Empty`] when `systems` is empty.
    /// * [`CatalogError::DuplicateJurisdiction`] when two systems share an id.
    /// * [`CatalogError::MissingId`] / [`CatalogError::NegativeAmount`] for
    ///   malformed metadata.
    pub fn new(systems: Vec<JurisdictionTaxSystem>) -> Result<Self, CatalogError> {
        if systems.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut map = BTreeMap::new();
        for system in systems {
            check_metadata(&system)?;
            let key = catalog_key(&system.id);
            if map.contains_key(&key) {
                return Err(CatalogError::DuplicateJurisdiction(system.id));
            }
            debug!(
                jurisdiction = %system.id,
                single_brackets = system.single.len(),
                joint_brackets = system.joint.len(),
                "registered jurisdiction"
            );
            map.insert(key, system);
        }

        Ok(Self { systems: map })
    }

    /// Looks up a jurisdiction by id.
    pub fn get(
        &self,
        id: &str,
    ) -> Result<&JurisdictionTaxSystem, TaxEngineError> {
        self.systems
            .get(&catalog_key(id))
            .ok_or_else(|| TaxEngineError::UnknownJurisdiction(id.to_string()))
    }

    /// Configured ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.systems.values().map(|s| s.id.as_str())
    }

    pub fn systems(&self) -> impl Iterator<Item = &JurisdictionTaxSystem> {
        self.systems.values()
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Resolves the query's jurisdiction and runs the engine against it.
    pub fn compute(
        &self,
        query: &TaxQuery,
    ) -> Result<TaxResult, TaxEngineError> {
        let system = self.get(&query.jurisdiction)?;
        compute(system, query)
    }
}

fn catalog_key(id: &str) -> String {
    id.trim().to_ascii_uppercase()
}

fn check_metadata(system: &JurisdictionTaxSystem) -> Result<(), CatalogError> {
    if system.id.trim().is_empty() {
        return Err(CatalogError::MissingId(system.name.clone()));
    }

    let amounts = FilingStatus::ALL
        .iter()
        .map(|status| {
            let field = match status {
                FilingStatus::Single => "standard_deduction.single",
                FilingStatus::Joint => "standard_deduction.joint",
            };
            (field, system.standard_deduction(*status))
        })
        .chain(std::iter::once((
            "max_deductible_amount",
            system.max_deductible_amount,
        )));

    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(CatalogError::NegativeAmount {
                id: system.id.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}
