//! Progressive bracket tax engine.
//!
//! [`compute`] is a pure function over a [`JurisdictionTaxSystem`] and a
//! [`TaxQuery`]; [`JurisdictionCatalog`] resolves queries to systems.

pub mod calculations;
pub mod catalog;
pub mod error;
pub mod models;

pub use calculations::{TaxEngine, compute};
pub use catalog::{CatalogError, JurisdictionCatalog};
pub use error::TaxEngineError;
pub use models::*;
