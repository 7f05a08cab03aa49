//! Static configuration for the tax engine: jurisdiction metadata (TOML)
//! and bracket tables (CSV), assembled into a
//! [`JurisdictionCatalog`](tax_core::JurisdictionCatalog).

pub mod brackets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod jurisdictions;

pub use brackets::{BracketLoader, BracketRecord, BracketTables};
pub use catalog::{CatalogLoader, default_catalog};
pub use config::CatalogConfig;
pub use error::CatalogLoaderError;
pub use jurisdictions::{JurisdictionRecord, parse_jurisdictions};
