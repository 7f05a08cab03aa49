use std::path::PathBuf;

use tax_core::{BracketTableError, CatalogError, FilingStatus};
use thiserror::Error;

/// Errors that can occur when loading the jurisdiction catalog.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid schedule '{0}' (expected 'single', 'joint' or 'both')")]
    InvalidSchedule(String),

    #[error("Invalid bracket table for {jurisdiction}/{status}: {source}")]
    InvalidTable {
        jurisdiction: String,
        status: FilingStatus,
        #[source]
        source: BracketTableError,
    },

    #[error("Jurisdiction '{jurisdiction}' has no {status} brackets")]
    MissingBrackets {
        jurisdiction: String,
        status: FilingStatus,
    },

    #[error("Brackets given for undeclared jurisdiction '{0}'")]
    UndeclaredJurisdiction(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogLoaderError {
    fn from(err: toml::de::Error) -> Self {
        CatalogLoaderError::TomlParse(err.to_string())
    }
}
