use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tax_core::JurisdictionCatalog;
use tracing::debug;

use crate::catalog::{CatalogLoader, EMBEDDED_BRACKETS, EMBEDDED_JURISDICTIONS};
use crate::error::CatalogLoaderError;

/// Where the catalog's two data sources come from.
///
/// Each source falls back to the data embedded in the crate when no path is
/// given, so either file can be overridden on its own.
///
/// | field           | format | embedded default           |
/// |-----------------|--------|----------------------------|
/// | `jurisdictions` | TOML   | `data/jurisdictions.toml`  |
/// | `brackets`      | CSV    | `data/brackets.csv`        |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogConfig {
    pub jurisdictions: Option<PathBuf>,
    pub brackets: Option<PathBuf>,
}

impl CatalogConfig {
    /// Reads both sources and builds the catalog.
    pub fn load(&self) -> Result<JurisdictionCatalog, CatalogLoaderError> {
        let jurisdictions = match &self.jurisdictions {
            Some(path) => {
                debug!(path = %path.display(), "reading jurisdiction metadata");
                fs::read_to_string(path).map_err(|source| io_error(path, source))?
            }
            None => EMBEDDED_JURISDICTIONS.to_string(),
        };

        match &self.brackets {
            Some(path) => {
                debug!(path = %path.display(), "reading bracket tables");
                let file = File::open(path).map_err(|source| io_error(path, source))?;
                CatalogLoader::load(&jurisdictions, file)
            }
            None => CatalogLoader::load(&jurisdictions, EMBEDDED_BRACKETS.as_bytes()),
        }
    }

    /// Human-readable summary of the configured sources.
    pub fn describe(&self) -> String {
        fn source(path: &Option<PathBuf>) -> String {
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "embedded".to_string())
        }
        format!(
            "jurisdictions: {}, brackets: {}",
            source(&self.jurisdictions),
            source(&self.brackets)
        )
    }
}

fn io_error(
    path: &Path,
    source: std::io::Error,
) -> CatalogLoaderError {
    CatalogLoaderError::Io {
        path: path.to_path_buf(),
        source,
    }
}
