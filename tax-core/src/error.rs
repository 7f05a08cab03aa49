use thiserror::Error;

/// Errors returned by the tax engine.
///
/// Every variant is a local validation failure that the immediate caller is
/// expected to surface (e.g. as a form message). None of them leave state
/// behind, because the engine holds none.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxEngineError {
    /// A numeric input was malformed or out of range.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// No jurisdiction is configured under the requested id.
    #[error("unknown jurisdiction '{0}'")]
    UnknownJurisdiction(String),

    /// The filing status is neither `single` nor `joint`.
    #[error("unknown filing status '{0}' (expected 'single' or 'joint')")]
    UnknownFilingStatus(String),
}

impl TaxEngineError {
    pub(crate) fn invalid(
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}
