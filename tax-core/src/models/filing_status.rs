use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaxEngineError;

/// Filing status of a tax query. Each jurisdiction carries one bracket table
/// and one standard deduction per status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingStatus {
    Single,
    Joint,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 2] = [Self::Single, Self::Joint];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Joint => "joint",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Joint => "Married Filing Jointly",
        }
    }
}

impl FromStr for FilingStatus {
    type Err = TaxEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "joint" => Ok(Self::Joint),
            _ => Err(TaxEngineError::UnknownFilingStatus(s.to_string())),
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
