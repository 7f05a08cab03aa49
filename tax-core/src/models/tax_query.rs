use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Input to a single tax computation.
///
/// Amounts are already parsed; turning `"60,000"` into a number is the
/// caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxQuery {
    pub jurisdiction: String,
    pub filing_status: FilingStatus,
    pub gross_income: Decimal,

    /// Itemized-style deductions. When positive they replace the standard
    /// deduction, capped at the jurisdiction's maximum.
    #[serde(default)]
    pub additional_deductions: Decimal,

    #[serde(default)]
    pub tax_credits: Decimal,
}

impl TaxQuery {
    /// Creates a query with no additional deductions and no credits.
    pub fn new(
        jurisdiction: impl Into<String>,
        filing_status: FilingStatus,
        gross_income: Decimal,
    ) -> Self {
        Self {
            jurisdiction: jurisdiction.into(),
            filing_status,
            gross_income,
            additional_deductions: Decimal::ZERO,
            tax_credits: Decimal::ZERO,
        }
    }

    pub fn with_deductions(
        mut self,
        additional_deductions: Decimal,
    ) -> Self {
        self.additional_deductions = additional_deductions;
        self
    }

    pub fn with_credits(
        mut self,
        tax_credits: Decimal,
    ) -> Self {
        self.tax_credits = tax_credits;
        self
    }
}
