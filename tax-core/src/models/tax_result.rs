use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Bracket;

/// Outcome of a tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Tax owed, rounded half-up to whole currency units. Never negative.
    pub tax_liability: Decimal,

    /// Liability as a percentage of gross income, at full precision.
    /// Zero when gross income is zero.
    pub effective_rate: Decimal,

    /// The bracket the liability was computed from.
    pub applied_bracket: Bracket,

    pub taxable_income: Decimal,

    /// Deduction subtracted from gross income (standard or capped additional).
    pub deduction_applied: Decimal,

    pub used_standard_deduction: bool,
}
