use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BracketTable, FilingStatus};

/// Standard deduction amounts, one per filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardDeduction {
    pub single: Decimal,
    pub joint: Decimal,
}

impl StandardDeduction {
    pub fn for_status(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        match status {
            FilingStatus::Single => self.single,
            FilingStatus::Joint => self.joint,
        }
    }
}

/// Everything the engine needs to know about one jurisdiction.
///
/// Built once from static configuration and only ever read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionTaxSystem {
    /// Short identifier used in queries, e.g. `US` or `UK`.
    pub id: String,
    pub name: String,
    pub currency_symbol: String,
    pub single: BracketTable,
    pub joint: BracketTable,
    pub standard_deduction: StandardDeduction,
    /// Cap applied to user-specified deductions.
    pub max_deductible_amount: Decimal,
}

impl JurisdictionTaxSystem {
    pub fn brackets(
        &self,
        status: FilingStatus,
    ) -> &BracketTable {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::Joint => &self.joint,
        }
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        self.standard_deduction.for_status(status)
    }

    /// Case-insensitive comparison against a query's jurisdiction id.
    pub fn matches_id(
        &self,
        id: &str,
    ) -> bool {
        self.id.eq_ignore_ascii_case(id.trim())
    }
}
