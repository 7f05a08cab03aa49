//! Progressive bracket tax engine.
//!
//! Computes a tax liability from a [`JurisdictionTaxSystem`] and a
//! [`TaxQuery`] in a fixed sequence of steps:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Validate amounts and the jurisdiction id |
//! | 2    | Select the bracket table for the filing status |
//! | 3    | Deduction: capped additional deductions if positive, else the standard deduction |
//! | 4    | Taxable income (gross - deduction, minimum 0) |
//! | 5    | Locate the bracket (`income > min` and `income <= max`, else the first bracket) |
//! | 6    | Raw tax (`taxable income × rate - base offset`) |
//! | 7    | Tax after credits (minimum 0) |
//! | 8    | Effective rate (`tax / gross × 100`, 0 when gross is 0) |
//! | 9    | Liability rounded half-up to whole units |
//!
//! The engine is pure: no I/O, no logging, no shared state.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::{
//!     Bracket, BracketTable, FilingStatus, JurisdictionTaxSystem, StandardDeduction, TaxQuery,
//!     compute,
//! };
//!
//! let table = BracketTable::new(vec![
//!     Bracket { min: dec!(0), max: Some(dec!(11000)), rate: dec!(0.10), base_offset: dec!(0) },
//!     Bracket { min: dec!(11000), max: Some(dec!(44725)), rate: dec!(0.12), base_offset: dec!(1100) },
//!     Bracket { min: dec!(44725), max: None, rate: dec!(0.22), base_offset: dec!(5147) },
//! ])
//! .unwrap();
//!
//! let system = JurisdictionTaxSystem {
//!     id: "US".to_string(),
//!     name: "United States".to_string(),
//!     currency_symbol: "$".to_string(),
//!     single: table.clone(),
//!     joint: table,
//!     standard_deduction: StandardDeduction { single: dec!(12950), joint: dec!(25900) },
//!     max_deductible_amount: dec!(50000),
//! };
//!
//! let query = TaxQuery::new("US", FilingStatus::Single, dec!(60000));
//! let result = compute(&system, &query).unwrap();
//!
//! assert_eq!(result.taxable_income, dec!(47050));
//! assert_eq!(result.tax_liability, dec!(5204));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{floor_at_zero, round_to_whole_units};
use crate::error::TaxEngineError;
use crate::models::{Bracket, JurisdictionTaxSystem, TaxQuery, TaxResult};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Computes the tax owed for `query` under `system`.
///
/// Shorthand for `TaxEngine::new(system).calculate(query)`.
///
/// # Errors
///
/// * [`TaxEngineError::InvalidInput`] when an amount is negative.
/// * [`TaxEngineError::UnknownJurisdiction`] when the query names a different
///   jurisdiction than `system`.
pub fn compute(
    system: &JurisdictionTaxSystem,
    query: &TaxQuery,
) -> Result<TaxResult, TaxEngineError> {
    TaxEngine::new(system).calculate(query)
}

/// Calculator bound to one jurisdiction.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    system: &'a JurisdictionTaxSystem,
}

impl<'a> TaxEngine<'a> {
    pub fn new(system: &'a JurisdictionTaxSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &'a JurisdictionTaxSystem {
        self.system
    }

    /// Runs every step of the computation and returns the result.
    pub fn calculate(
        &self,
        query: &TaxQuery,
    ) -> Result<TaxResult, TaxEngineError> {
        self.validate(query)?;

        let table = self.system.brackets(query.filing_status);

        let (deduction, used_standard) = self.determine_deduction(query);

        let taxable_income = self.taxable_income(query.gross_income, deduction);

        let bracket = table.find(taxable_income);

        let raw_tax = self.raw_tax(taxable_income, bracket);

        let tax = self.tax_after_credits(raw_tax, query.tax_credits);

        let effective_rate = self.effective_rate(tax, query.gross_income);

        Ok(TaxResult {
            tax_liability: round_to_whole_units(tax),
            effective_rate,
            applied_bracket: bracket.clone(),
            taxable_income,
            deduction_applied: deduction,
            used_standard_deduction: used_standard,
        })
    }

    fn validate(
        &self,
        query: &TaxQuery,
    ) -> Result<(), TaxEngineError> {
        if !self.system.matches_id(&query.jurisdiction) {
            return Err(TaxEngineError::UnknownJurisdiction(
                query.jurisdiction.clone(),
            ));
        }
        check_non_negative("gross_income", query.gross_income)?;
        check_non_negative("additional_deductions", query.additional_deductions)?;
        check_non_negative("tax_credits", query.tax_credits)
    }

    /// Chooses between the capped additional deductions and the standard
    /// deduction. Returns the amount and whether the standard one was used.
    fn determine_deduction(
        &self,
        query: &TaxQuery,
    ) -> (Decimal, bool) {
        if query.additional_deductions > Decimal::ZERO {
            (
                query
                    .additional_deductions
                    .min(self.system.max_deductible_amount),
                false,
            )
        } else {
            (self.system.standard_deduction(query.filing_status), true)
        }
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        deduction: Decimal,
    ) -> Decimal {
        floor_at_zero(gross_income - deduction)
    }

    fn raw_tax(
        &self,
        taxable_income: Decimal,
        bracket: &Bracket,
    ) -> Decimal {
        taxable_income * bracket.rate - bracket.base_offset
    }

    /// Raw tax can be negative when a later bracket has a lower rate; it is
    /// floored first so that subtracting credits cannot overflow.
    fn tax_after_credits(
        &self,
        raw_tax: Decimal,
        credits: Decimal,
    ) -> Decimal {
        floor_at_zero(floor_at_zero(raw_tax) - credits)
    }

    fn effective_rate(
        &self,
        tax: Decimal,
        gross_income: Decimal,
    ) -> Decimal {
        if gross_income > Decimal::ZERO {
            tax / gross_income * ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}

fn check_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxEngineError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(TaxEngineError::invalid(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}
