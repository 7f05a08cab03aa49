use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::{
    FilingStatus, JurisdictionCatalog, JurisdictionTaxSystem, TaxEngineError, TaxQuery, TaxResult,
};
use tracing::{debug, info};

use crate::utils::{format_currency, format_percent, parse_amount};

/// Raw, user-formatted input for one estimate.
///
/// Amounts may carry thousands separators or a currency symbol; blank
/// deductions and credits count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstimateForm {
    pub jurisdiction: String,
    pub filing_status: String,
    pub gross_income: String,
    pub additional_deductions: String,
    pub tax_credits: String,
}

impl EstimateForm {
    /// Parses the form into a query. Range checks are left to the engine.
    pub fn to_query(&self) -> Result<TaxQuery, TaxEngineError> {
        let filing_status: FilingStatus = self.filing_status.parse()?;
        let gross_income = parse_amount("gross_income", &self.gross_income)?;
        let additional_deductions =
            parse_amount("additional_deductions", &self.additional_deductions)?;
        let tax_credits = parse_amount("tax_credits", &self.tax_credits)?;

        Ok(
            TaxQuery::new(self.jurisdiction.trim(), filing_status, gross_income)
                .with_deductions(additional_deductions)
                .with_credits(tax_credits),
        )
    }
}

/// A computed estimate together with what is needed to present it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub jurisdiction_name: String,
    pub currency_symbol: String,
    pub query: TaxQuery,
    pub result: TaxResult,
}

impl Estimate {
    fn money(
        &self,
        amount: Decimal,
    ) -> String {
        format_currency(amount, &self.currency_symbol)
    }

    /// Multi-line, human-readable summary.
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Estimate {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = &self.result;
        let bracket = &r.applied_bracket;
        let upper = bracket
            .max
            .map(|max| self.money(max))
            .unwrap_or_else(|| "and above".to_string());
        let deduction_kind = if r.used_standard_deduction {
            "standard"
        } else {
            "additional"
        };

        writeln!(
            f,
            "{} ({}), {}",
            self.jurisdiction_name,
            self.query.jurisdiction,
            self.query.filing_status.label()
        )?;
        writeln!(f, "  Gross income:     {}", self.money(self.query.gross_income))?;
        writeln!(
            f,
            "  Deduction:        {} ({deduction_kind})",
            self.money(r.deduction_applied)
        )?;
        writeln!(f, "  Taxable income:   {}", self.money(r.taxable_income))?;
        writeln!(
            f,
            "  Bracket:          {} to {} at {}",
            self.money(bracket.min),
            upper,
            format_percent(bracket.rate * Decimal::ONE_HUNDRED)
        )?;
        if !self.query.tax_credits.is_zero() {
            writeln!(f, "  Credits:          {}", self.money(self.query.tax_credits))?;
        }
        writeln!(f, "  Tax liability:    {}", self.money(r.tax_liability))?;
        writeln!(f, "  Effective rate:   {}", format_percent(r.effective_rate))
    }
}

/// Builds a query from `form` and computes it against `catalog`.
pub fn estimate(
    catalog: &JurisdictionCatalog,
    form: &EstimateForm,
) -> Result<Estimate, TaxEngineError> {
    let query = form.to_query()?;
    debug!(?query, "parsed estimate form");

    let system = catalog.get(&query.jurisdiction)?;
    let result = tax_core::compute(system, &query)?;
    info!(
        jurisdiction = %system.id,
        status = %query.filing_status,
        liability = %result.tax_liability,
        "estimate computed"
    );

    Ok(Estimate {
        jurisdiction_name: system.name.clone(),
        currency_symbol: system.currency_symbol.clone(),
        query,
        result,
    })
}

/// Every configured jurisdiction with its deductions and brackets.
pub struct CatalogListing<'a>(pub &'a JurisdictionCatalog);

impl fmt::Display for CatalogListing<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for system in self.0.systems() {
            write_system(f, system)?;
        }
        Ok(())
    }
}

fn write_system(
    f: &mut fmt::Formatter<'_>,
    system: &JurisdictionTaxSystem,
) -> fmt::Result {
    let money = |amount: Decimal| format_currency(amount, &system.currency_symbol);

    writeln!(
        f,
        "{} - {} (deduction cap {})",
        system.id,
        system.name,
        money(system.max_deductible_amount)
    )?;
    for status in FilingStatus::ALL {
        writeln!(
            f,
            "  {}: standard deduction {}",
            status.label(),
            money(system.standard_deduction(status))
        )?;
        for bracket in system.brackets(status) {
            let upper = bracket
                .max
                .map(money)
                .unwrap_or_else(|| "and above".to_string());
            writeln!(
                f,
                "    {:>12} to {:<12} {:>7}",
                money(bracket.min),
                upper,
                format_percent(bracket.rate * Decimal::ONE_HUNDRED)
            )?;
        }
    }
    Ok(())
}

/// Lists every configured jurisdiction with its deductions and brackets.
pub fn render_catalog(catalog: &JurisdictionCatalog) -> String {
    CatalogListing(catalog).to_string()
}
