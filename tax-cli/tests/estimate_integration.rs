//! End-to-end tests from user-formatted input to rendered output, using the
//! embedded catalog and the on-disk fixtures of the data crate.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_cli::app::{self, EstimateForm};
use tax_core::TaxEngineError;
use tax_data::{CatalogConfig, default_catalog};

fn data_fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tax-data")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn form(
    jurisdiction: &str,
    status: &str,
    income: &str,
) -> EstimateForm {
    EstimateForm {
        jurisdiction: jurisdiction.to_string(),
        filing_status: status.to_string(),
        gross_income: income.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_formatted_income_matches_plain_income() {
    let catalog = default_catalog().unwrap();

    let formatted = app::estimate(&catalog, &form("US", "single", "$60,000.00")).unwrap();
    let plain = app::estimate(&catalog, &form("us", "SINGLE", "60000")).unwrap();

    assert_eq!(formatted.result, plain.result);
}

#[test]
fn test_credits_zero_the_liability() {
    let catalog = default_catalog().unwrap();
    let form = EstimateForm {
        tax_credits: "6,000".to_string(),
        ..form("US", "single", "60,000")
    };

    let estimate = app::estimate(&catalog, &form).unwrap();

    assert_eq!(estimate.result.tax_liability, dec!(0));
    assert!(estimate.render_text().contains("Credits:          $6,000"));
}

#[test]
fn test_additional_deduction_replaces_standard() {
    let catalog = default_catalog().unwrap();
    let form = EstimateForm {
        additional_deductions: "20,000".to_string(),
        ..form("US", "joint", "100,000")
    };

    let estimate = app::estimate(&catalog, &form).unwrap();

    assert_eq!(estimate.result.deduction_applied, dec!(20000));
    assert!(!estimate.result.used_standard_deduction);
    assert!(estimate.render_text().contains("(additional)"));
}

#[test]
fn test_uk_output_uses_pound_symbol() {
    let catalog = default_catalog().unwrap();

    let text = app::estimate(&catalog, &form("UK", "single", "£60,000"))
        .unwrap()
        .render_text();

    assert!(text.contains("Tax liability:    £11,432"), "{text}");
}

#[test]
fn test_zero_income_reports_zero_rate() {
    let catalog = default_catalog().unwrap();

    let estimate = app::estimate(&catalog, &form("CA", "joint", "")).unwrap();

    assert_eq!(estimate.result.tax_liability, dec!(0));
    assert!(estimate.render_text().contains("Effective rate:   0.00%"));
}

#[test]
fn test_errors_surface_as_engine_errors() {
    let catalog = default_catalog().unwrap();

    assert_eq!(
        app::estimate(&catalog, &form("FR", "single", "1")).unwrap_err(),
        TaxEngineError::UnknownJurisdiction("FR".to_string())
    );
    assert_eq!(
        app::estimate(&catalog, &form("US", "separate", "1")).unwrap_err(),
        TaxEngineError::UnknownFilingStatus("separate".to_string())
    );
    assert!(matches!(
        app::estimate(&catalog, &form("US", "single", "NaN")).unwrap_err(),
        TaxEngineError::InvalidInput { .. }
    ));
}

#[test]
fn test_estimate_against_fixture_catalog() {
    let catalog = CatalogConfig {
        jurisdictions: Some(data_fixture("jurisdictions.toml")),
        brackets: Some(data_fixture("brackets.csv")),
    }
    .load()
    .expect("fixture catalog should load");

    let estimate = app::estimate(&catalog, &form("demo", "joint", "30,000")).unwrap();

    assert_eq!(estimate.result.tax_liability, dec!(3600));
    assert!(app::render_catalog(&catalog).starts_with("DEMO - "));
}

#[test]
fn test_largest_representable_credit_yields_zero() {
    let catalog = default_catalog().unwrap();
    let form = EstimateForm {
        tax_credits: "79,228,162,514,264,337,593,543,950,335".to_string(),
        ..form("US", "single", "60,000")
    };

    let estimate = app::estimate(&catalog, &form).unwrap();

    assert_eq!(estimate.result.tax_liability, dec!(0));
}
