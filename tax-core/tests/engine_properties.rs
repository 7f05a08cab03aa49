//! Property and scenario tests that exercise the engine through the public
//! API only, against hand-built US (2023) and UK tables.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::{
    Bracket, BracketTable, FilingStatus, JurisdictionCatalog, JurisdictionTaxSystem,
    StandardDeduction, TaxEngineError, TaxQuery, compute,
};

fn table(rows: &[(Decimal, Option<Decimal>, Decimal, Decimal)]) -> BracketTable {
    BracketTable::new(
        rows.iter()
            .map(|&(min, max, rate, base_offset)| Bracket {
                min,
                max,
                rate,
                base_offset,
            })
            .collect(),
    )
    .expect("test table should be valid")
}

fn us() -> JurisdictionTaxSystem {
    JurisdictionTaxSystem {
        id: "US".to_string(),
        name: "United States".to_string(),
        currency_symbol: "$".to_string(),
        single: table(&[
            (dec!(0), Some(dec!(11000)), dec!(0.10), dec!(0)),
            (dec!(11000), Some(dec!(44725)), dec!(0.12), dec!(1100)),
            (dec!(44725), Some(dec!(95375)), dec!(0.22), dec!(5147)),
            (dec!(95375), Some(dec!(182100)), dec!(0.24), dec!(16290)),
            (dec!(182100), Some(dec!(231250)), dec!(0.32), dec!(37104)),
            (dec!(231250), Some(dec!(578125)), dec!(0.35), dec!(52832)),
            (dec!(578125), None, dec!(0.37), dec!(174238.25)),
        ]),
        joint: table(&[
            (dec!(0), Some(dec!(22000)), dec!(0.10), dec!(0)),
            (dec!(22000), Some(dec!(89450)), dec!(0.12), dec!(2200)),
            (dec!(89450), Some(dec!(190750)), dec!(0.22), dec!(10294)),
            (dec!(190750), Some(dec!(364200)), dec!(0.24), dec!(32580)),
            (dec!(364200), Some(dec!(462500)), dec!(0.32), dec!(74208)),
            (dec!(462500), Some(dec!(693750)), dec!(0.35), dec!(105664)),
            (dec!(693750), None, dec!(0.37), dec!(186601.5)),
        ]),
        standard_deduction: StandardDeduction {
            single: dec!(12950),
            joint: dec!(25900),
        },
        max_deductible_amount: dec!(50000),
    }
}

fn uk() -> JurisdictionTaxSystem {
    let bands = table(&[
        (dec!(0), Some(dec!(37700)), dec!(0.20), dec!(0)),
        (dec!(37700), Some(dec!(125140)), dec!(0.40), dec!(7540)),
        (dec!(125140), None, dec!(0.45), dec!(42516)),
    ]);
    JurisdictionTaxSystem {
        id: "UK".to_string(),
        name: "United Kingdom".to_string(),
        currency_symbol: "£".to_string(),
        single: bands.clone(),
        joint: bands,
        standard_deduction: StandardDeduction {
            single: dec!(12570),
            joint: dec!(12570),
        },
        max_deductible_amount: dec!(20000),
    }
}

fn catalog() -> JurisdictionCatalog {
    JurisdictionCatalog::new(vec![us(), uk()]).expect("catalog should build")
}

/// Tax on `income` summed bracket by bracket (no offsets involved).
fn tax_by_summation(
    table: &BracketTable,
    income: Decimal,
) -> Decimal {
    table
        .iter()
        .map(|b| {
            let top = b.max.map_or(income, |max| max.min(income));
            (top - b.min).max(Decimal::ZERO) * b.rate
        })
        .sum()
}

fn amount(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

fn status() -> impl Strategy<Value = FilingStatus> {
    prop_oneof![Just(FilingStatus::Single), Just(FilingStatus::Joint)]
}

fn jurisdiction() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("US"), Just("UK")]
}

// =============================================================================
// table invariants
// =============================================================================

#[test]
fn every_table_is_contiguous_and_open_ended() {
    for system in catalog().systems() {
        for status in FilingStatus::ALL {
            let brackets = system.brackets(status).brackets();
            for pair in brackets.windows(2) {
                assert_eq!(pair[0].max, Some(pair[1].min));
            }
            assert_eq!(brackets.last().and_then(|b| b.max), None);
        }
    }
}

#[test]
fn every_base_offset_equals_tax_summed_below_its_min() {
    for system in catalog().systems() {
        for status in FilingStatus::ALL {
            let table = system.brackets(status);
            for bracket in table {
                assert_eq!(
                    bracket.base_offset,
                    tax_by_summation(table, bracket.min),
                    "{} {status}: offset of bracket starting at {}",
                    system.id,
                    bracket.min
                );
            }
        }
    }
}

// =============================================================================
// reference scenarios
// =============================================================================

#[test]
fn us_single_60000() {
    let result = catalog()
        .compute(&TaxQuery::new("US", FilingStatus::Single, dec!(60000)))
        .unwrap();

    assert_eq!(result.taxable_income, dec!(47050));
    assert_eq!(result.applied_bracket.min, dec!(44725));
    assert_eq!(result.applied_bracket.max, Some(dec!(95375)));
    assert_eq!(result.tax_liability, dec!(5204));
    assert_eq!(result.effective_rate.round_dp(2), dec!(8.67));
}

#[test]
fn us_single_60000_with_large_credit() {
    let query = TaxQuery::new("US", FilingStatus::Single, dec!(60000)).with_credits(dec!(6000));

    let result = catalog().compute(&query).unwrap();

    assert_eq!(result.tax_liability, dec!(0));
}

#[test]
fn uk_income_below_personal_allowance() {
    let result = catalog()
        .compute(&TaxQuery::new("UK", FilingStatus::Single, dec!(10000)))
        .unwrap();

    assert_eq!(result.taxable_income, dec!(0));
    assert_eq!(result.tax_liability, dec!(0));
    assert_eq!(result.effective_rate, dec!(0));
}

#[test]
fn uk_higher_rate_band() {
    let result = catalog()
        .compute(&TaxQuery::new("UK", FilingStatus::Single, dec!(60000)))
        .unwrap();

    // 47430 * 0.40 - 7540 = 11432
    assert_eq!(result.taxable_income, dec!(47430));
    assert_eq!(result.tax_liability, dec!(11432));
}

#[test]
fn unknown_jurisdiction_is_reported() {
    let result = catalog().compute(&TaxQuery::new("FR", FilingStatus::Single, dec!(1)));

    assert_eq!(
        result,
        Err(TaxEngineError::UnknownJurisdiction("FR".to_string()))
    );
}

#[test]
fn unknown_filing_status_is_reported_at_parse_time() {
    assert_eq!(
        "separate".parse::<FilingStatus>(),
        Err(TaxEngineError::UnknownFilingStatus("separate".to_string()))
    );
}

// =============================================================================
// bracket edges
//
// The lower bound is exclusive and the upper bound inclusive: taxable income
// sitting exactly on an edge is taxed in the lower bracket, one cent above it
// in the upper bracket.
// =============================================================================

#[test]
fn every_edge_is_taxed_by_the_lower_bracket() {
    for system in catalog().systems() {
        for status in FilingStatus::ALL {
            let table = system.brackets(status);
            let deduction = system.standard_deduction(status);
            for pair in table.brackets().windows(2) {
                let (lower, upper) = (&pair[0], &pair[1]);
                let edge = upper.min;

                let on_edge = compute(
                    system,
                    &TaxQuery::new(system.id.as_str(), status, edge + deduction),
                )
                .unwrap();
                let past_edge = compute(
                    system,
                    &TaxQuery::new(system.id.as_str(), status, edge + deduction + dec!(0.01)),
                )
                .unwrap();

                assert_eq!(on_edge.applied_bracket, *lower);
                assert_eq!(
                    on_edge.tax_liability,
                    (edge * lower.rate - lower.base_offset).round_dp_with_strategy(
                        0,
                        rust_decimal::RoundingStrategy::MidpointAwayFromZero
                    )
                );
                assert_eq!(past_edge.applied_bracket, *upper);
            }
        }
    }
}

#[test]
fn first_bracket_edge_values_for_us_single() {
    let system = us();
    let at = |taxable: Decimal| {
        compute(
            &system,
            &TaxQuery::new("US", FilingStatus::Single, taxable + dec!(12950)),
        )
        .unwrap()
    };

    let on_edge = at(dec!(11000));
    let past_edge = at(dec!(11001));

    // 11000 * 0.10 - 0 and 11001 * 0.12 - 1100
    assert_eq!(on_edge.tax_liability, dec!(1100));
    assert_eq!(past_edge.tax_liability, dec!(220));
}

// =============================================================================
// properties
// =============================================================================

proptest! {
    #[test]
    fn liability_is_never_negative(
        id in jurisdiction(),
        status in status(),
        gross in amount(100_000_000_00),
        deductions in amount(1_000_000_00),
        credits in amount(1_000_000_00),
    ) {
        let query = TaxQuery::new(id, status, gross)
            .with_deductions(deductions)
            .with_credits(credits);

        let result = catalog().compute(&query).unwrap();

        prop_assert!(result.tax_liability >= Decimal::ZERO);
        prop_assert!(result.effective_rate >= Decimal::ZERO);
        prop_assert!(result.effective_rate <= Decimal::ONE_HUNDRED);
    }

    #[test]
    fn liability_is_non_decreasing_within_a_bracket(
        id in jurisdiction(),
        status in status(),
        low in amount(1_000_000_00),
        step in amount(2_000_00),
        credits in amount(20_000_00),
    ) {
        let catalog = catalog();
        let high = low + step;
        let low_result = catalog
            .compute(&TaxQuery::new(id, status, low).with_credits(credits))
            .unwrap();
        let high_result = catalog
            .compute(&TaxQuery::new(id, status, high).with_credits(credits))
            .unwrap();
        prop_assume!(low_result.applied_bracket == high_result.applied_bracket);

        prop_assert!(low_result.tax_liability <= high_result.tax_liability);
    }

    #[test]
    fn deductions_above_cap_behave_like_the_cap(
        id in jurisdiction(),
        status in status(),
        gross in amount(1_000_000_00),
        excess in amount(1_000_000_00),
    ) {
        let catalog = catalog();
        let cap = catalog.get(id).unwrap().max_deductible_amount;

        let over = catalog
            .compute(&TaxQuery::new(id, status, gross).with_deductions(cap + excess))
            .unwrap();
        let at_cap = catalog
            .compute(&TaxQuery::new(id, status, gross).with_deductions(cap))
            .unwrap();

        prop_assert_eq!(over, at_cap);
    }

    #[test]
    fn query_survives_json_round_trip(
        id in jurisdiction(),
        status in status(),
        gross in amount(10_000_000_00),
        deductions in amount(100_000_00),
        credits in amount(10_000_00),
    ) {
        let catalog = catalog();
        let query = TaxQuery::new(id, status, gross)
            .with_deductions(deductions)
            .with_credits(credits);

        let json = serde_json::to_string(&query).unwrap();
        let decoded: TaxQuery = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(&decoded, &query);
        prop_assert_eq!(catalog.compute(&decoded), catalog.compute(&query));
    }
}
