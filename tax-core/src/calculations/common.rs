//! Common utility functions for tax calculations.
//!
//! Rounding and clamping helpers shared by the engine and by callers that
//! format results for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
///
/// Values exactly at the midpoint are rounded away from zero, which is the
/// usual financial convention for non-negative amounts.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(5203.5), 0), dec!(5204));
/// assert_eq!(round_half_up(dec!(5203.49), 0), dec!(5203));
/// assert_eq!(round_half_up(dec!(8.675), 2), dec!(8.68));
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an amount to whole currency units.
pub fn round_to_whole_units(value: Decimal) -> Decimal {
    round_half_up(value, 0)
}

/// Returns `value`, or zero when `value` is negative.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-796)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(5204)), dec!(5204));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
