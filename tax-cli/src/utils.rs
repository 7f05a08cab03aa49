use rust_decimal::Decimal;
use tax_core::TaxEngineError;
use tax_core::calculations::common::round_half_up;

/// Currency prefixes stripped before parsing. Longest first.
const CURRENCY_PREFIXES: [&str; 4] = ["C$", "$", "£", "€"];

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// currency symbol and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let unprefixed = CURRENCY_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    unprefixed.trim().replace(',', "")
}

/// Parses a user-formatted amount such as `"60,000"` or `"$1,234.50"`.
///
/// Empty or whitespace-only input is treated as 0. Anything that is not a
/// plain decimal number (including `NaN` and `inf`) is rejected as
/// [`TaxEngineError::InvalidInput`] for `field`. Sign checks are left to the
/// engine.
pub fn parse_amount(
    field: &'static str,
    s: &str,
) -> Result<Decimal, TaxEngineError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, field, "invalid amount: {}", e);
        TaxEngineError::InvalidInput {
            field,
            reason: format!("'{s}' is not a number"),
        }
    })
}

/// Inserts `,` between every group of three integer digits.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount as whole currency units, e.g. `$5,204`.
pub fn format_currency(
    amount: Decimal,
    symbol: &str,
) -> String {
    let rounded = round_half_up(amount, 0);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("{sign}{symbol}{}", group_thousands(&digits))
}

/// Formats a percentage with two decimal places, e.g. `8.67%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate, 2))
}
