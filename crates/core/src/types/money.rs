//! Price formatting helpers.
//!
//! Prices travel as plain `f64` amounts, matching the remote store's number
//! type. Accumulation (cart totals, line totals) happens in floating point;
//! rounding is applied only at presentation time, to two decimals.

/// Format an amount to two decimals, e.g. `19.99`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Format an amount with a currency symbol, e.g. `$19.99`.
#[must_use]
pub fn format_price(symbol: &str, amount: f64) -> String {
    format!("{symbol}{amount:.2}")
}
