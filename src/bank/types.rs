//! Types used throughout the banking system.
use crate::bank::LedgerError;

/// Decimal precision for monetary values.
/// This is used to convert floating-point values to fixed-point representation.
pub const DECIMAL_PRECISION: f64 = 10000.0;

/// Decimal precision for rates, finer than money so rates like 0.00125 stay exact.
pub const RATE_PRECISION: f64 = 100_000_000.0;

/// Integer form of [`RATE_PRECISION`], used for fixed-point multiplication.
pub const RATE_SCALE: i64 = 100_000_000;

/// The first account number handed out by a fresh ledger.
pub const FIRST_ACCOUNT_NUMBER: u64 = 1000;

/// Customer ID type, chosen by whoever registers the customer.
pub type CustomerId = String;

/// Account number type, minted by the ledger.
pub type AccountNumber = String;

/// Money type, representing a fixed-point monetary value.
pub type Money = i64;

/// Rate type, a fixed-point fraction scaled by [`RATE_PRECISION`] (0.05 is 5_000_000).
pub type Rate = i64;

/// Scales a floating-point value, rejecting anything that does not fit an `i64`.
fn scale(value: f64, precision: f64) -> Result<i64, LedgerError> {
    let scaled = (value * precision).round();
    // i64::MAX as f64 rounds up to 2^63, which itself is out of range
    if scaled.is_finite() && scaled >= i64::MIN as f64 && scaled < i64::MAX as f64 {
        Ok(scaled as i64)
    } else {
        Err(LedgerError::AmountOutOfRange)
    }
}

/// Converts a floating-point amount to [`Money`], rounding to the nearest unit.
pub fn to_fixed(value: f64) -> Result<Money, LedgerError> {
    scale(value, DECIMAL_PRECISION)
}

/// Converts a floating-point fraction to a [`Rate`], rounding to the nearest unit.
pub fn to_rate(value: f64) -> Result<Rate, LedgerError> {
    scale(value, RATE_PRECISION)
}

/// Converts [`Money`] back to floating-point for display.
pub fn to_float(money: Money) -> f64 {
    money as f64 / DECIMAL_PRECISION
}

/// Converts a [`Rate`] back to floating-point for display.
pub fn rate_to_float(rate: Rate) -> f64 {
    rate as f64 / RATE_PRECISION
}

/// Multiplies a monetary value by a rate, truncating toward zero.
/// Returns `None` if the product does not fit in [`Money`].
pub fn apply_rate(money: Money, rate: Rate) -> Option<Money> {
    Money::try_from(money as i128 * rate as i128 / RATE_SCALE as i128).ok()
}
