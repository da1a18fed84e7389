//! Prices

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso};
use thiserror::Error;

/// Currency every catalog price is denominated in.
pub const CURRENCY: &iso::Currency = iso::USD;

/// A price in the catalog currency.
pub type Price = Money<'static, iso::Currency>;

/// Errors that can occur while parsing a price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The value is not a decimal number.
    #[error("invalid price: '{0}'")]
    Invalid(String),

    /// The value is below zero.
    #[error("price cannot be negative: '{0}'")]
    Negative(String),
}

/// Creates a price from a number of cents.
pub fn cents(minor_units: i64) -> Price {
    Money::from_minor(minor_units, CURRENCY)
}

/// A zero price.
pub fn zero() -> Price {
    cents(0)
}

/// Parse a decimal price string (e.g. `"2.99"` or `"$2.99"`), rounding to whole cents.
///
/// # Errors
///
/// - [`PriceError::Invalid`]: the string is not a decimal number.
/// - [`PriceError::Negative`]: the amount is below zero.
pub fn parse_price(s: &str) -> Result<Price, PriceError> {
    let trimmed = s.trim();
    let amount_str = trimmed.strip_prefix('$').unwrap_or(trimmed);

    let amount = amount_str
        .parse::<Decimal>()
        .map_err(|_err| PriceError::Invalid(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PriceError::Invalid(s.to_string()))?;

    Ok(cents(minor_units))
}

/// Price of `quantity` units at `unit_price`.
pub fn line_total(unit_price: &Price, quantity: u32) -> Price {
    cents(
        unit_price
            .to_minor_units()
            .saturating_mul(i64::from(quantity)),
    )
}

/// Sums a sequence of prices.
///
/// # Errors
///
/// Returns a [`MoneyError`] if the prices are in different currencies.
pub fn sum_prices<'p>(prices: impl IntoIterator<Item = &'p Price>) -> Result<Price, MoneyError> {
    prices
        .into_iter()
        .try_fold(zero(), |acc, price| acc.add(*price))
}
