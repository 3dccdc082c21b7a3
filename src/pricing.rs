//! Pricing
//!
//! Subtotal, tax and total for a set of line items. Amounts are exact decimals
//! in major currency units and are never rounded here; rounding only happens
//! when converting to minor units or formatting for display.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;

use crate::carts::{Cart, CartLineItem};

/// Flat sales tax rate applied to every cart (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Errors raised when moving amounts out of decimal space.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The currency code is not a known ISO 4217 currency.
    #[error("unknown currency `{0}`")]
    UnknownCurrency(String),

    /// The amount does not fit in minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// Sum of price × quantity over `items`. Zero for no items.
pub fn compute_subtotal(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .map(|item| item.product().price * Decimal::from(item.quantity()))
        .sum()
}

/// Tax owed on `subtotal` at `rate`.
pub fn compute_tax(subtotal: Decimal, rate: Decimal) -> Decimal {
    subtotal * rate
}

/// Subtotal plus tax.
pub fn compute_total(subtotal: Decimal, tax: Decimal) -> Decimal {
    subtotal + tax
}

/// Derived prices for a cart at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingSnapshot {
    /// Sum of line prices
    pub subtotal: Decimal,

    /// Tax on the subtotal
    pub tax: Decimal,

    /// Amount to charge
    pub total: Decimal,
}

impl PricingSnapshot {
    /// Price `items` at `rate`.
    pub fn from_items(items: &[CartLineItem], rate: Decimal) -> Self {
        let subtotal = compute_subtotal(items);
        let tax = compute_tax(subtotal, rate);

        Self {
            subtotal,
            tax,
            total: compute_total(subtotal, tax),
        }
    }

    /// Price `cart` at the standard [`TAX_RATE`].
    pub fn for_cart(cart: &Cart) -> Self {
        Self::from_items(cart.items(), TAX_RATE)
    }
}

/// Look up an ISO 4217 currency, ignoring case.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] for unknown codes.
pub fn find_currency(code: &str) -> Result<&'static Currency, PricingError> {
    Currency::find(&code.to_ascii_uppercase())
        .ok_or_else(|| PricingError::UnknownCurrency(code.to_string()))
}

/// Convert a major-unit amount into the currency's minor unit, rounding half
/// away from zero (`27.005` USD becomes `2701`).
///
/// # Errors
///
/// Returns a [`PricingError`] for unknown currencies or amounts that overflow
/// an `i64`.
pub fn to_minor_units(amount: Decimal, currency: &str) -> Result<i64, PricingError> {
    let currency = find_currency(currency)?;

    minor_units_for(amount, currency)
}

fn minor_units_for(amount: Decimal, currency: &Currency) -> Result<i64, PricingError> {
    let rounded =
        amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);

    let scale = Decimal::from(10_i64.pow(currency.exponent));

    rounded
        .checked_mul(scale)
        .and_then(|minor| minor.trunc().to_i64())
        .ok_or(PricingError::OutOfRange(amount))
}

/// Render an amount with the currency's symbol and precision (`$27.00`).
///
/// # Errors
///
/// Returns a [`PricingError`] for unknown currencies or out of range amounts.
pub fn format_amount(amount: Decimal, currency: &str) -> Result<String, PricingError> {
    let currency = find_currency(currency)?;
    let minor = minor_units_for(amount, currency)?;

    Ok(format!("{}", Money::from_minor(minor, currency)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use super::*;
    use crate::products::test_support::product;

    fn line(id: u64, cents: i64, quantity: u32) -> CartLineItem {
        CartLineItem::with_quantity(Arc::new(product(id, cents)), quantity)
    }

    #[test]
    fn tax_rate_is_eight_percent() {
        assert_eq!(TAX_RATE, Decimal::new(8, 2));
    }

    #[test]
    fn empty_subtotal_is_zero() {
        assert_eq!(compute_subtotal(&[]), Decimal::ZERO);
    }

    #[test]
    fn reference_cart_prices() {
        let items = [line(1, 10_00, 2), line(2, 5_00, 1)];

        let pricing = PricingSnapshot::from_items(&items, TAX_RATE);

        assert_eq!(pricing.subtotal, Decimal::new(25_00, 2));
        assert_eq!(pricing.tax, Decimal::new(2_00, 2));
        assert_eq!(pricing.total, Decimal::new(27_00, 2));
    }

    #[test]
    fn total_is_subtotal_plus_rate() {
        let items = [line(1, 109_95, 3), line(2, 22_30, 1), line(3, 7_99, 4)];

        let pricing = PricingSnapshot::from_items(&items, TAX_RATE);

        assert_eq!(pricing.total, pricing.subtotal + pricing.subtotal * TAX_RATE);
        assert_eq!(
            pricing.subtotal,
            Decimal::new(109_95 * 3 + 22_30 + 7_99 * 4, 2)
        );
    }

    #[test]
    fn repeated_additions_do_not_drift() {
        let items: Vec<CartLineItem> = (0..1_000).map(|id| line(id, 10, 1)).collect();

        assert_eq!(compute_subtotal(&items), Decimal::new(100, 0));
    }

    #[test]
    fn tax_is_not_rounded() {
        let tax = compute_tax(Decimal::new(10_99, 2), TAX_RATE);

        assert_eq!(tax, Decimal::new(8792, 4));
    }

    #[test]
    fn minor_units_round_half_away_from_zero() -> TestResult {
        assert_eq!(to_minor_units(Decimal::new(27_00, 2), "USD")?, 2700);
        assert_eq!(to_minor_units(Decimal::new(27_005, 3), "USD")?, 2701);
        assert_eq!(to_minor_units(Decimal::new(11_8692, 4), "usd")?, 1187);

        Ok(())
    }

    #[test]
    fn minor_units_respect_currency_exponent() -> TestResult {
        assert_eq!(to_minor_units(Decimal::new(1_500, 0), "JPY")?, 1500);

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert_eq!(
            to_minor_units(Decimal::ONE, "XYZ"),
            Err(PricingError::UnknownCurrency("XYZ".to_string()))
        );
    }

    #[test]
    fn formats_with_symbol() -> TestResult {
        assert_eq!(format_amount(Decimal::new(27_00, 2), "USD")?, "$27.00");

        Ok(())
    }
}
