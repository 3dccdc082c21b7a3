//! Orders
//!
//! An order is the immutable record of a paid cart. It is created once by a
//! completed checkout and never changed afterwards.

use std::fmt::{self, Display, Formatter};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    carts::{Cart, CartLineItem},
    pricing::PricingSnapshot,
    sessions::UserId,
};

/// Ledger assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an identifier assigned by the order ledger.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An order about to be written to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Owner
    pub user_id: UserId,

    /// Snapshot of the cart at purchase time
    pub items: Vec<CartLineItem>,

    /// Sum of line prices
    pub subtotal: Decimal,

    /// Tax charged
    pub tax: Decimal,

    /// Amount charged
    pub total: Decimal,

    /// ISO 4217 currency code
    pub currency: String,

    /// Payment gateway reference, when the gateway returned one
    pub payment_intent_id: Option<String>,
}

impl NewOrder {
    /// Snapshot `cart` and its `pricing` for `user_id`.
    pub fn from_cart(
        user_id: UserId,
        cart: &Cart,
        pricing: PricingSnapshot,
        payment_intent_id: Option<String>,
    ) -> Self {
        Self {
            user_id,
            items: cart.items().to_vec(),
            subtotal: pricing.subtotal,
            tax: pricing.tax,
            total: pricing.total,
            currency: cart.currency().to_string(),
            payment_intent_id,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Ledger identifier
    pub id: OrderId,

    /// Owner
    pub user_id: UserId,

    /// Items purchased
    pub items: Vec<CartLineItem>,

    /// Sum of line prices
    pub subtotal: Decimal,

    /// Tax charged
    pub tax: Decimal,

    /// Amount charged
    pub total: Decimal,

    /// ISO 4217 currency code
    pub currency: String,

    /// Ledger timestamp
    pub created_at: Timestamp,

    /// Payment gateway reference
    pub payment_intent_id: Option<String>,
}

impl Order {
    /// Combine a written order with the identity and timestamp the ledger
    /// assigned to it.
    pub fn placed(id: OrderId, created_at: Timestamp, order: NewOrder) -> Self {
        Self {
            id,
            user_id: order.user_id,
            items: order.items,
            subtotal: order.subtotal,
            tax: order.tax,
            total: order.total,
            currency: order.currency,
            created_at,
            payment_intent_id: order.payment_intent_id,
        }
    }

    /// Total number of units purchased.
    pub fn unit_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity()))
            .sum()
    }
}
