//! Payment models.

use std::fmt::{self, Debug, Formatter};

use serde::{Deserialize, Serialize};
use storefront::{carts::CartLineItem, products::ProductId};

/// Line reference sent with an authorization request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentItem {
    /// Product id
    pub id: ProductId,

    /// Units
    pub quantity: u32,
}

impl From<&CartLineItem> for PaymentItem {
    fn from(item: &CartLineItem) -> Self {
        Self {
            id: item.product_id(),
            quantity: item.quantity(),
        }
    }
}

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentIntentRequest {
    /// Total in the currency's minor unit
    pub amount: i64,

    /// ISO 4217 currency code
    pub currency: String,

    /// Product ids and quantities only
    pub items: Vec<PaymentItem>,
}

/// Credentials handed to the payment sheet.
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentAuthorization {
    /// Opaque client secret
    pub client_secret: String,

    /// Gateway reference stored on the order
    pub payment_intent_id: Option<String>,
}

impl Debug for PaymentAuthorization {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentAuthorization")
            .field("client_secret", &"<redacted>")
            .field("payment_intent_id", &self.payment_intent_id)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentIntentResponse {
    #[serde(default)]
    pub(crate) client_secret: Option<String>,

    #[serde(default)]
    pub(crate) payment_intent_id: Option<String>,
}
