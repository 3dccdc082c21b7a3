//! Checkout errors.

use storefront::pricing::PricingError;
use thiserror::Error;

use crate::domain::{orders::OrdersLedgerError, payments::PaymentError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("sign in required")]
    AuthRequired,

    #[error("cart is empty")]
    EmptyCart,

    #[error("a checkout is already in progress")]
    AlreadyInProgress,

    #[error("order total must be greater than zero")]
    InvalidAmount,

    #[error("cannot price the cart")]
    Pricing(#[from] PricingError),

    #[error("payment failed: {0}")]
    Gateway(#[from] PaymentError),

    /// The customer has been charged but no order record exists.
    #[error("payment succeeded but the order record failed to save")]
    PostPaymentCommitFailure {
        payment_intent_id: Option<String>,
        #[source]
        source: OrdersLedgerError,
    },
}

impl CheckoutError {
    /// Short heading for the message.
    pub fn title(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Login Required",
            Self::EmptyCart => "Cart Empty",
            Self::AlreadyInProgress => "Checkout In Progress",
            Self::PostPaymentCommitFailure { .. } => "Order Not Saved",
            Self::InvalidAmount | Self::Pricing(_) | Self::Gateway(_) => "Payment Error",
        }
    }

    /// The single human readable message for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRequired => "Please login to complete the purchase.".to_string(),
            Self::EmptyCart => "Add items to the cart before checkout.".to_string(),
            Self::AlreadyInProgress => {
                "A checkout is already in progress. Please wait for it to finish.".to_string()
            }
            Self::InvalidAmount => "The order total must be greater than zero.".to_string(),
            Self::Pricing(error) => error.to_string(),
            Self::Gateway(error) => error.to_string(),
            Self::PostPaymentCommitFailure {
                payment_intent_id, ..
            } => match payment_intent_id {
                Some(reference) => format!(
                    "Your payment succeeded but the order record failed to save. \
                     Please contact support with payment reference {reference}."
                ),
                None => "Your payment succeeded but the order record failed to save. \
                         Please contact support."
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn gateway_message_is_passed_through() {
        let error = CheckoutError::from(PaymentError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid amount".to_string(),
        });

        assert_eq!(error.title(), "Payment Error");
        assert_eq!(error.user_message(), "Invalid amount");
    }

    #[test]
    fn commit_failure_is_distinguished() {
        let error = CheckoutError::PostPaymentCommitFailure {
            payment_intent_id: Some("pi_42".to_string()),
            source: OrdersLedgerError::InvalidData,
        };

        assert_eq!(error.title(), "Order Not Saved");
        assert!(error.user_message().contains("payment succeeded"));
        assert!(error.user_message().contains("pi_42"));
    }
}
