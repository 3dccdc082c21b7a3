//! Checkout phases.

use std::fmt::{self, Display, Formatter};

use storefront::orders::OrderId;

/// Where the coordinator is in the checkout flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// No checkout running.
    #[default]
    Idle,

    /// Waiting for the payment backend to authorize the amount.
    Authorizing,

    /// Waiting for the user on the payment sheet.
    CollectingPayment,

    /// Writing the order record.
    Committing,

    /// The last checkout placed an order.
    Succeeded {
        /// Order placed
        order_id: OrderId,
    },

    /// The last checkout failed.
    Failed {
        /// Message shown to the user
        message: String,
    },
}

impl CheckoutPhase {
    /// Whether a checkout is running.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Authorizing | Self::CollectingPayment | Self::Committing
        )
    }
}

impl Display for CheckoutPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Authorizing => f.write_str("authorizing"),
            Self::CollectingPayment => f.write_str("collecting payment"),
            Self::Committing => f.write_str("committing"),
            Self::Succeeded { order_id } => write!(f, "succeeded ({order_id})"),
            Self::Failed { message } => write!(f, "failed ({message})"),
        }
    }
}
