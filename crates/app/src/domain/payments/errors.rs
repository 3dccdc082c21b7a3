//! Payment errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::http::TransportFailure;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("could not reach the payment service")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-success status; `message` is its
    /// `error` field.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("unexpected payment service response")]
    Decode(#[from] serde_json::Error),

    #[error("payment service did not return an authorization")]
    MissingAuthorization,

    #[error("payment was declined: {0}")]
    Declined(String),

    #[error("payment was cancelled")]
    UserCancelled,

    #[error("payment prompt failed")]
    Prompt(#[from] std::io::Error),

    #[error("payments URL cannot be used as a base URL")]
    InvalidBaseUrl,
}

impl PaymentError {
    /// Whether this is the user backing out rather than a failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }
}

impl From<reqwest::Error> for PaymentError {
    fn from(error: reqwest::Error) -> Self {
        match TransportFailure::of(&error) {
            TransportFailure::Timeout => Self::Timeout(error),
            TransportFailure::Network => Self::Network(error),
        }
    }
}
