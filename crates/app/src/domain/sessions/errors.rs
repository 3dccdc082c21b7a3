//! Identity provider errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::http::TransportFailure;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("could not reach the identity provider")]
    Network(#[source] reqwest::Error),

    /// Provider error code or message, e.g. `EMAIL_NOT_FOUND`.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("unexpected identity provider response")]
    Decode(#[from] serde_json::Error),

    #[error("email and password are required")]
    MissingCredentials,

    #[error("no identity provider API key configured")]
    MissingApiKey,

    #[error("identity URL cannot be used as a base URL")]
    InvalidBaseUrl,
}

impl From<reqwest::Error> for IdentityError {
    fn from(error: reqwest::Error) -> Self {
        match TransportFailure::of(&error) {
            TransportFailure::Timeout => Self::Timeout(error),
            TransportFailure::Network => Self::Network(error),
        }
    }
}
