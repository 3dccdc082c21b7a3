//! Catalog service errors.

use reqwest::StatusCode;
use storefront::products::ProductId;
use thiserror::Error;

use crate::http::TransportFailure;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("could not reach the catalog")]
    Network(#[source] reqwest::Error),

    #[error("catalog responded with status {status}: {message}")]
    Remote { status: StatusCode, message: String },

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("unexpected catalog response")]
    Decode(#[from] serde_json::Error),

    #[error("catalog URL cannot be used as a base URL")]
    InvalidBaseUrl,
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        match TransportFailure::of(&error) {
            TransportFailure::Timeout => Self::Timeout(error),
            TransportFailure::Network => Self::Network(error),
        }
    }
}
