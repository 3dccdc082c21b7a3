//! Outbound HTTP
//!
//! Every remote service shares one `reqwest` client with a bounded timeout.
//! Responses are read fully into a [`RawResponse`] so decoding can be done by
//! plain functions that never touch the network.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;

use crate::config::http::HttpConfig;

/// Build the shared HTTP client.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!("storefront/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Transport failure classes shared by the remote services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    /// The request did not finish within the configured timeout.
    Timeout,

    /// Connection, TLS or protocol failure.
    Network,
}

impl TransportFailure {
    /// Classify a `reqwest` error.
    pub fn of(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Network
        }
    }
}

/// Status and body of a completed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,

    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Build a response from parts.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Error message carried by a `{"error": "..."}` or `{"error": {"message": "..."}}`
    /// body, falling back to the raw text.
    pub fn error_message(&self) -> String {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ErrorField {
            Text(String),
            Detailed { message: String },
        }

        #[derive(Deserialize)]
        struct ErrorBody {
            error: ErrorField,
        }

        match serde_json::from_str::<ErrorBody>(&self.body) {
            Ok(ErrorBody {
                error: ErrorField::Text(message) | ErrorField::Detailed { message },
            }) => message,
            Err(_) if self.body.trim().is_empty() => self.status.to_string(),
            Err(_) => self.body.trim().to_string(),
        }
    }
}

/// Send `request` and read the whole body.
///
/// # Errors
///
/// Returns the transport error when sending or reading fails.
pub async fn send(request: RequestBuilder) -> Result<RawResponse, reqwest::Error> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    Ok(RawResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_reads_plain_error_field() {
        let response = RawResponse::new(StatusCode::BAD_REQUEST, r#"{"error":"Invalid amount"}"#);

        assert_eq!(response.error_message(), "Invalid amount");
    }

    #[test]
    fn error_message_reads_nested_error_message() {
        let response = RawResponse::new(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND"}}"#,
        );

        assert_eq!(response.error_message(), "EMAIL_NOT_FOUND");
    }

    #[test]
    fn error_message_falls_back_to_body_or_status() {
        let text = RawResponse::new(StatusCode::BAD_GATEWAY, " upstream down ");
        assert_eq!(text.error_message(), "upstream down");

        let empty = RawResponse::new(StatusCode::BAD_GATEWAY, "");
        assert_eq!(empty.error_message(), "502 Bad Gateway");
    }
}
