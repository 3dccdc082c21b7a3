//! Payment authorization gateway.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use tracing::info;
use url::Url;

use crate::{
    domain::payments::{
        errors::PaymentError,
        models::{PaymentAuthorization, PaymentIntentRequest, PaymentIntentResponse},
    },
    http::{self, RawResponse},
};

/// Client for the payment backend's `create-payment-intent` endpoint.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    http: Client,
    base_url: Url,
}

impl HttpPaymentGateway {
    /// Gateway posting to the backend at `base_url`.
    #[must_use]
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn intent_url(&self) -> Result<Url, PaymentError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| PaymentError::InvalidBaseUrl)?
            .pop_if_empty()
            .push("create-payment-intent");

        Ok(url)
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    #[tracing::instrument(
        name = "payments.gateway.create_payment_intent",
        skip(self, request),
        fields(amount = request.amount, currency = %request.currency, items = request.items.len()),
        err
    )]
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentAuthorization, PaymentError> {
        let response = http::send(self.http.post(self.intent_url()?).json(&request)).await?;

        let authorization = decode_authorization(&response)?;

        info!(
            payment_intent = authorization.payment_intent_id.as_deref().unwrap_or("-"),
            "payment authorized"
        );

        Ok(authorization)
    }
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Request an authorization to charge `request.amount`.
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentAuthorization, PaymentError>;
}

fn decode_authorization(response: &RawResponse) -> Result<PaymentAuthorization, PaymentError> {
    if !response.status.is_success() {
        return Err(PaymentError::Rejected {
            status: response.status,
            message: response.error_message(),
        });
    }

    let parsed: PaymentIntentResponse = serde_json::from_str(&response.body)?;

    match parsed.client_secret {
        Some(client_secret) if !client_secret.is_empty() => Ok(PaymentAuthorization {
            client_secret,
            payment_intent_id: parsed.payment_intent_id,
        }),
        _ => Err(PaymentError::MissingAuthorization),
    }
}
