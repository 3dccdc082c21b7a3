//! Identity provider.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use storefront::sessions::{UserId, UserSession};
use tokio::sync::watch;
use tracing::info;
use url::Url;

use crate::{
    domain::sessions::{errors::IdentityError, subscription::AuthSubscription},
    http::{self, RawResponse},
};

const SIGN_IN_METHOD: &str = "accounts:signInWithPassword";
const SIGN_UP_METHOD: &str = "accounts:signUp";
const SEND_OOB_CODE_METHOD: &str = "accounts:sendOobCode";

/// Client for an Identity Toolkit compatible REST API.
///
/// Holds the signed-in user and publishes every change to subscribers.
#[derive(Debug)]
pub struct IdentityToolkitProvider {
    http: Client,
    base_url: Url,
    api_key: String,
    state: watch::Sender<Option<UserSession>>,
}

impl IdentityToolkitProvider {
    /// Provider seeded with `session`, typically restored from the local
    /// cache.
    #[must_use]
    pub fn new(
        http: Client,
        base_url: Url,
        api_key: impl Into<String>,
        session: Option<UserSession>,
    ) -> Self {
        let (state, _receiver) = watch::channel(session);

        Self {
            http,
            base_url,
            api_key: api_key.into(),
            state,
        }
    }

    fn method_url(&self, method: &str) -> Result<Url, IdentityError> {
        if self.api_key.is_empty() {
            return Err(IdentityError::MissingApiKey);
        }

        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| IdentityError::InvalidBaseUrl)?
            .pop_if_empty()
            .extend(["v1", method]);

        url.query_pairs_mut().append_pair("key", &self.api_key);

        Ok(url)
    }

    async fn call<B>(&self, method: &str, body: &B) -> Result<RawResponse, IdentityError>
    where
        B: Serialize + Sync,
    {
        let url = self.method_url(method)?;

        Ok(http::send(self.http.post(url).json(body)).await?)
    }

    fn publish(&self, session: Option<UserSession>) {
        self.state.send_replace(session);
    }
}

#[async_trait]
impl IdentityProvider for IdentityToolkitProvider {
    #[tracing::instrument(name = "sessions.identity.sign_in", skip(self, password), err)]
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, IdentityError> {
        let email = credentials(email, password)?;

        let response = self
            .call(
                SIGN_IN_METHOD,
                &PasswordRequest {
                    email,
                    password,
                    display_name: None,
                    return_secure_token: true,
                },
            )
            .await?;

        let session = decode_session(&response)?;

        info!(user = %session.id, "signed in");

        self.publish(Some(session.clone()));

        Ok(session)
    }

    #[tracing::instrument(name = "sessions.identity.sign_up", skip(self, password), err)]
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<UserSession, IdentityError> {
        let email = credentials(email, password)?;

        let response = self
            .call(
                SIGN_UP_METHOD,
                &PasswordRequest {
                    email,
                    password,
                    display_name: display_name.as_deref().filter(|name| !name.is_empty()),
                    return_secure_token: true,
                },
            )
            .await?;

        let mut session = decode_session(&response)?;

        if session.display_name.is_none() {
            session.display_name = display_name.filter(|name| !name.is_empty());
        }

        info!(user = %session.id, "signed up");

        self.publish(Some(session.clone()));

        Ok(session)
    }

    #[tracing::instrument(name = "sessions.identity.sign_out", skip(self), err)]
    async fn sign_out(&self) -> Result<(), IdentityError> {
        self.publish(None);

        info!("signed out");

        Ok(())
    }

    #[tracing::instrument(name = "sessions.identity.send_password_reset", skip(self), err)]
    async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(IdentityError::MissingCredentials);
        }

        let response = self
            .call(
                SEND_OOB_CODE_METHOD,
                &OobCodeRequest {
                    request_type: "PASSWORD_RESET",
                    email,
                },
            )
            .await?;

        ensure_success(&response)
    }

    fn subscribe(&self) -> AuthSubscription {
        AuthSubscription::new(self.state.subscribe())
    }
}

#[automock]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with email and password. The email is trimmed.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserSession, IdentityError>;

    /// Create an account and sign it in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<UserSession, IdentityError>;

    /// Forget the signed-in user.
    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Ask the provider to email a password reset link.
    async fn send_password_reset(&self, email: &str) -> Result<(), IdentityError>;

    /// Subscribe to authentication state. The current state is visible
    /// immediately.
    fn subscribe(&self) -> AuthSubscription;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'a str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

fn credentials<'a>(email: &'a str, password: &str) -> Result<&'a str, IdentityError> {
    let email = email.trim();

    if email.is_empty() || password.is_empty() {
        return Err(IdentityError::MissingCredentials);
    }

    Ok(email)
}

fn ensure_success(response: &RawResponse) -> Result<(), IdentityError> {
    if response.status.is_success() {
        return Ok(());
    }

    Err(IdentityError::Rejected {
        status: response.status,
        message: response.error_message(),
    })
}

fn decode_session(response: &RawResponse) -> Result<UserSession, IdentityError> {
    ensure_success(response)?;

    let account: AccountResponse = serde_json::from_str(&response.body)?;

    Ok(UserSession {
        id: UserId::new(account.local_id),
        email: account.email,
        display_name: account.display_name.filter(|name| !name.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use testresult::TestResult;

    use super::*;

    fn provider(api_key: &str) -> Result<IdentityToolkitProvider, url::ParseError> {
        Ok(IdentityToolkitProvider::new(
            Client::new(),
            Url::parse("https://identitytoolkit.googleapis.com")?,
            api_key,
            None,
        ))
    }

    fn session() -> UserSession {
        UserSession {
            id: UserId::new("uid-1"),
            email: "ada@example.com".to_string(),
            display_name: None,
        }
    }

    #[test]
    fn method_url_carries_api_key() -> TestResult {
        let url = provider("secret-key")?.method_url(SIGN_IN_METHOD)?;

        assert_eq!(
            url.as_str(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=secret-key"
        );

        Ok(())
    }

    #[test]
    fn missing_api_key_is_rejected() -> TestResult {
        let result = provider("")?.method_url(SIGN_UP_METHOD);

        assert!(matches!(result, Err(IdentityError::MissingApiKey)));

        Ok(())
    }

    #[test]
    fn email_is_trimmed_and_required() -> TestResult {
        assert_eq!(credentials("  ada@example.com ", "pw")?, "ada@example.com");
        assert!(matches!(
            credentials("   ", "pw"),
            Err(IdentityError::MissingCredentials)
        ));
        assert!(matches!(
            credentials("ada@example.com", ""),
            Err(IdentityError::MissingCredentials)
        ));

        Ok(())
    }

    #[test]
    fn sign_in_request_uses_provider_field_names() -> TestResult {
        let body = serde_json::to_value(PasswordRequest {
            email: "ada@example.com",
            password: "pw",
            display_name: None,
            return_secure_token: true,
        })?;

        assert_eq!(
            body,
            serde_json::json!({
                "email": "ada@example.com",
                "password": "pw",
                "returnSecureToken": true
            })
        );

        Ok(())
    }

    #[test]
    fn decodes_account_into_session() -> TestResult {
        let response = RawResponse::new(
            StatusCode::OK,
            r#"{"localId":"uid-1","email":"ada@example.com","displayName":"","idToken":"t"}"#,
        );

        assert_eq!(decode_session(&response)?, session());

        Ok(())
    }

    #[test]
    fn provider_error_code_is_surfaced_verbatim() {
        let response = RawResponse::new(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":400,"message":"EMAIL_NOT_FOUND","errors":[]}}"#,
        );

        let result = decode_session(&response);

        assert!(
            matches!(result, Err(ref error) if error.to_string() == "EMAIL_NOT_FOUND"),
            "expected EMAIL_NOT_FOUND, got {result:?}"
        );
    }

    #[tokio::test]
    async fn sign_out_publishes_absence() -> TestResult {
        let provider = IdentityToolkitProvider::new(
            Client::new(),
            Url::parse("https://identitytoolkit.googleapis.com")?,
            "key",
            Some(session()),
        );

        let mut subscription = provider.subscribe();
        assert_eq!(subscription.current(), Some(session()));

        provider.sign_out().await?;

        assert_eq!(subscription.changed().await, Some(None));

        Ok(())
    }
}
