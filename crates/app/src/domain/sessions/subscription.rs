//! Auth state subscription.

use storefront::sessions::UserSession;
use tokio::sync::watch;

/// Stream of authentication state changes.
///
/// The current state is available immediately; [`AuthSubscription::changed`]
/// waits for the next change.
#[derive(Debug, Clone)]
pub struct AuthSubscription {
    receiver: watch::Receiver<Option<UserSession>>,
}

impl AuthSubscription {
    /// Subscription reading from `receiver`.
    pub fn new(receiver: watch::Receiver<Option<UserSession>>) -> Self {
        Self { receiver }
    }

    /// Latest published state.
    pub fn current(&self) -> Option<UserSession> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change and return the new state.
    ///
    /// Returns `None` once the provider has gone away.
    pub async fn changed(&mut self) -> Option<Option<UserSession>> {
        self.receiver.changed().await.ok()?;

        Some(self.receiver.borrow_and_update().clone())
    }
}
