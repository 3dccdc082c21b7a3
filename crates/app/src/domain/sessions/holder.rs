//! Session holder.

use std::sync::{Arc, PoisonError, RwLock};

use storefront::sessions::UserSession;
use tokio::{sync::oneshot, task::JoinHandle};
use tracing::{debug, warn};

use crate::domain::sessions::subscription::AuthSubscription;

/// Local mirror of the identity provider's state. Not authoritative.
#[derive(Debug, Default)]
pub struct SessionHolder {
    session: RwLock<Option<UserSession>>,
}

impl SessionHolder {
    /// Holder with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holder starting from a known state, e.g. one restored from the local
    /// cache.
    pub fn with_session(session: Option<UserSession>) -> Self {
        Self {
            session: RwLock::new(session),
        }
    }

    /// Signed-in user, if any.
    pub fn current(&self) -> Option<UserSession> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether a user is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn apply(&self, session: Option<UserSession>) {
        debug!(
            user = session.as_ref().map_or("-", |s| s.id.as_str()),
            "session changed"
        );

        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// Mirror `subscription` until [`SessionListener::unsubscribe`] is called.
    ///
    /// The subscription's current state is applied before this returns.
    pub fn listen(self: &Arc<Self>, mut subscription: AuthSubscription) -> SessionListener {
        self.apply(subscription.current());

        let holder = Arc::clone(self);
        let (stop, mut stopped) = oneshot::channel();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    changed = subscription.changed() => match changed {
                        Some(session) => holder.apply(session),
                        None => break,
                    },
                }
            }

            holder.apply(subscription.current());
        });

        SessionListener { stop, task }
    }
}

/// Handle to a running [`SessionHolder::listen`] task.
#[derive(Debug)]
pub struct SessionListener {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl SessionListener {
    /// Stop mirroring. The holder keeps the latest published state.
    pub async fn unsubscribe(self) {
        let _ignored = self.stop.send(());

        if let Err(error) = self.task.await {
            warn!(error = %error, "session listener failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use storefront::sessions::UserId;
    use tokio::sync::watch;

    use super::*;

    fn session(id: &str) -> UserSession {
        UserSession {
            id: UserId::new(id),
            email: format!("{id}@example.com"),
            display_name: None,
        }
    }

    #[tokio::test]
    async fn initial_state_is_applied_immediately() {
        let (_sender, receiver) = watch::channel(Some(session("u1")));
        let holder = Arc::new(SessionHolder::new());

        let listener = holder.listen(AuthSubscription::new(receiver));

        assert_eq!(holder.current(), Some(session("u1")));

        listener.unsubscribe().await;
    }

    #[tokio::test]
    async fn follows_sign_in_and_sign_out() {
        let (sender, receiver) = watch::channel(None);
        let holder = Arc::new(SessionHolder::new());

        let listener = holder.listen(AuthSubscription::new(receiver));
        assert!(!holder.is_signed_in());

        sender.send_replace(Some(session("u1")));
        tokio::task::yield_now().await;
        sender.send_replace(None);
        sender.send_replace(Some(session("u2")));

        listener.unsubscribe().await;

        assert_eq!(holder.current(), Some(session("u2")));
    }

    #[tokio::test]
    async fn unsubscribed_holder_ignores_later_changes() {
        let (sender, receiver) = watch::channel(None);
        let holder = Arc::new(SessionHolder::new());

        holder.listen(AuthSubscription::new(receiver)).unsubscribe().await;

        sender.send_replace(Some(session("late")));
        tokio::task::yield_now().await;

        assert_eq!(holder.current(), None);
    }
}
