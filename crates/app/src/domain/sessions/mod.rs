//! Sessions
//!
//! The identity provider owns authentication. The rest of the application
//! only mirrors its state through an [`AuthSubscription`].

pub mod errors;
pub mod holder;
pub mod provider;
pub mod subscription;

pub use errors::IdentityError;
pub use holder::{SessionHolder, SessionListener};
pub use provider::*;
pub use subscription::AuthSubscription;
