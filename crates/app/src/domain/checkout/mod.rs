//! Checkout
//!
//! A checkout moves through
//! `Idle → Authorizing → CollectingPayment → Committing → Succeeded`, leaving
//! for `Failed` on any error. Each step is a separate method taking the
//! previous step's output, so steps cannot run out of order.

pub mod coordinator;
pub mod errors;
pub mod phase;

pub use coordinator::*;
pub use errors::CheckoutError;
pub use phase::CheckoutPhase;
