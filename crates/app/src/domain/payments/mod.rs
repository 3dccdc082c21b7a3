//! Payments
//!
//! Authorization against the payment backend and the hosted collection step
//! that confirms the charge.

pub mod errors;
pub mod gateway;
pub mod models;
pub mod sheet;

pub use errors::PaymentError;
pub use gateway::*;
pub use sheet::*;
