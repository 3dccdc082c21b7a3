//! Orders

pub mod errors;
mod records;
mod repository;
pub mod service;

pub use errors::OrdersLedgerError;
pub use service::*;
