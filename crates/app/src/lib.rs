//! Storefront application services: remote catalog, payments and identity
//! clients, the order ledger, local persistence and checkout orchestration.

pub mod cache;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod http;
pub mod observability;

#[cfg(test)]
mod test;
