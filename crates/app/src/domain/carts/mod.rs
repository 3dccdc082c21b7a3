//! Carts

pub mod store;

pub use store::CartStore;
