//! Storefront
//!
//! Domain core of a small storefront: catalog products, a shopping cart, exact
//! decimal pricing with a flat sales tax, orders and signed-in user sessions.
//! Nothing in this crate performs I/O; services live in `storefront-app`.

pub mod carts;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod sessions;
