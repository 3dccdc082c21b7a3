//! Catalog

pub mod browser;
pub mod errors;
pub mod service;

pub use browser::CatalogBrowser;
pub use errors::CatalogError;
pub use service::*;
