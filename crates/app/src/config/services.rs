//! Remote Service Config

use clap::Args;
use url::Url;

/// Catalog settings.
#[derive(Debug, Clone, Args)]
pub struct CatalogConfig {
    /// Catalog service base URL
    #[arg(
        long,
        global = true,
        env = "CATALOG_URL",
        default_value = "https://fakestoreapi.com"
    )]
    pub catalog_url: Url,
}

/// Payment backend settings.
#[derive(Debug, Clone, Args)]
pub struct PaymentsConfig {
    /// Payment authorization backend base URL
    #[arg(
        long,
        global = true,
        env = "PAYMENTS_BACKEND_URL",
        default_value = "http://localhost:4242"
    )]
    pub payments_url: Url,
}

/// Identity provider settings.
#[derive(Debug, Clone, Args)]
pub struct IdentityConfig {
    /// Identity Toolkit compatible REST endpoint
    #[arg(
        long,
        global = true,
        env = "IDENTITY_URL",
        default_value = "https://identitytoolkit.googleapis.com"
    )]
    pub identity_url: Url,

    /// Identity provider API key
    #[arg(
        long,
        global = true,
        env = "IDENTITY_API_KEY",
        hide_env_values = true,
        default_value = ""
    )]
    pub identity_api_key: String,
}
