//! Local Store Config

use std::path::PathBuf;

use clap::Args;

/// Local persistence settings.
#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    /// Where the cart and session are kept between runs
    #[arg(
        long,
        global = true,
        env = "STOREFRONT_CACHE_PATH",
        default_value = ".storefront/state.json"
    )]
    pub cache_path: PathBuf,

    /// Currency for newly created carts (ISO 4217)
    #[arg(long, global = true, env = "STOREFRONT_CURRENCY", default_value = "USD")]
    pub currency: String,
}
