//! Storefront configuration

use clap::Args;

use crate::config::{
    cache::StoreConfig,
    db::DatabaseConfig,
    http::HttpConfig,
    observability::LoggingConfig,
    services::{CatalogConfig, IdentityConfig, PaymentsConfig},
};

pub mod cache;
pub mod db;
pub mod http;
pub mod observability;
pub mod services;

pub use observability::LogFormat;

/// Settings shared by every storefront command.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Remote catalog settings.
    #[command(flatten)]
    pub catalog: CatalogConfig,

    /// Payment authorization backend settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,

    /// Identity provider settings.
    #[command(flatten)]
    pub identity: IdentityConfig,

    /// Order ledger database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Local cart and session storage settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Outbound HTTP settings.
    #[command(flatten)]
    pub http: HttpConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: AppConfig,
    }

    #[test]
    fn defaults_point_at_public_catalog() -> TestResult {
        let cli = TestCli::try_parse_from(["storefront"])?;

        assert_eq!(cli.config.catalog.catalog_url.as_str(), "https://fakestoreapi.com/");
        assert_eq!(cli.config.http.timeout(), Duration::from_secs(10));
        assert_eq!(cli.config.store.currency, "USD");
        assert!(matches!(cli.config.logging.log_format, LogFormat::Compact));

        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let cli = TestCli::try_parse_from([
            "storefront",
            "--payments-url",
            "http://payments.test:9000",
            "--http-timeout-seconds",
            "3",
            "--log-format",
            "json",
        ])?;

        assert_eq!(cli.config.payments.payments_url.host_str(), Some("payments.test"));
        assert_eq!(cli.config.http.timeout(), Duration::from_secs(3));
        assert!(matches!(cli.config.logging.log_format, LogFormat::Json));

        Ok(())
    }

    #[test]
    fn rejects_malformed_urls() {
        let result = TestCli::try_parse_from(["storefront", "--catalog-url", "not a url"]);

        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let result = TestCli::try_parse_from(["storefront", "--http-timeout-seconds", "0"]);

        assert!(result.is_err());
    }
}
