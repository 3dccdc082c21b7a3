//! HTTP Client Config

use std::time::Duration;

use clap::Args;

/// Outbound HTTP settings.
#[derive(Debug, Clone, Args)]
pub struct HttpConfig {
    /// Timeout applied to every outbound request, in seconds (at least one)
    #[arg(
        long,
        global = true,
        env = "HTTP_TIMEOUT_SECONDS",
        default_value_t = 10_u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub http_timeout_seconds: u64,
}

impl HttpConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}
