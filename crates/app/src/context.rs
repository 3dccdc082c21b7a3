//! App Context

use std::{
    fmt::{self, Debug, Formatter},
    sync::Arc,
};

use storefront::{
    carts::Cart,
    pricing::{PricingError, find_currency},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cache::{CacheError, LocalCache, PersistedState},
    config::AppConfig,
    database,
    domain::{
        carts::CartStore,
        catalog::{CatalogBrowser, CatalogService, HttpCatalogService},
        checkout::CheckoutCoordinator,
        orders::{OrdersLedger, PgOrdersLedger},
        payments::{HttpPaymentGateway, PaymentGateway, PaymentSheet, TerminalPaymentSheet},
        sessions::{IdentityProvider, IdentityToolkitProvider, SessionHolder, SessionListener},
    },
    http,
};

/// Errors raised while building the [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The shared HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Http(#[source] reqwest::Error),

    /// The database URL could not be parsed.
    #[error("invalid database connection string")]
    Database(#[source] sqlx::Error),

    /// The configured currency is not an ISO 4217 code.
    #[error("unsupported store currency")]
    Currency(#[source] PricingError),
}

/// Services shared by every command, built once at startup.
pub struct AppContext {
    /// Remote product catalog
    pub catalog: Arc<dyn CatalogService>,

    /// Browsing state over the catalog
    pub browser: CatalogBrowser,

    /// The cart, restored from the local cache
    pub cart: CartStore,

    /// Identity provider client
    pub identity: Arc<dyn IdentityProvider>,

    /// Local mirror of the signed-in user
    pub sessions: Arc<SessionHolder>,

    /// Order history
    pub orders: Arc<dyn OrdersLedger>,

    /// Checkout orchestration
    pub checkout: CheckoutCoordinator,

    cache: LocalCache,
    listener: SessionListener,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("cache", &self.cache)
            .field("checkout", &self.checkout)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Restore the cached cart and session and wire every service.
    ///
    /// Nothing here touches the network or the database; the order ledger
    /// connects on first use.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built, the database
    /// URL is malformed or the configured currency is unknown.
    #[tracing::instrument(name = "app.context.init", skip(config), err)]
    pub async fn init(config: &AppConfig) -> Result<Self, AppInitError> {
        let currency = find_currency(&config.store.currency).map_err(AppInitError::Currency)?;
        let client = http::client(&config.http).map_err(AppInitError::Http)?;

        let cache = LocalCache::new(&config.store.cache_path);
        let PersistedState { cart, session } = cache.load().await;

        debug!(
            restored_cart = cart.is_some(),
            restored_session = session.is_some(),
            "local state loaded"
        );

        let cart = CartStore::new(cart.unwrap_or_else(|| Cart::new(currency.iso_alpha_code)));

        let identity = Arc::new(IdentityToolkitProvider::new(
            client.clone(),
            config.identity.identity_url.clone(),
            config.identity.identity_api_key.clone(),
            session.clone(),
        ));

        let sessions = Arc::new(SessionHolder::with_session(session));
        let listener = sessions.listen(identity.subscribe());

        let catalog: Arc<dyn CatalogService> = Arc::new(HttpCatalogService::new(
            client.clone(),
            config.catalog.catalog_url.clone(),
        ));

        let gateway: Arc<dyn PaymentGateway> = Arc::new(HttpPaymentGateway::new(
            client,
            config.payments.payments_url.clone(),
        ));

        let sheet: Arc<dyn PaymentSheet> = Arc::new(TerminalPaymentSheet::stdio());

        let pool =
            database::connect_lazy(&config.database.database_url).map_err(AppInitError::Database)?;
        let orders: Arc<dyn OrdersLedger> = Arc::new(PgOrdersLedger::new(pool));

        let checkout = CheckoutCoordinator::new(
            cart.clone(),
            Arc::clone(&sessions),
            gateway,
            sheet,
            Arc::clone(&orders),
        );

        Ok(Self {
            browser: CatalogBrowser::new(Arc::clone(&catalog)),
            catalog,
            cart,
            identity,
            sessions,
            orders,
            checkout,
            cache,
            listener,
        })
    }

    /// Stop following the identity provider and persist the cart and the
    /// latest session.
    ///
    /// # Errors
    ///
    /// Returns an error when the cache file cannot be written.
    #[tracing::instrument(name = "app.context.shutdown", skip(self), err)]
    pub async fn shutdown(self) -> Result<(), CacheError> {
        self.listener.unsubscribe().await;

        let state = PersistedState {
            cart: Some(self.cart.snapshot()),
            session: self.sessions.current(),
        };

        self.cache.save(&state).await?;

        info!(path = %self.cache.path().display(), "local state saved");

        Ok(())
    }
}
