//! Catalog browsing state.
//!
//! Holds the selected category, search text and sort order over the last
//! fetched product list. Every fetch takes a request token; a response whose
//! token has been superseded by a newer fetch is dropped instead of
//! overwriting fresher results.

use std::{
    fmt::{self, Debug, Formatter},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use storefront::products::{
    Category, Product, ProductSort, search_products, sort_products, with_all_category,
};
use tracing::debug;

use crate::domain::catalog::{CatalogError, CatalogService};

/// Monotonic fetch identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// What the user is currently looking at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseQuery {
    /// Selected category, `all` for no filter
    pub category: Category,

    /// Free-text title filter
    pub search: String,

    /// Ordering
    pub sort: ProductSort,
}

#[derive(Debug, Default)]
struct BrowserState {
    query: BrowseQuery,
    products: Vec<Product>,
    latest: u64,
}

impl BrowserState {
    fn begin(&mut self) -> (RequestToken, Category) {
        self.latest += 1;

        (RequestToken(self.latest), self.query.category.clone())
    }

    fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Apply fetched products. Returns `false` when `token` was superseded.
    fn finish(&mut self, token: RequestToken, products: Vec<Product>) -> bool {
        if !self.is_current(token) {
            return false;
        }

        self.products = products;

        true
    }

    fn visible(&self) -> Vec<Product> {
        let mut visible: Vec<Product> = search_products(&self.products, &self.query.search)
            .into_iter()
            .cloned()
            .collect();

        sort_products(&mut visible, self.query.sort);

        visible
    }
}

/// Category, search and sort state over a [`CatalogService`].
pub struct CatalogBrowser {
    catalog: Arc<dyn CatalogService>,
    state: Mutex<BrowserState>,
}

impl Debug for CatalogBrowser {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogBrowser")
            .field("query", &self.query())
            .finish_non_exhaustive()
    }
}

impl CatalogBrowser {
    /// Browser with no filter, no search and backend order.
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog,
            state: Mutex::new(BrowserState::default()),
        }
    }

    /// Current query.
    pub fn query(&self) -> BrowseQuery {
        self.lock().query.clone()
    }

    /// Categories to offer, `all` first.
    ///
    /// # Errors
    ///
    /// Returns the catalog error when the categories cannot be fetched.
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(with_all_category(self.catalog.list_categories().await?))
    }

    /// Switch category and refetch.
    ///
    /// # Errors
    ///
    /// Returns the catalog error when the fetch fails and was not superseded.
    pub async fn select_category(
        &self,
        category: Category,
    ) -> Result<Option<Vec<Product>>, CatalogError> {
        self.lock().query.category = category;

        self.refresh().await
    }

    /// Change the title filter. Applied locally, no fetch.
    pub fn set_search(&self, search: impl Into<String>) {
        self.lock().query.search = search.into();
    }

    /// Change the ordering. Applied locally, no fetch.
    pub fn set_sort(&self, sort: ProductSort) {
        self.lock().query.sort = sort;
    }

    /// Fetch products for the selected category.
    ///
    /// Returns `None` when a newer fetch started while this one was in
    /// flight; its result (or error) is discarded.
    ///
    /// # Errors
    ///
    /// Returns the catalog error when the fetch fails and was not superseded.
    pub async fn refresh(&self) -> Result<Option<Vec<Product>>, CatalogError> {
        let (token, category) = self.lock().begin();

        let result = self.catalog.list_products(&category).await;

        let mut state = self.lock();

        if !state.is_current(token) {
            debug!(?token, "discarding superseded catalog response");

            return Ok(None);
        }

        state.finish(token, result?);

        Ok(Some(state.visible()))
    }

    /// Last fetched products with search and sort applied.
    pub fn visible(&self) -> Vec<Product> {
        self.lock().visible()
    }

    fn lock(&self) -> MutexGuard<'_, BrowserState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
