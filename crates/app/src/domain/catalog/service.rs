//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use storefront::products::{Category, Product, ProductId};
use tracing::info;
use url::Url;

use crate::{
    domain::catalog::errors::CatalogError,
    http::{self, RawResponse},
};

/// Read-only client for a fakestore compatible catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    http: Client,
    base_url: Url,
}

impl HttpCatalogService {
    /// Catalog served from `base_url`.
    #[must_use]
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    #[tracing::instrument(
        name = "catalog.service.list_products",
        skip(self),
        fields(category = %category),
        err
    )]
    async fn list_products(&self, category: &Category) -> Result<Vec<Product>, CatalogError> {
        let url = products_url(&self.base_url, category)?;
        let response = http::send(self.http.get(url)).await?;

        let products = decode_products(&response)?;

        info!(count = products.len(), "listed products");

        Ok(products)
    }

    #[tracing::instrument(name = "catalog.service.list_categories", skip(self), err)]
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let url = endpoint(&self.base_url, &["products", "categories"])?;
        let response = http::send(self.http.get(url)).await?;

        decode_list(&response)
    }

    #[tracing::instrument(
        name = "catalog.service.get_product",
        skip(self),
        fields(product = %id),
        err
    )]
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let id_segment = id.to_string();
        let url = endpoint(&self.base_url, &["products", id_segment.as_str()])?;
        let response = http::send(self.http.get(url)).await?;

        decode_product(&response, id)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve all products, or only those in `category` unless it is the
    /// `all` sentinel. Backend order is preserved.
    async fn list_products(&self, category: &Category) -> Result<Vec<Product>, CatalogError>;

    /// Retrieve the category tags known to the catalog, without the `all`
    /// sentinel.
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Retrieve a single product.
    async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError>;
}

fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, CatalogError> {
    let mut url = base_url.clone();

    url.path_segments_mut()
        .map_err(|()| CatalogError::InvalidBaseUrl)?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

fn products_url(base_url: &Url, category: &Category) -> Result<Url, CatalogError> {
    if category.is_all() {
        endpoint(base_url, &["products"])
    } else {
        endpoint(base_url, &["products", "category", category.as_str()])
    }
}

fn ensure_success(response: &RawResponse) -> Result<(), CatalogError> {
    if response.status.is_success() {
        return Ok(());
    }

    Err(CatalogError::Remote {
        status: response.status,
        message: response.error_message(),
    })
}

fn decode_products(response: &RawResponse) -> Result<Vec<Product>, CatalogError> {
    decode_list(response)
}

fn decode_list<T>(response: &RawResponse) -> Result<Vec<T>, CatalogError>
where
    T: serde::de::DeserializeOwned,
{
    ensure_success(response)?;

    Ok(serde_json::from_str(&response.body)?)
}

/// The catalog answers unknown ids with either a 404 or an empty 200.
fn decode_product(response: &RawResponse, id: ProductId) -> Result<Product, CatalogError> {
    if response.status == StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound(id));
    }

    ensure_success(response)?;

    let body = response.body.trim();

    if body.is_empty() || body == "null" {
        return Err(CatalogError::NotFound(id));
    }

    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;
    use crate::test::server;

    const BACKPACK: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack",
        "price": 109.95,
        "description": "Your perfect pack",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    fn base() -> Result<Url, url::ParseError> {
        Url::parse("https://fakestoreapi.com")
    }

    #[test]
    fn all_category_lists_every_product() -> TestResult {
        let url = products_url(&base()?, &Category::all())?;

        assert_eq!(url.as_str(), "https://fakestoreapi.com/products");

        Ok(())
    }

    #[test]
    fn category_is_path_encoded() -> TestResult {
        let url = products_url(&base()?, &Category::new("men's clothing"))?;

        assert_eq!(
            url.as_str(),
            "https://fakestoreapi.com/products/category/men's%20clothing"
        );

        Ok(())
    }

    #[test]
    fn base_path_is_kept() -> TestResult {
        let base = Url::parse("http://localhost:3000/api/")?;

        let url = endpoint(&base, &["products", "categories"])?;

        assert_eq!(url.as_str(), "http://localhost:3000/api/products/categories");

        Ok(())
    }

    #[test]
    fn decodes_product_list_in_backend_order() -> TestResult {
        let body = format!("[{BACKPACK}, {}]", BACKPACK.replace("\"id\": 1", "\"id\": 0"));
        let response = RawResponse::new(StatusCode::OK, body);

        let products = decode_products(&response)?;

        let ids: Vec<u64> = products.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, [1, 0]);

        Ok(())
    }

    #[test]
    fn non_success_status_is_remote_error() {
        let response = RawResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "boom");

        let result = decode_products(&response);

        assert!(
            matches!(
                result,
                Err(CatalogError::Remote { status, ref message })
                    if status == StatusCode::INTERNAL_SERVER_ERROR && message == "boom"
            ),
            "expected Remote, got {result:?}"
        );
    }

    #[test]
    fn empty_body_is_not_found() {
        let response = RawResponse::new(StatusCode::OK, "");

        let result = decode_product(&response, ProductId::new(999));

        assert!(
            matches!(result, Err(CatalogError::NotFound(id)) if id == ProductId::new(999)),
            "expected NotFound, got {result:?}"
        );
    }

    #[test]
    fn missing_status_is_not_found() {
        let response = RawResponse::new(StatusCode::NOT_FOUND, "");

        let result = decode_product(&response, ProductId::new(5));

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[test]
    fn decodes_single_product() -> TestResult {
        let response = RawResponse::new(StatusCode::OK, BACKPACK);

        let product = decode_product(&response, ProductId::new(1))?;

        assert_eq!(product.title, "Fjallraven - Foldsack No. 1 Backpack");

        Ok(())
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let response = RawResponse::new(StatusCode::OK, "[{\"id\": \"x\"}]");

        assert!(matches!(
            decode_products(&response),
            Err(CatalogError::Decode(_))
        ));
    }

    #[test]
    fn decodes_categories() -> TestResult {
        let response = RawResponse::new(
            StatusCode::OK,
            r#"["electronics","jewelery","men's clothing","women's clothing"]"#,
        );

        let categories: Vec<Category> = decode_list(&response)?;

        assert_eq!(categories.len(), 4);
        assert_eq!(categories.first().map(Category::label), Some("Electronics"));

        Ok(())
    }

    fn client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
        Client::builder().timeout(timeout).build()
    }

    #[tokio::test]
    async fn unanswered_request_times_out() -> TestResult {
        let (url, release) = server::unresponsive().await?;
        let catalog = HttpCatalogService::new(client_with_timeout(Duration::from_millis(200))?, url);

        let result = catalog.list_products(&Category::all()).await;

        assert!(
            matches!(result, Err(CatalogError::Timeout(_))),
            "expected Timeout, got {result:?}"
        );

        drop(release);

        Ok(())
    }

    #[tokio::test]
    async fn refused_connection_is_a_network_error() -> TestResult {
        let url = server::refusing().await?;
        let catalog = HttpCatalogService::new(client_with_timeout(Duration::from_secs(5))?, url);

        let result = catalog.get_product(ProductId::new(1)).await;

        assert!(
            matches!(result, Err(CatalogError::Network(_))),
            "expected Network, got {result:?}"
        );

        Ok(())
    }
}

