//! DummyJSON API client implementation.
//!
//! Plain JSON over `reqwest`. Every call is a single GET.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use pocket_store_core::{CategoryKey, Product, User};

use super::{ApiError, CatalogSource, UserDirectory};
use crate::config::ApiConfig;

/// Longest slice of a response body kept in logs and errors.
const BODY_PREVIEW_CHARS: usize = 200;

/// Client for the DummyJSON users and products endpoints.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct DummyJsonClient {
    inner: Arc<DummyJsonClientInner>,
}

struct DummyJsonClientInner {
    client: reqwest::Client,
    base_url: Url,
}

/// `GET /products/category/{key}` response body.
#[derive(Debug, Deserialize)]
struct ProductListResponse {
    products: Vec<Product>,
}

/// `GET /users` response body.
#[derive(Debug, Deserialize)]
struct UserListResponse {
    users: Vec<User>,
}

impl DummyJsonClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            inner: Arc::new(DummyJsonClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    /// URL of the full user directory (`limit=0` disables paging).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the base URL cannot be extended.
    pub fn users_url(&self) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.join("users")?;
        url.query_pairs_mut().append_pair("limit", "0");
        Ok(url)
    }

    /// URL of one product category. The key is percent-encoded as a single
    /// path segment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the base URL cannot be extended.
    pub fn category_url(&self, key: &CategoryKey) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["products", "category", key.as_str()]);
        Ok(url)
    }

    /// GET a URL and decode its JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Read as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %preview(&body),
                "API returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: preview(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %preview(&body),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }
}

impl CatalogSource for DummyJsonClient {
    #[instrument(skip_all, fields(category = %key))]
    async fn fetch_category(&self, key: &CategoryKey) -> Result<Vec<Product>, ApiError> {
        let url = self.category_url(key)?;
        let response: ProductListResponse = self.get_json(url).await?;
        debug!(count = response.products.len(), "Fetched category");
        Ok(response.products)
    }
}

impl UserDirectory for DummyJsonClient {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.users_url()?;
        let response: UserListResponse = self.get_json(url).await?;
        debug!(count = response.users.len(), "Fetched user directory");
        Ok(response.users)
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> DummyJsonClient {
        DummyJsonClient::new(&ApiConfig::with_base_url(base).unwrap()).unwrap()
    }

    #[test]
    fn test_users_url() {
        let client = client("https://dummyjson.com");
        assert_eq!(
            client.users_url().unwrap().as_str(),
            "https://dummyjson.com/users?limit=0"
        );
    }

    #[test]
    fn test_category_url() {
        let client = client("https://dummyjson.com");
        let url = client
            .category_url(&CategoryKey::from("womens-jewellery"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://dummyjson.com/products/category/womens-jewellery"
        );
    }

    #[test]
    fn test_category_url_under_base_path() {
        let client = client("http://127.0.0.1:9000/api/");
        let url = client.category_url(&CategoryKey::from("mens-shoes")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/api/products/category/mens-shoes"
        );
    }

    #[test]
    fn test_category_key_is_one_segment() {
        let client = client("https://dummyjson.com");
        let url = client.category_url(&CategoryKey::from("a/b?c")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://dummyjson.com/products/category/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_product_list_body() {
        let body = r#"{"products": [
            {"id": 1, "title": "Shirt", "price": 10, "thumbnail": "t1"},
            {"id": 2, "title": "Shoes", "price": 99.9, "thumbnail": "t2", "discountPercentage": 5}
        ], "total": 2, "skip": 0, "limit": 2}"#;
        let parsed: ProductListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.products.len(), 2);
        assert_eq!(parsed.products[1].title, "Shoes");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(500);
        assert_eq!(preview(&long).len(), BODY_PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }
}
