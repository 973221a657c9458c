//! HTTP client for the remote catalog API.
//!
//! One client serves every loader: the listing loaders call
//! [`CatalogClient::list_products`], the detail loader calls
//! [`CatalogClient::get_product`] and path enumeration calls
//! [`CatalogClient::list_product_ids`]. All URLs derive from a single base
//! origin.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use techstore_core::{AppConfig, Category, Product};

use crate::error::ClientError;

/// Client for the catalog's `/products` collection.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client for the origin, timeout and `User-Agent` in `config`.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            config.api_url.as_str(),
            config.request_timeout(),
            &config.user_agent,
        )
    }

    /// Creates a client against an arbitrary base URL (a mock server in tests).
    ///
    /// `timeout` of `None` leaves outbound requests without a client-side limit.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse as
    /// an `http`/`https` base, or [`ClientError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        // Ensure exactly one trailing slash so `join("products")` appends to
        // the configured path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("expected an http or https origin".to_owned()));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {origin}/products`, optionally filtered by category.
    ///
    /// The response array is returned as-is, in the API's order.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not a JSON array of products.
    pub async fn list_products(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<Product>, ClientError> {
        let url = self.products_url(category);
        tracing::debug!(url = %url, category = ?category, "fetching product listing");
        let products: Vec<Product> = self.get_json(url, false).await?;
        tracing::debug!(count = products.len(), category = ?category, "product listing fetched");
        Ok(products)
    }

    /// `GET {origin}/products/{id}`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] if the API answers 404.
    /// - [`ClientError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::Deserialize`] if the body is not a product object.
    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        let url = self.product_url(id);
        tracing::debug!(url = %url, product_id = id, "fetching product");
        self.get_json(url, true).await
    }

    /// Ids of every product in the unfiltered listing, in API order.
    ///
    /// Numeric ids are stringified; products without a usable `_id` are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::list_products`].
    pub async fn list_product_ids(&self) -> Result<Vec<String>, ClientError> {
        let products = self.list_products(None).await?;
        let total = products.len();
        let ids: Vec<String> = products
            .iter()
            .filter_map(Product::id)
            .collect();
        if ids.len() < total {
            tracing::warn!(
                skipped = total - ids.len(),
                "products without an _id cannot be given a detail page"
            );
        }
        Ok(ids)
    }

    /// Builds the collection URL, with `category=<slug>` when filtered.
    #[must_use]
    pub fn products_url(&self, category: Option<Category>) -> Url {
        let mut url = self.collection_url();
        if let Some(category) = category {
            url.query_pairs_mut()
                .append_pair("category", category.as_str());
        }
        url
    }

    /// Builds the single-product URL; `id` is percent-encoded as one path segment.
    #[must_use]
    pub fn product_url(&self, id: &str) -> Url {
        let mut url = self.collection_url();
        // Cannot fail: the base was checked to be an http(s) base URL.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id);
        }
        url
    }

    fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("products");
        }
        url
    }

    /// Sends a GET and parses the body as `T`.
    ///
    /// With `map_not_found`, a 404 becomes [`ClientError::NotFound`] rather
    /// than [`ClientError::UnexpectedStatus`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        map_not_found: bool,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if map_not_found && status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
