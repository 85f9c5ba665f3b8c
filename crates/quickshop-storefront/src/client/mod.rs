//! HTTP client for the storefront AJAX endpoints (`/products/<ref>.js`,
//! `/cart/add.js`, `/cart.js`).

mod cart;
mod origin;

use std::time::Duration;

use quickshop_core::{AppConfig, Product};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::StorefrontError;
use crate::normalize::normalize_product;
use crate::types::ProductJs;

pub use origin::store_root;
#[cfg(test)]
use origin::store_host;

/// Client for one storefront.
///
/// Every request goes to the store origin, so a configured URL that includes
/// a collection or locale path still reaches the root AJAX endpoints. Non-2xx
/// responses become typed errors; nothing is retried.
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
    referer: String,
}

impl StorefrontClient {
    /// Creates a client with the given timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidStoreUrl`] if `store_url` is not an http(s) URL
    ///   with a host.
    /// - [`StorefrontError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        store_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorefrontError> {
        let base_url = store_root(store_url)?;
        let referer = base_url.as_str().trim_end_matches('/').to_owned();

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            referer,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, StorefrontError> {
        Self::new(
            &config.store_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches and normalizes a product by handle or numeric id.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidProductRef`] if `product_ref` is blank or
    ///   contains a path separator.
    /// - [`StorefrontError::NotFound`] on HTTP 404.
    /// - [`StorefrontError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`StorefrontError::Http`] on network or TLS failure.
    /// - [`StorefrontError::Deserialize`] if the body is not a product payload.
    /// - [`StorefrontError::Normalization`] if the product has no variants.
    pub async fn fetch_product(&self, product_ref: &str) -> Result<Product, StorefrontError> {
        let url = self.product_url(product_ref)?;
        tracing::debug!(%url, "fetching product");

        let response = self.get(url.clone()).await?;
        let raw: ProductJs =
            Self::read_json(response, &url, &format!("product {product_ref}")).await?;
        normalize_product(raw)
    }

    /// Builds `/products/<ref>.js`, percent-encoding the reference.
    fn product_url(&self, product_ref: &str) -> Result<Url, StorefrontError> {
        let product_ref = product_ref.trim();
        if product_ref.is_empty() || product_ref.contains('/') {
            return Err(StorefrontError::InvalidProductRef(product_ref.to_owned()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StorefrontError::InvalidStoreUrl {
                store_url: self.base_url.to_string(),
                reason: "URL cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .push("products")
            .push(&format!("{product_ref}.js"));
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> Result<Url, StorefrontError> {
        self.base_url
            .join(path)
            .map_err(|e| StorefrontError::InvalidStoreUrl {
                store_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    async fn get(&self, url: Url) -> Result<Response, StorefrontError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::REFERER, &self.referer)
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;
        Ok(response)
    }

    /// Maps non-2xx statuses to typed errors and decodes a 2xx body.
    async fn read_json<T: DeserializeOwned>(
        response: Response,
        url: &Url,
        context: &str,
    ) -> Result<T, StorefrontError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(StorefrontError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| StorefrontError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
