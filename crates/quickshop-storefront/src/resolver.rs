//! Product resolution: embedded page data first, then the product endpoint.

use quickshop_core::Product;

use crate::client::StorefrontClient;
use crate::embedded::EmbeddedProducts;
use crate::error::StorefrontError;

pub struct ProductResolver {
    client: StorefrontClient,
    embedded: EmbeddedProducts,
}

impl ProductResolver {
    #[must_use]
    pub fn new(client: StorefrontClient, embedded: EmbeddedProducts) -> Self {
        Self { client, embedded }
    }

    /// A resolver that always fetches.
    #[must_use]
    pub fn remote_only(client: StorefrontClient) -> Self {
        Self::new(client, EmbeddedProducts::new())
    }

    #[must_use]
    pub fn client(&self) -> &StorefrontClient {
        &self.client
    }

    /// Resolves `product_ref` to a normalized product.
    ///
    /// An embedded payload that fails to parse is logged and ignored in favor
    /// of a fresh fetch.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`StorefrontClient::fetch_product`].
    pub async fn resolve(&self, product_ref: &str) -> Result<Product, StorefrontError> {
        match self.embedded.product(product_ref) {
            Some(Ok(product)) => {
                tracing::debug!(
                    product_ref,
                    product_id = product.id,
                    "using embedded product data"
                );
                return Ok(product);
            }
            Some(Err(e)) => {
                tracing::warn!(
                    product_ref,
                    error = %e,
                    "embedded product data unusable; fetching from storefront"
                );
            }
            None => {}
        }

        self.client.fetch_product(product_ref).await
    }
}
