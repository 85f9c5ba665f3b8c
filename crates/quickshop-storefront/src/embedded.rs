//! Product data embedded in page HTML.
//!
//! Themes render the product JSON into the page as
//! `<script type="application/json" id="ProductJson-<ref>">{...}</script>`,
//! keyed by product id or handle. Reading it avoids a network round trip when
//! the quick view opens on a page that already carries the data.

use std::collections::HashMap;
use std::sync::LazyLock;

use quickshop_core::Product;
use regex::Regex;

use crate::error::StorefrontError;
use crate::normalize::normalize_product;
use crate::types::ProductJs;

static PRODUCT_JSON_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script\b[^>]*\bid\s*=\s*["']ProductJson-([^"']+)["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

/// Raw embedded product payloads keyed by the reference in their script id.
#[derive(Debug, Default, Clone)]
pub struct EmbeddedProducts {
    by_ref: HashMap<String, String>,
}

impl EmbeddedProducts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every `ProductJson-*` script block in `html`. Later blocks
    /// with the same reference replace earlier ones.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        let by_ref = PRODUCT_JSON_SCRIPT
            .captures_iter(html)
            .filter_map(|cap| {
                let product_ref = cap.get(1)?.as_str().trim();
                let body = cap.get(2)?.as_str().trim();
                (!product_ref.is_empty() && !body.is_empty())
                    .then(|| (product_ref.to_owned(), body.to_owned()))
            })
            .collect();
        Self { by_ref }
    }

    /// Registers a payload directly, e.g. one the caller already extracted.
    pub fn insert(&mut self, product_ref: &str, json: impl Into<String>) {
        self.by_ref.insert(product_ref.trim().to_owned(), json.into());
    }

    #[must_use]
    pub fn contains(&self, product_ref: &str) -> bool {
        self.by_ref.contains_key(product_ref.trim())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_ref.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_ref.is_empty()
    }

    /// Parses and normalizes the embedded product for `product_ref`.
    ///
    /// Returns `None` when nothing is embedded under that reference.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Deserialize`] or
    /// [`StorefrontError::Normalization`] when the embedded payload is present
    /// but unusable.
    pub fn product(&self, product_ref: &str) -> Option<Result<Product, StorefrontError>> {
        let raw = self.by_ref.get(product_ref.trim())?;
        Some(
            serde_json::from_str::<ProductJs>(raw)
                .map_err(|e| StorefrontError::Deserialize {
                    context: format!("embedded product {product_ref}"),
                    source: e,
                })
                .and_then(normalize_product),
        )
    }
}
