//! Store root resolution for the storefront client.

use reqwest::Url;

use crate::error::StorefrontError;

/// Parses a configured store URL down to its root, `scheme://host[:port]/`.
///
/// Paths, queries and fragments are dropped, so
/// `https://shop.example.com/en-us/collections/all` and
/// `https://shop.example.com` address the same AJAX endpoints.
///
/// # Errors
///
/// Returns [`StorefrontError::InvalidStoreUrl`] when the URL does not parse,
/// is not http(s), or has no host.
pub fn store_root(store_url: &str) -> Result<Url, StorefrontError> {
    let invalid = |reason: String| StorefrontError::InvalidStoreUrl {
        store_url: store_url.to_owned(),
        reason,
    };

    let parsed = Url::parse(store_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", parsed.scheme())));
    }
    if parsed.host_str().is_none() {
        return Err(invalid("URL has no host".to_owned()));
    }

    let origin = parsed.origin().ascii_serialization();
    Url::parse(&format!("{origin}/")).map_err(|e| invalid(e.to_string()))
}

/// Host of the store root, for log fields.
pub(super) fn store_host(base_url: &Url) -> &str {
    base_url.host_str().unwrap_or("unknown")
}
