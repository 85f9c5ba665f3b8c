use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("cart rejected the request (HTTP {status}): {message}")]
    CartRejected { status: u16, message: String },

    #[error("normalization error for product {product_id}: {reason}")]
    Normalization { product_id: String, reason: String },

    #[error("invalid store URL \"{store_url}\": {reason}")]
    InvalidStoreUrl { store_url: String, reason: String },

    #[error("invalid product reference \"{0}\"")]
    InvalidProductRef(String),

    #[error("a quick view request is already in progress")]
    Busy,

    #[error("no product is open in the quick view")]
    NotOpen,

    #[error("no variant matches the selected options")]
    NoVariantSelected,

    #[error("variant {variant_id} is sold out")]
    VariantUnavailable { variant_id: i64 },
}
