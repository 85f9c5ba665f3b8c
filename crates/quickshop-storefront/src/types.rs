//! Response types for the storefront AJAX endpoints.
//!
//! ## Observed shapes
//!
//! ### `GET /products/<handle>.js`
//! Prices are **integer cents** (`2500`), unlike `products.json` which sends
//! decimal strings. `compare_at_price` is `null` when the variant is not on
//! sale. `featured_image` is a protocol-relative CDN URL
//! (`"//cdn.shopify.com/..."`) or `null`. `options` is an array of names on
//! older themes and an array of `{name, position, values}` objects on newer
//! ones; both are accepted. `inventory_quantity` is omitted by stores that hide
//! stock levels.
//!
//! ### `POST /cart/add.js`
//! Returns the added line item on success. Rejections (sold out, quantity
//! exceeds stock) come back as HTTP 422 with
//! `{"status": 422, "message": "Cart Error", "description": "..."}`.
//!
//! ### `GET /cart.js`
//! `item_count` is the sum of line quantities, not the number of lines.

use serde::{Deserialize, Serialize};

/// Product payload from `/products/<handle>.js` or an embedded
/// `ProductJson-*` script block.
#[derive(Debug, Deserialize)]
pub struct ProductJs {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub options: Vec<ProductOptionJs>,
    #[serde(default)]
    pub variants: Vec<VariantJs>,
}

/// An entry of the product's `options` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProductOptionJs {
    Name(String),
    Detailed { name: String },
}

impl ProductOptionJs {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ProductOptionJs::Name(name) | ProductOptionJs::Detailed { name } => name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VariantJs {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    pub price: i64,
    #[serde(default)]
    pub compare_at_price: Option<i64>,
    /// Absent on some embedded payloads; treated as sold out when missing.
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
}

/// Request body for `POST /cart/add.js`.
#[derive(Debug, Serialize)]
pub struct AddToCartRequest {
    pub id: i64,
    pub quantity: u32,
}

/// A cart line as returned by `/cart/add.js` and inside `/cart.js`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: i64,
    #[serde(default)]
    pub variant_id: Option<i64>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub line_price: Option<i64>,
}

/// Response from `GET /cart.js`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub token: Option<String>,
    pub item_count: u32,
    #[serde(default)]
    pub total_price: i64,
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

/// Error body returned with 4xx cart responses.
#[derive(Debug, Deserialize)]
pub(crate) struct CartErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
