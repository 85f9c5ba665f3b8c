//! Normalization from storefront payloads to [`quickshop_core::Product`].

use quickshop_core::{Product, Variant};

use crate::error::StorefrontError;
use crate::types::{ProductJs, VariantJs};

/// Normalizes a raw [`ProductJs`] into a [`Product`].
///
/// # Errors
///
/// Returns [`StorefrontError::Normalization`] if the product has no variants
/// or a variant carries a negative price.
pub fn normalize_product(product: ProductJs) -> Result<Product, StorefrontError> {
    let product_id = product.id.to_string();

    if product.variants.is_empty() {
        return Err(StorefrontError::Normalization {
            product_id,
            reason: "product has no variants".into(),
        });
    }

    let variants = product
        .variants
        .into_iter()
        .map(|variant| normalize_variant(variant, &product_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        id: product.id,
        handle: product.handle,
        title: product.title,
        description: product.description.filter(|s| !s.trim().is_empty()),
        featured_image: product.featured_image.as_deref().and_then(absolute_url),
        options: product
            .options
            .iter()
            .map(|o| o.name().to_owned())
            .collect(),
        variants,
    })
}

fn normalize_variant(variant: VariantJs, product_id: &str) -> Result<Variant, StorefrontError> {
    if variant.price < 0 {
        return Err(StorefrontError::Normalization {
            product_id: product_id.to_owned(),
            reason: format!("variant {} has negative price {}", variant.id, variant.price),
        });
    }

    Ok(Variant {
        id: variant.id,
        title: variant.title,
        sku: variant.sku.filter(|s| !s.is_empty()),
        option1: variant.option1.filter(|s| !s.is_empty()),
        option2: variant.option2.filter(|s| !s.is_empty()),
        option3: variant.option3.filter(|s| !s.is_empty()),
        price: variant.price,
        compare_at_price: variant.compare_at_price,
        available: variant.available,
        inventory_quantity: variant.inventory_quantity.unwrap_or(0).max(0),
    })
}

/// Turns a protocol-relative CDN URL into an `https` one; drops blanks.
fn absolute_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else if let Some(rest) = raw.strip_prefix("//") {
        Some(format!("https://{rest}"))
    } else {
        Some(raw.to_owned())
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
