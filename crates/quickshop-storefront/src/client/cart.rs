//! Cart endpoints: `POST /cart/add.js` and `GET /cart.js`.

use quickshop_core::Quantity;
use reqwest::StatusCode;

use super::origin::store_host;
use super::StorefrontClient;
use crate::error::StorefrontError;
use crate::types::{AddToCartRequest, Cart, CartErrorBody, CartLineItem};

const GENERIC_REJECTION: &str = "the cart rejected the request";

impl StorefrontClient {
    /// Adds `quantity` of `variant_id` to the cart with a single request.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::CartRejected`] on a 4xx answer other than 404,
    ///   carrying the platform's `description` when present.
    /// - [`StorefrontError::NotFound`] / [`StorefrontError::UnexpectedStatus`]
    ///   for other non-2xx statuses.
    /// - [`StorefrontError::Http`] on network failure.
    /// - [`StorefrontError::Deserialize`] if the line item cannot be decoded.
    pub async fn add_to_cart(
        &self,
        variant_id: i64,
        quantity: Quantity,
    ) -> Result<CartLineItem, StorefrontError> {
        let url = self.endpoint("cart/add.js")?;
        let body = AddToCartRequest {
            id: variant_id,
            quantity: quantity.get(),
        };

        let response = self
            .client
            .post(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::REFERER, &self.referer)
            .header("X-Requested-With", "XMLHttpRequest")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() && status != StatusCode::NOT_FOUND {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(
                        variant_id,
                        error = %e,
                        "could not read cart rejection body"
                    );
                    String::new()
                }
            };
            let message = rejection_message(&text);
            tracing::warn!(
                store = store_host(&self.base_url),
                variant_id,
                status = status.as_u16(),
                %message,
                "cart rejected add"
            );
            return Err(StorefrontError::CartRejected {
                status: status.as_u16(),
                message,
            });
        }

        let line: CartLineItem =
            Self::read_json(response, &url, &format!("cart add for variant {variant_id}")).await?;
        tracing::info!(
            store = store_host(&self.base_url),
            variant_id,
            quantity = quantity.get(),
            "added to cart"
        );
        Ok(line)
    }

    /// Reads the current cart.
    ///
    /// # Errors
    ///
    /// Same status and decoding errors as [`StorefrontClient::fetch_product`].
    pub async fn fetch_cart(&self) -> Result<Cart, StorefrontError> {
        let url = self.endpoint("cart.js")?;
        let response = self.get(url.clone()).await?;
        Self::read_json(response, &url, "cart").await
    }
}

/// Extracts the human-readable reason from a 4xx cart body.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<CartErrorBody>(body)
        .ok()
        .and_then(|b| b.description.or(b.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_REJECTION.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_prefers_description() {
        let body = r#"{"status":422,"message":"Cart Error","description":"Tee is sold out."}"#;
        assert_eq!(rejection_message(body), "Tee is sold out.");
    }

    #[test]
    fn rejection_message_falls_back_to_message() {
        let body = r#"{"status":"bad_request","message":"Parameter Missing"}"#;
        assert_eq!(rejection_message(body), "Parameter Missing");
    }

    #[test]
    fn rejection_message_generic_for_non_json() {
        assert_eq!(rejection_message("<html>oops</html>"), GENERIC_REJECTION);
        assert_eq!(rejection_message(""), GENERIC_REJECTION);
    }
}
