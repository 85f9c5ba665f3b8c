//! Integration tests for `StorefrontClient` against a `wiremock` server.
//!
//! Cover product fetch, cart add, and cart read, including each typed error
//! the client maps non-2xx responses to.

use quickshop_core::Quantity;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use quickshop_storefront::{StorefrontClient, StorefrontError};

fn test_client(base: &str) -> StorefrontClient {
    StorefrontClient::new(base, 5, "quickshop-test/0.1").expect("failed to build test client")
}

fn tee_json() -> serde_json::Value {
    json!({
        "id": 111,
        "title": "Classic Tee",
        "handle": "classic-tee",
        "description": "<p>Soft cotton.</p>",
        "featured_image": "//cdn.shopify.com/tee.jpg",
        "options": [
            {"name": "Color", "position": 1, "values": ["Black", "White"]},
            {"name": "Size", "position": 2, "values": ["Small", "Medium"]}
        ],
        "variants": [
            {"id": 1, "title": "Black / Small", "option1": "Black", "option2": "Small",
             "option3": null, "price": 2500, "compare_at_price": null, "available": true,
             "inventory_quantity": 5},
            {"id": 2, "title": "Black / Medium", "option1": "Black", "option2": "Medium",
             "option3": null, "price": 2500, "compare_at_price": 3000, "available": true}
        ]
    })
}

#[tokio::test]
async fn fetch_product_normalizes_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/classic-tee.js"))
        .and(header("X-Requested-With", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tee_json()))
        .expect(1)
        .mount(&server)
        .await;

    let product = test_client(&server.uri())
        .fetch_product("classic-tee")
        .await
        .expect("expected product");

    assert_eq!(product.id, 111);
    assert_eq!(product.options, vec!["Color", "Size"]);
    assert_eq!(product.variants.len(), 2);
    assert_eq!(product.variants[0].inventory_quantity, 5);
    assert_eq!(product.variants[1].compare_at_price, Some(3000));
    assert_eq!(
        product.featured_image.as_deref(),
        Some("https://cdn.shopify.com/tee.jpg")
    );
}

#[tokio::test]
async fn fetch_product_uses_store_origin_when_url_has_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/classic-tee.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tee_json()))
        .expect(1)
        .mount(&server)
        .await;

    let store_url = format!("{}/collections/all", server.uri());
    let result = test_client(&store_url).fetch_product("classic-tee").await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn fetch_product_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/missing.js"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_product("missing")
        .await
        .unwrap_err();
    let StorefrontError::NotFound { url } = &err else {
        panic!("expected NotFound, got: {err:?}");
    };
    assert!(url.ends_with("/products/missing.js"));
}

#[tokio::test]
async fn fetch_product_500_is_unexpected_status_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/classic-tee.js"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_product("classic-tee")
        .await
        .unwrap_err();
    assert!(
        matches!(err, StorefrontError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_product_invalid_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/classic-tee.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_product("classic-tee")
        .await
        .unwrap_err();
    let StorefrontError::Deserialize { context, .. } = &err else {
        panic!("expected Deserialize, got: {err:?}");
    };
    assert!(context.contains("classic-tee"));
}

#[tokio::test]
async fn fetch_product_without_variants_is_normalization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/empty.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "title": "Empty",
            "handle": "empty",
            "variants": []
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_product("empty")
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Normalization { .. }));
}

#[tokio::test]
async fn add_to_cart_posts_id_and_quantity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .and(body_json(json!({"id": 2, "quantity": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2,
            "variant_id": 2,
            "product_id": 111,
            "title": "Classic Tee - Black / Medium",
            "quantity": 3,
            "price": 2500,
            "line_price": 7500
        })))
        .expect(1)
        .mount(&server)
        .await;

    let line = test_client(&server.uri())
        .add_to_cart(2, Quantity::new(3))
        .await
        .expect("expected line item");
    assert_eq!(line.variant_id, Some(2));
    assert_eq!(line.quantity, 3);
    assert_eq!(line.line_price, Some(7500));
}

#[tokio::test]
async fn add_to_cart_clamps_quantity_on_the_wire() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .and(body_json(json!({"id": 2, "quantity": 10})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 2, "quantity": 10})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client(&server.uri())
        .add_to_cart(2, Quantity::new(25))
        .await;
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

#[tokio::test]
async fn add_to_cart_422_is_cart_rejected_with_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "status": 422,
            "message": "Cart Error",
            "description": "All 5 Classic Tee - Black / Small are in your cart."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .add_to_cart(1, Quantity::new(1))
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            StorefrontError::CartRejected { status: 422, ref message }
                if message == "All 5 Classic Tee - Black / Small are in your cart."
        ),
        "expected CartRejected, got: {err:?}"
    );
}

#[tokio::test]
async fn add_to_cart_rejection_without_body_uses_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(422))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .add_to_cart(1, Quantity::new(1))
        .await
        .unwrap_err();
    let StorefrontError::CartRejected { status, message } = &err else {
        panic!("expected CartRejected, got: {err:?}");
    };
    assert_eq!(*status, 422);
    assert_eq!(message, "the cart rejected the request");
}

#[tokio::test]
async fn add_to_cart_500_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .add_to_cart(1, Quantity::new(1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::UnexpectedStatus { status: 500, .. }
    ));
}

#[tokio::test]
async fn fetch_cart_reads_item_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc123",
            "item_count": 4,
            "total_price": 10000,
            "items": [
                {"id": 1, "variant_id": 1, "product_id": 111, "title": "Classic Tee",
                 "quantity": 4, "price": 2500, "line_price": 10000}
            ]
        })))
        .mount(&server)
        .await;

    let cart = test_client(&server.uri())
        .fetch_cart()
        .await
        .expect("expected cart");
    assert_eq!(cart.item_count, 4);
    assert_eq!(cart.total_price, 10000);
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.token.as_deref(), Some("abc123"));
}
