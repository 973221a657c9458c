//! Integration tests for `CatalogClient` using wiremock HTTP mocks.
//!
//! Each test stands up a local mock of the catalog API so no real network
//! traffic is made.

use std::time::Duration;

use serde_json::json;
use techstore_client::{CatalogClient, ClientError};
use techstore_core::Category;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CatalogClient {
    CatalogClient::with_base_url(base_url, Some(Duration::from_secs(5)), "techstore-test/0.1")
        .expect("client construction should not fail")
}

fn product_json(id: &str, category: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": format!("Product {id}"),
        "category": category,
        "price": 100,
        "status": "inStock",
        "rating": 3,
        "averageRating": 4,
        "keyFeatures": ["fast"],
        "reviews": [],
        "image": format!("https://img.example.com/{id}.png")
    })
}

// ---------------------------------------------------------------------------
// Listing loader
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_products_sends_each_category_verbatim_and_keeps_order() {
    let server = MockServer::start().await;

    for category in Category::ALL {
        let slug = category.as_str();
        let body = json!([
            product_json(&format!("{slug}-b"), slug),
            product_json(&format!("{slug}-a"), slug),
            product_json(&format!("{slug}-c"), slug),
        ]);
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("category", slug))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = test_client(&server.uri());
    for category in Category::ALL {
        let slug = category.as_str();
        let products = client
            .list_products(Some(category))
            .await
            .expect("listing should succeed");
        let ids: Vec<String> = products.iter().filter_map(|p| p.id()).collect();
        assert_eq!(
            ids,
            [
                format!("{slug}-b"),
                format!("{slug}-a"),
                format!("{slug}-c")
            ],
            "order must match the API response for {slug}"
        );
    }
}

#[tokio::test]
async fn list_products_without_category_omits_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param_is_missing("category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!([product_json("1", "cpu")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client.list_products(None).await.expect("listing");
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn list_products_forwards_payload_unmodified() {
    let server = MockServer::start().await;
    let body = json!([
        {"_id": "x1", "name": "Odd", "price": "N/A", "warranty": {"years": 3}},
        {"_id": "x2"}
    ]);

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client.list_products(None).await.expect("listing");
    assert_eq!(serde_json::to_value(&products).unwrap(), body);
}

#[tokio::test]
async fn list_products_accepts_records_with_unexpected_field_types() {
    let server = MockServer::start().await;
    let body = json!([
        {"_id": "a1", "name": "Good"},
        {"_id": 42, "name": "Numeric id"},
        {"_id": "a2", "keyFeatures": ["8 cores", 16], "description": null}
    ]);

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let products = client.list_products(None).await.expect("listing");

    assert_eq!(products.len(), 3);
    assert_eq!(products[1].id().as_deref(), Some("42"));
    assert_eq!(products[2].key_features(), ["8 cores", "16"]);
    assert_eq!(serde_json::to_value(&products).unwrap(), body);

    let ids = client.list_product_ids().await.expect("ids");
    assert_eq!(ids, ["a1", "42", "a2"]);
}

#[tokio::test]
async fn list_products_propagates_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .list_products(Some(Category::Psu))
        .await
        .expect_err("500 must surface as an error");
    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
}

#[tokio::test]
async fn list_products_reports_non_array_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.list_products(None).await.expect_err("bad body");
    assert!(
        matches!(err, ClientError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn list_products_reports_unreachable_host_as_http_error() {
    // Nothing listens on port 1 of the loopback interface.
    let client = test_client("http://127.0.0.1:1");
    let err = client.list_products(None).await.expect_err("no server");
    assert!(
        matches!(err, ClientError::Http(_)),
        "expected Http, got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Detail loader
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_product_returns_exact_object() {
    let server = MockServer::start().await;
    let mut body = product_json("64f1", "monitor");
    body["refreshRate"] = json!("165Hz");

    Mock::given(method("GET"))
        .and(path("/products/64f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let product = client.get_product("64f1").await.expect("product");
    assert_eq!(product.id().as_deref(), Some("64f1"));
    assert_eq!(serde_json::to_value(&product).unwrap(), body);
}

#[tokio::test]
async fn get_product_keeps_null_fields() {
    let server = MockServer::start().await;
    let body = json!({"_id": "n1", "name": "X", "description": null, "image": null});

    Mock::given(method("GET"))
        .and(path("/products/n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let product = client.get_product("n1").await.expect("product");
    assert_eq!(product.as_value(), &body);
}

#[tokio::test]
async fn get_product_maps_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_product("missing").await.expect_err("404");
    assert!(err.is_not_found(), "expected NotFound, got: {err:?}");
}

#[tokio::test]
async fn get_product_surfaces_other_statuses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.get_product("broken").await.expect_err("503");
    assert!(matches!(
        err,
        ClientError::UnexpectedStatus { status: 503, .. }
    ));
}

// ---------------------------------------------------------------------------
// Path enumeration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_product_ids_skips_products_without_id() {
    let server = MockServer::start().await;
    let body = json!([
        product_json("a", "cpu"),
        {"name": "no id"},
        {"_id": "", "name": "blank id"},
        product_json("b", "ram"),
    ]);

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let ids = client.list_product_ids().await.expect("ids");
    assert_eq!(ids, ["a", "b"]);
}
