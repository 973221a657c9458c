use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::json;
use techstore_client::CatalogClient;
use techstore_pages::Site;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn test_app(server: &MockServer) -> (Router, Site) {
    let client = CatalogClient::with_base_url(
        &server.uri(),
        Some(Duration::from_secs(5)),
        "techstore-test/0.1",
    )
    .expect("client");
    let site = Site::new(client, 2);
    (build_app(AppState { site: site.clone() }), site)
}

async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri)).await
}

async fn send(app: Router, builder: axum::http::request::Builder) -> Response {
    app.oneshot(builder.body(Body::empty()).expect("request"))
        .await
        .expect("response")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("json body")
}

async fn mount_psu(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("category", "psu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "u1", "name": "Corsair RM750", "category": "psu", "price": 120}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn listing_page_is_served_with_etag_and_request_id() {
    let server = MockServer::start().await;
    mount_psu(&server).await;
    let (app, _) = test_app(&server);

    let response = get(app, "/psu").await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert!(headers[header::ETAG]
        .to_str()
        .expect("ascii etag")
        .starts_with("W/\""));
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .expect("content type")
        .starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains("Corsair RM750"));
    assert!(html.contains(">Power Supply</h2>"));
}

#[tokio::test]
async fn matching_if_none_match_returns_not_modified() {
    let server = MockServer::start().await;
    mount_psu(&server).await;
    let (app, _) = test_app(&server);

    let first = get(app.clone(), "/psu").await;
    let etag = first.headers()[header::ETAG].clone();

    let second = send(
        app,
        Request::builder()
            .uri("/psu")
            .header(header::IF_NONE_MATCH, etag.clone()),
    )
    .await;

    assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(second.headers()[header::ETAG], etag);
    assert!(body_text(second).await.is_empty());
}

#[tokio::test]
async fn gzip_and_identity_bodies_share_a_weak_etag() {
    let server = MockServer::start().await;
    mount_psu(&server).await;
    let (app, _) = test_app(&server);

    let plain = get(app.clone(), "/psu").await;
    let gzip = send(
        app,
        Request::builder()
            .uri("/psu")
            .header(header::ACCEPT_ENCODING, "gzip"),
    )
    .await;

    assert_eq!(gzip.headers()[header::CONTENT_ENCODING], "gzip");
    assert!(plain.headers().get(header::CONTENT_ENCODING).is_none());
    assert_eq!(plain.headers()[header::ETAG], gzip.headers()[header::ETAG]);
    assert!(plain.headers()[header::ETAG]
        .to_str()
        .expect("ascii etag")
        .starts_with("W/"));
}

#[tokio::test]
async fn trailing_slash_serves_the_same_page() {
    let server = MockServer::start().await;
    mount_psu(&server).await;
    let (app, _) = test_app(&server);

    let response = get(app, "/psu/").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn listing_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (app, site) = test_app(&server);

    let response = get(app, "/monitor").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    assert!(site.cache().is_empty().await);
}

#[tokio::test]
async fn detail_page_renders_and_unknown_id_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "abc", "name": "Ryzen 7", "category": "cpu", "rating": 4
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let (app, _) = test_app(&server);

    let found = get(app.clone(), "/products/abc").await;
    assert_eq!(found.status(), StatusCode::OK);
    let html = body_text(found).await;
    assert!(html.contains("Ryzen 7"));
    assert!(html.contains("Processor"));

    let missing = get(app, "/products/missing").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_path_gets_the_not_found_page() {
    let server = MockServer::start().await;
    let (app, _) = test_app(&server);

    let response = get(app, "/gpu").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(body_text(response).await.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn root_redirects_to_all_products() {
    let server = MockServer::start().await;
    let (app, _) = test_app(&server);

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/products");
}

#[tokio::test]
async fn page_data_is_published_under_route_field() {
    let server = MockServer::start().await;
    mount_psu(&server).await;
    let (app, _) = test_app(&server);

    let response = get(app, "/_data/psu.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["psu"][0]["_id"], "u1");
    assert_eq!(json["psu"][0]["price"], 120);
}

#[tokio::test]
async fn page_data_success_is_not_wrapped_in_an_envelope() {
    let server = MockServer::start().await;
    mount_psu(&server).await;
    let (app, _) = test_app(&server);

    let response = get(app, "/_data/psu.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let keys: Vec<&String> = json.as_object().expect("object").keys().collect();
    assert_eq!(keys, ["psu"]);
}

#[tokio::test]
async fn page_data_errors_are_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("category", "monitor"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let (app, _) = test_app(&server);

    let ghost = send(
        app.clone(),
        Request::builder()
            .uri("/_data/products/ghost.json")
            .header("x-request-id", "req-ghost"),
    )
    .await;
    assert_eq!(ghost.status(), StatusCode::NOT_FOUND);
    let json = body_json(ghost).await;
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["meta"]["request_id"], "req-ghost");

    let monitor = get(app.clone(), "/_data/monitor.json").await;
    assert_eq!(monitor.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(monitor).await["error"]["code"], "upstream_error");

    let unknown = get(app, "/_data/gpu.json").await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_cached_page_count() {
    let server = MockServer::start().await;
    mount_psu(&server).await;
    let (app, _) = test_app(&server);

    get(app.clone(), "/psu").await;
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["cached_pages"], 1);
    assert!(json["meta"]["request_id"].is_string());
}

#[test]
fn api_error_upstream_maps_to_bad_gateway() {
    let response = ApiError::new("req-1", "upstream_error", "boom").into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
