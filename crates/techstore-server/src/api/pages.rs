use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use techstore_pages::{PageStatus, RenderedPage};

use super::AppState;

/// Serves any HTML page by its request path, falling back to the 404 page.
pub(super) async fn page(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let page = state.site.serve_path(uri.path()).await;
    html_response(&page, &headers)
}

fn status_code(status: PageStatus) -> StatusCode {
    match status {
        PageStatus::Ok => StatusCode::OK,
        PageStatus::NotFound => StatusCode::NOT_FOUND,
        PageStatus::BadGateway => StatusCode::BAD_GATEWAY,
    }
}

fn html_response(page: &RenderedPage, request_headers: &HeaderMap) -> Response {
    if !page.is_ok() {
        return (
            status_code(page.status),
            [(header::CACHE_CONTROL, "no-store")],
            Html(page.html.clone()),
        )
            .into_response();
    }

    let etag = [(header::ETAG, page.etag.clone())];
    if etag_matches(request_headers.get(header::IF_NONE_MATCH), &page.etag) {
        return (StatusCode::NOT_MODIFIED, etag).into_response();
    }

    (
        StatusCode::OK,
        etag,
        [(header::CACHE_CONTROL, "no-cache")],
        Html(page.html.clone()),
    )
        .into_response()
}

/// Weak comparison of an `If-None-Match` list against the page's `ETag`.
fn etag_matches(if_none_match: Option<&HeaderValue>, etag: &str) -> bool {
    let opaque = |tag: &str| tag.trim_start_matches("W/").to_owned();
    let etag = opaque(etag);
    if_none_match
        .and_then(|v| v.to_str().ok())
        .is_some_and(|list| {
            list.split(',')
                .map(str::trim)
                .any(|tag| tag == "*" || opaque(tag) == etag)
        })
}
