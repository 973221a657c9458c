use axum::{
    extract::State,
    http::Uri,
    Extension, Json,
};
use serde_json::Value;
use techstore_pages::{PageStatus, Route};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

const DATA_PREFIX: &str = "/_data";

/// `GET /_data/<page path>.json`: the data payload a page was rendered from.
pub(super) async fn page_data(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    uri: Uri,
) -> Result<Json<Value>, ApiError> {
    let route = uri
        .path()
        .strip_prefix(DATA_PREFIX)
        .and_then(|path| path.strip_suffix(".json"))
        .and_then(Route::parse)
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", "no page at this path"))?;

    let page = state.site.serve(&route).await;
    match (&page.props, page.status) {
        (Some(props), _) => Ok(Json(props.clone())),
        (None, PageStatus::BadGateway) => {
            Err(ApiError::new(req_id.0, "upstream_error", "catalog API request failed"))
        }
        (None, _) => Err(ApiError::new(req_id.0, "not_found", "page not found")),
    }
}
