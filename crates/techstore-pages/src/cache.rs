//! Rendered-page cache keyed by canonical route path.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

/// Outcome class of a rendered page, mapped to an HTTP status by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Ok,
    NotFound,
    /// The catalog API failed while rendering a listing.
    BadGateway,
}

impl PageStatus {
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            PageStatus::Ok => 200,
            PageStatus::NotFound => 404,
            PageStatus::BadGateway => 502,
        }
    }
}

/// A fully rendered page plus the data payload it was rendered from.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub html: String,
    /// Page data as published on the `/_data` endpoint; `None` unless `Ok`.
    pub props: Option<serde_json::Value>,
    /// Weak `ETag` over the hex SHA-256 of `html`. Weak because the server
    /// may send the body gzip-encoded or as-is under the same tag.
    pub etag: String,
    pub rendered_at: DateTime<Utc>,
}

impl RenderedPage {
    #[must_use]
    pub fn new(status: PageStatus, html: String, props: Option<serde_json::Value>) -> Self {
        let etag = format!("W/\"{:x}\"", Sha256::digest(html.as_bytes()));
        Self {
            status,
            html,
            props,
            etag,
            rendered_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == PageStatus::Ok
    }
}

/// Shared map of route path to rendered page. Cloning shares the map.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: Arc<RwLock<HashMap<String, Arc<RenderedPage>>>>,
}

impl PageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, path: &str) -> Option<Arc<RenderedPage>> {
        self.pages.read().await.get(path).cloned()
    }

    /// Stores `page` under `path`, replacing any earlier render.
    pub async fn insert(&self, path: String, page: Arc<RenderedPage>) {
        self.pages.write().await.insert(path, page);
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.is_empty()
    }

    /// All cached pages sorted by path.
    pub async fn snapshot(&self) -> Vec<(String, Arc<RenderedPage>)> {
        let mut pages: Vec<(String, Arc<RenderedPage>)> = self
            .pages
            .read()
            .await
            .iter()
            .map(|(path, page)| (path.clone(), Arc::clone(page)))
            .collect();
        pages.sort_by(|a, b| a.0.cmp(&b.0));
        pages
    }
}
