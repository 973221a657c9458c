//! The pre-render / render / serve pipeline.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use techstore_client::CatalogClient;

use crate::cache::{PageCache, PageStatus, RenderedPage};
use crate::error::PageError;
use crate::loader::{self, PageOutcome};
use crate::routes::{Route, LISTING_ROUTES};
use crate::views;

/// Summary of one pre-render pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PrerenderReport {
    /// Product ids returned by path enumeration (after de-duplication).
    pub enumerated_ids: usize,
    /// Paths rendered and cached.
    pub rendered: Vec<String>,
    /// Detail paths that resolved to not found.
    pub not_found: Vec<String>,
    /// Paths whose generation failed, with the error message.
    pub failed: Vec<(String, String)>,
}

impl PrerenderReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The catalog site: a client, a page cache and the rendering pipeline.
#[derive(Debug, Clone)]
pub struct Site {
    client: CatalogClient,
    cache: PageCache,
    prerender_concurrency: usize,
}

impl Site {
    #[must_use]
    pub fn new(client: CatalogClient, prerender_concurrency: usize) -> Self {
        Self {
            client,
            cache: PageCache::new(),
            prerender_concurrency: prerender_concurrency.max(1),
        }
    }

    #[must_use]
    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    #[must_use]
    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// Renders every listing route and every enumerated product page into
    /// the cache.
    ///
    /// Enumeration failure is logged and leaves detail pages to the fallback
    /// render path. Listing failures are recorded in the report.
    pub async fn prerender(&self) -> PrerenderReport {
        let mut routes: Vec<Route> = LISTING_ROUTES.iter().map(Route::Listing).collect();

        let mut report = PrerenderReport::default();
        match self.client.list_product_ids().await {
            Ok(ids) => {
                let mut seen = HashSet::new();
                for id in ids {
                    if seen.insert(id.clone()) {
                        routes.push(Route::Detail(id));
                    }
                }
                report.enumerated_ids = seen.len();
            }
            Err(e) => {
                tracing::warn!(error = %e, "product id enumeration failed; detail pages will render on demand");
            }
        }

        tracing::info!(
            routes = routes.len(),
            concurrency = self.prerender_concurrency,
            "pre-rendering pages"
        );

        let results: Vec<(String, PageOutcome)> = stream::iter(routes)
            .map(|route| async move {
                let (_, outcome) = self.render_outcome(&route).await;
                (route.path(), outcome)
            })
            .buffer_unordered(self.prerender_concurrency)
            .collect()
            .await;

        for (path, outcome) in results {
            match outcome {
                PageOutcome::Found(_) => report.rendered.push(path),
                PageOutcome::NotFound => report.not_found.push(path),
                PageOutcome::Failed(e) => report.failed.push((path, e.to_string())),
            }
        }
        report.rendered.sort();
        report.not_found.sort();
        report.failed.sort();

        tracing::info!(
            rendered = report.rendered.len(),
            not_found = report.not_found.len(),
            failed = report.failed.len(),
            "pre-render finished"
        );
        report
    }

    /// Answers a route from the cache, rendering it on a miss.
    pub async fn serve(&self, route: &Route) -> Arc<RenderedPage> {
        let path = route.path();
        if let Some(page) = self.cache.get(&path).await {
            tracing::debug!(path = %path, "page cache hit");
            return page;
        }
        tracing::debug!(path = %path, "page cache miss; rendering on demand");
        self.render(route).await
    }

    /// Answers a raw request path; paths outside the route table get the 404 page.
    pub async fn serve_path(&self, path: &str) -> Arc<RenderedPage> {
        match Route::parse(path) {
            Some(route) => self.serve(&route).await,
            None => Arc::new(self.not_found()),
        }
    }

    /// Renders `route` now, caching the result when it succeeded.
    ///
    /// Not-found and failed renders are never cached, so a product added to
    /// the catalog later, or a listing whose fetch failed, is retried on the
    /// next request.
    pub async fn render(&self, route: &Route) -> Arc<RenderedPage> {
        self.render_outcome(route).await.0
    }

    #[must_use]
    pub fn not_found(&self) -> RenderedPage {
        RenderedPage::new(PageStatus::NotFound, views::not_found_page(), None)
    }

    /// Writes every cached page to `dir` as `<path>/index.html`, its page
    /// data as `_data<path>.json`, and the shared `404.html`.
    ///
    /// Detail ids are written decoded (`products/a b/`), matching the decoded
    /// request path a static host looks up. Ids that are not a safe single
    /// file name (`.`, `..`, or containing `/`, `\` or NUL) keep their
    /// percent-encoded form.
    ///
    /// Returns the number of files written.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Write`] on any filesystem failure and
    /// [`PageError::Encode`] if a page data payload cannot be serialised.
    pub async fn export(&self, dir: &Path) -> Result<usize, PageError> {
        let mut written = 0;

        for (path, page) in self.cache.snapshot().await {
            if !page.is_ok() {
                continue;
            }
            let relative = export_relative(&path);

            let html_path = dir.join(&relative).join("index.html");
            write_file(&html_path, page.html.as_bytes()).await?;
            written += 1;

            if let Some(props) = &page.props {
                let bytes = serde_json::to_vec_pretty(props).map_err(|source| PageError::Encode {
                    route: path.clone(),
                    source,
                })?;
                let data_path = dir.join("_data").join(format!("{relative}.json"));
                write_file(&data_path, &bytes).await?;
                written += 1;
            }
        }

        write_file(&dir.join("404.html"), self.not_found().html.as_bytes()).await?;
        written += 1;

        tracing::info!(dir = %dir.display(), files = written, "static export written");
        Ok(written)
    }

    async fn render_outcome(&self, route: &Route) -> (Arc<RenderedPage>, PageOutcome) {
        let outcome = loader::load(&self.client, route).await;
        let page = Arc::new(outcome.to_page());
        if page.is_ok() {
            self.cache.insert(route.path(), Arc::clone(&page)).await;
        }
        (page, outcome)
    }
}

/// Location of a cached page relative to the export root.
fn export_relative(path: &str) -> String {
    match Route::parse(path) {
        Some(Route::Detail(id)) if is_plain_file_name(&id) => format!("products/{id}"),
        _ => path.trim_start_matches('/').to_owned(),
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), PageError> {
    let wrap = |source| PageError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(wrap)?;
    }
    tokio::fs::write(path, bytes).await.map_err(wrap)
}
