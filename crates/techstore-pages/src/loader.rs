//! Page loaders: one fetch per page, mapped straight into page data.
//!
//! Listing loads are unguarded: every client error comes back as
//! [`PageOutcome::Failed`]. Detail loads are guarded: any client error
//! degrades to [`PageOutcome::NotFound`].

use serde_json::{json, Value};
use techstore_client::{CatalogClient, ClientError};
use techstore_core::Product;

use crate::cache::{PageStatus, RenderedPage};
use crate::routes::{ListingRoute, Route};
use crate::views;

/// Data a page is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub enum PageData {
    Listing {
        route: &'static ListingRoute,
        products: Vec<Product>,
    },
    Detail {
        id: String,
        product: Product,
    },
}

impl PageData {
    /// The page data payload: the product array under the route's field name
    /// for listings, `{"product": ...}` for detail pages.
    #[must_use]
    pub fn props(&self) -> Value {
        match self {
            PageData::Listing { route, products } => json!({ route.data_field: products }),
            PageData::Detail { product, .. } => json!({ "product": product }),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        match self {
            PageData::Listing { route, products } => views::listing_page(route, products),
            PageData::Detail { id, product } => views::detail_page(id, product),
        }
    }
}

/// Result of loading one page.
#[derive(Debug)]
pub enum PageOutcome {
    Found(PageData),
    NotFound,
    Failed(ClientError),
}

impl PageOutcome {
    /// Renders the outcome into a page: the view for `Found`, the 404 page
    /// for `NotFound`, the upstream error page for `Failed`.
    #[must_use]
    pub fn to_page(&self) -> RenderedPage {
        match self {
            PageOutcome::Found(data) => {
                RenderedPage::new(PageStatus::Ok, data.render(), Some(data.props()))
            }
            PageOutcome::NotFound => {
                RenderedPage::new(PageStatus::NotFound, views::not_found_page(), None)
            }
            PageOutcome::Failed(_) => {
                RenderedPage::new(PageStatus::BadGateway, views::upstream_error_page(), None)
            }
        }
    }
}

/// Fetches the products for a listing route.
///
/// # Errors
///
/// Propagates every [`ClientError`] unchanged.
pub async fn load_listing(
    client: &CatalogClient,
    route: &ListingRoute,
) -> Result<Vec<Product>, ClientError> {
    client.list_products(route.category).await
}

/// Fetches one product, converting any failure into `None`.
pub async fn load_detail(client: &CatalogClient, id: &str) -> Option<Product> {
    match client.get_product(id).await {
        Ok(product) => Some(product),
        Err(e) if e.is_not_found() => {
            tracing::info!(product_id = id, "product not found");
            None
        }
        Err(e) => {
            tracing::warn!(product_id = id, error = %e, "product fetch failed; serving not found");
            None
        }
    }
}

/// Loads the data for any route.
pub async fn load(client: &CatalogClient, route: &Route) -> PageOutcome {
    match route {
        Route::Listing(listing) => match load_listing(client, listing).await {
            Ok(products) => PageOutcome::Found(PageData::Listing {
                route: listing,
                products,
            }),
            Err(e) => {
                tracing::error!(route = listing.path, error = %e, "listing fetch failed");
                PageOutcome::Failed(e)
            }
        },
        Route::Detail(id) => match load_detail(client, id).await {
            Some(product) => PageOutcome::Found(PageData::Detail {
                id: id.clone(),
                product,
            }),
            None => PageOutcome::NotFound,
        },
    }
}
