//! Page rendering and the pre-render / render / serve pipeline for the
//! catalog front end.
//!
//! [`Site`] owns the catalog client and the [`PageCache`]. Pre-rendering
//! fills the cache for every listing route and every product id the API
//! enumerates; serving answers from the cache and falls back to an on-demand
//! render for anything the pre-render did not produce.

pub mod cache;
pub mod error;
mod html;
pub mod loader;
pub mod routes;
pub mod site;
pub mod views;

pub use cache::{PageCache, PageStatus, RenderedPage};
pub use error::PageError;
pub use loader::{PageData, PageOutcome};
pub use routes::{CardKind, ListingRoute, Route, LISTING_ROUTES};
pub use site::{PrerenderReport, Site};
