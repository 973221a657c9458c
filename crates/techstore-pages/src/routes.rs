//! The route table: five category listings plus the product detail route.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use techstore_core::Category;

/// Characters left bare in a product id path segment. Everything else,
/// including `.` and `/`, is percent-encoded so an id can never name another
/// path or escape an export directory.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');

/// Which card component a listing renders its products with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKind {
    /// Plain summary tile linking to the detail page.
    Product,
    /// Summary tile with a selection affordance for the PC builder.
    Select,
}

/// One category-scoped listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListingRoute {
    pub path: &'static str,
    pub heading: &'static str,
    /// `None` lists the whole catalog.
    pub category: Option<Category>,
    pub card: CardKind,
    /// Key the product array is published under in the page data payload.
    pub data_field: &'static str,
}

pub static LISTING_ROUTES: [ListingRoute; 5] = [
    ListingRoute {
        path: "/products",
        heading: "All Products",
        category: None,
        card: CardKind::Product,
        data_field: "products",
    },
    ListingRoute {
        path: "/monitor",
        heading: "Monitor",
        category: Some(Category::Monitor),
        card: CardKind::Product,
        data_field: "monitors",
    },
    ListingRoute {
        path: "/psu",
        heading: "Power Supply",
        category: Some(Category::Psu),
        card: CardKind::Product,
        data_field: "psu",
    },
    ListingRoute {
        path: "/select/ram",
        heading: "Ram",
        category: Some(Category::Ram),
        card: CardKind::Select,
        data_field: "rams",
    },
    ListingRoute {
        path: "/select/storage",
        heading: "Storage",
        category: Some(Category::Storage),
        card: CardKind::Select,
        data_field: "storages",
    },
];

/// A page the site can render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Listing(&'static ListingRoute),
    /// Product detail page; holds the decoded product id.
    Detail(String),
}

impl Route {
    /// Resolves a raw (percent-encoded) request path.
    ///
    /// A single trailing slash is ignored. Returns `None` for paths outside
    /// the route table, including detail paths whose id is empty or not
    /// valid UTF-8 after decoding.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };

        if let Some(listing) = LISTING_ROUTES.iter().find(|r| r.path == path) {
            return Some(Route::Listing(listing));
        }

        let raw_id = path.strip_prefix("/products/")?;
        if raw_id.is_empty() || raw_id.contains('/') {
            return None;
        }
        let id = percent_decode_str(raw_id).decode_utf8().ok()?;
        Some(Route::Detail(id.into_owned()))
    }

    /// Canonical request path; also the page cache key.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Listing(listing) => listing.path.to_owned(),
            Route::Detail(id) => detail_path(id),
        }
    }
}

/// `/products/{id}` with the id percent-encoded as one segment.
#[must_use]
pub fn detail_path(id: &str) -> String {
    format!("/products/{}", utf8_percent_encode(id, ID_SEGMENT))
}
