//! HTML views: the shared layout, the two product cards and every page.
//!
//! All views are pure functions of their inputs. Every interpolated value
//! passes through [`escape`].

use techstore_core::Product;

use crate::html::{escape, star_icons};
use crate::routes::{detail_path, CardKind, ListingRoute, LISTING_ROUTES};

const SITE_NAME: &str = "TechStore";

const GRID_CLASS: &str = "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-5 gap-5 p-3";

/// Wraps page content in the document shell with the site navigation.
#[must_use]
pub fn layout(title: &str, body: &str) -> String {
    let nav: String = LISTING_ROUTES
        .iter()
        .map(|r| format!(r#"<a class="btn btn-ghost" href="{}">{}</a>"#, r.path, r.heading))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {SITE_NAME}</title>
</head>
<body>
<header class="navbar bg-base-100"><a class="text-xl font-bold" href="/products">{SITE_NAME}</a><nav>{nav}</nav></header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Summary tile for one product.
#[must_use]
pub fn product_card(product: &Product) -> String {
    card(product, "")
}

/// Summary tile plus the selection button the PC builder listens for.
///
/// The button carries `data-action="select-product"` with the product id and
/// category; what a selection does is up to the page script consuming it.
#[must_use]
pub fn select_product_card(product: &Product) -> String {
    let button = format!(
        r#"<div class="card-actions justify-end"><button type="button" class="btn btn-primary" data-action="select-product" data-product-id="{id}" data-category="{category}">Select</button></div>"#,
        id = escape(&product.id().unwrap_or_default()),
        category = escape(&product.category()),
    );
    card(product, &button)
}

fn card(product: &Product, actions: &str) -> String {
    let raw_name = product.name();
    let name = escape(&raw_name);
    let href = product.id().as_deref().map(detail_path);

    let image = if product.image().is_empty() {
        String::new()
    } else {
        format!(
            r#"<figure><img class="h-48 object-cover" src="{src}" alt="{name}" loading="lazy"></figure>"#,
            src = escape(&product.image()),
        )
    };
    let (image, title) = match &href {
        Some(href) => (
            format!(r#"<a href="{href}">{image}</a>"#),
            format!(r#"<a href="{href}">{name}</a>"#),
        ),
        None => (image, name.into_owned()),
    };

    format!(
        r#"<div class="card bg-base-100 shadow-xl" data-product-id="{id}">{image}<div class="card-body"><h2 class="card-title">{title}</h2><p>Category : <span class="font-medium">{category}</span></p><p>Price : <span class="font-medium">{price}</span></p><p>Status : <span class="font-medium">{status}</span></p><p class="flex items-center gap-2" data-rating="rating">Rating : <span class="flex">{stars}</span></p>{actions}</div></div>"#,
        id = escape(&product.id().unwrap_or_default()),
        category = product.category_label(),
        price = escape(&product.price_text()),
        status = product.status().label(),
        stars = star_icons(product.rating_icons()),
    )
}

/// A listing page: heading plus a grid of cards in the given order.
#[must_use]
pub fn listing_page(route: &ListingRoute, products: &[Product]) -> String {
    let render = match route.card {
        CardKind::Product => product_card,
        CardKind::Select => select_product_card,
    };
    let cards: String = products.iter().map(render).collect();

    let body = format!(
        r#"<div class="max-w-7xl mx-auto min-h-screen"><div class="mt-5"><h2 class="text-center text-lg font-semibold mb-3">{heading}</h2><div class="{GRID_CLASS}">{cards}</div></div></div>"#,
        heading = route.heading,
    );
    layout(route.heading, &body)
}

/// The product detail page.
///
/// `id` is the id from the request path; it keys the review widget mount
/// point, which the page script fills in.
#[must_use]
pub fn detail_page(id: &str, product: &Product) -> String {
    let image = if product.image().is_empty() {
        String::new()
    } else {
        format!(
            r#"<img class="object-cover" src="{}" alt="">"#,
            escape(&product.image())
        )
    };

    let features: String = product
        .key_features()
        .iter()
        .map(|f| format!(r#"<p class="text-md leading-relaxed">{}</p>"#, escape(f)))
        .collect();

    let pill = "bg-slate-200 text-sm py-1 px-2 rounded-full inline-block my-1";
    let body = format!(
        r#"<div class="p-3 mt-5 md:mt-10 container mx-auto min-h-screen">
<div class="xl:flex">
<div class="xl:flex-1"><div class="flex-1 relative w-full max-w-sm h-80 mx-auto">{image}</div></div>
<div class="xl:flex-1">
<h2 class="text-lg md:text-2xl font-semibold text-violet-600">{name}</h2>
<div class="mt-3">
<p class="{pill}">Price : <span class="font-medium">{price}</span></p>
<p class="{pill} mx-3">Status : <span class="font-medium">{status}</span></p>
<p class="{pill}">Category : <span class="font-medium">{category}</span></p>
</div>
<div class="mt-3">
<p class="flex items-center gap-2" data-rating="rating">Rating : <span class="flex">{rating}</span></p>
<p class="flex items-center gap-2" data-rating="averageRating">Average Rating : <span class="flex">{average}</span></p>
</div>
<div><h3 class="text-lg font-medium mt-3 mb-1">Key Features</h3>{features}</div>
</div>
</div>
<div class="mt-5"><h3 class="text-xl font-medium mb-1">Description</h3><p class="text-justify leading-relaxed">{description}</p></div>
<section class="mt-5" data-component="product-review" data-product-id="{id}"></section>
</div>"#,
        name = escape(&product.name()),
        price = escape(&product.price_text()),
        status = product.status().label(),
        category = product.category_label(),
        rating = star_icons(product.rating_icons()),
        average = star_icons(product.average_rating_icons()),
        description = escape(&product.description()),
        id = escape(id),
    );

    let name = product.name();
    let title = if name.is_empty() { "Product" } else { &name };
    layout(title, &body)
}

#[must_use]
pub fn not_found_page() -> String {
    layout(
        "404",
        r#"<div class="min-h-screen flex flex-col items-center justify-center"><h1 class="text-3xl font-semibold">404</h1><p>This page could not be found.</p><a class="btn mt-5" href="/products">Back to all products</a></div>"#,
    )
}

#[must_use]
pub fn upstream_error_page() -> String {
    layout(
        "Catalog unavailable",
        r#"<div class="min-h-screen flex flex-col items-center justify-center"><h1 class="text-3xl font-semibold">502</h1><p>The product catalog is unavailable right now. Please try again shortly.</p></div>"#,
    )
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
