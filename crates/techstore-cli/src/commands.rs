//! Command handlers for the CLI.
//!
//! Listing and table output goes to stdout; logs go to stderr so page HTML
//! and JSON can be piped.

use std::path::Path;

use anyhow::Context;
use techstore_client::CatalogClient;
use techstore_core::{Category, Product};
use techstore_pages::{PageStatus, Site, LISTING_ROUTES};

/// Pre-render the whole site and export it to `out`.
///
/// # Errors
///
/// Returns an error if any page failed to render (unless `allow_failures`)
/// or the export could not be written.
pub(crate) async fn run_build(
    client: CatalogClient,
    concurrency: usize,
    out: &Path,
    allow_failures: bool,
) -> anyhow::Result<()> {
    let site = Site::new(client, concurrency);
    let report = site.prerender().await;

    for (path, error) in &report.failed {
        eprintln!("failed: {path}: {error}");
    }
    if !report.is_success() && !allow_failures {
        anyhow::bail!(
            "{} page(s) failed to render; nothing written to {}",
            report.failed.len(),
            out.display()
        );
    }

    let files = site
        .export(out)
        .await
        .with_context(|| format!("failed to write export to {}", out.display()))?;

    println!(
        "rendered {} pages ({} not found, {} failed); wrote {files} files to {}",
        report.rendered.len(),
        report.not_found.len(),
        report.failed.len(),
        out.display()
    );
    Ok(())
}

/// Print the catalog, or one category of it, as a table.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub(crate) async fn run_products(
    client: &CatalogClient,
    category: Option<Category>,
) -> anyhow::Result<()> {
    let products = client.list_products(category).await?;

    if products.is_empty() {
        println!(
            "no products found{}",
            category
                .map(|c| format!(" in category '{c}'"))
                .unwrap_or_default()
        );
        return Ok(());
    }

    print!("{}", product_table(&products));
    Ok(())
}

/// Print one product as pretty JSON, exactly as the API returned it.
///
/// `null` fields and fields the catalog model does not read are included.
///
/// # Errors
///
/// Returns an error if the product does not exist or the request fails.
pub(crate) async fn run_product(client: &CatalogClient, id: &str) -> anyhow::Result<()> {
    let product = client.get_product(id).await.map_err(|e| {
        if e.is_not_found() {
            anyhow::anyhow!("product '{id}' not found")
        } else {
            anyhow::Error::new(e)
        }
    })?;
    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}

pub(crate) fn print_routes() {
    print!("{}", route_table());
}

/// Render a single page path and print its HTML.
///
/// # Errors
///
/// Returns an error when the page is not found or its data could not be
/// loaded; the HTML is still printed first.
pub(crate) async fn run_render(client: CatalogClient, path: &str) -> anyhow::Result<()> {
    let site = Site::new(client, 1);
    let page = site.serve_path(path).await;
    println!("{}", page.html);

    match page.status {
        PageStatus::Ok => Ok(()),
        status => anyhow::bail!("{path} rendered with status {}", status.code()),
    }
}

fn product_table(products: &[Product]) -> String {
    let mut out = format!(
        "{:<26}{:<14}{:<14}{:<14}NAME\n",
        "ID", "CATEGORY", "PRICE", "STATUS"
    );
    for product in products {
        out.push_str(&format!(
            "{:<26}{:<14}{:<14}{:<14}{}\n",
            product.id().unwrap_or_else(|| "-".to_owned()),
            product.category_label(),
            product.price_text(),
            product.status().label(),
            product.name()
        ));
    }
    out
}

fn route_table() -> String {
    let mut out = format!(
        "{:<18}{:<15}{:<10}{:<8}DATA FIELD\n",
        "PATH", "HEADING", "CATEGORY", "CARD"
    );
    for route in &LISTING_ROUTES {
        out.push_str(&format!(
            "{:<18}{:<15}{:<10}{:<8}{}\n",
            route.path,
            route.heading,
            route.category.map_or("-", Category::as_str),
            format!("{:?}", route.card).to_lowercase(),
            route.data_field
        ));
    }
    out.push_str("/products/{id}    product detail\n");
    out
}
