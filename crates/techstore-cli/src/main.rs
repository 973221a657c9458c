mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use techstore_client::CatalogClient;
use techstore_core::Category;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "techstore-cli")]
#[command(about = "TechStore catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pre-render every page and write a static export.
    Build {
        /// Output directory.
        #[arg(long, default_value = "dist")]
        out: PathBuf,
        /// Write the export even when some listing pages failed.
        #[arg(long)]
        allow_failures: bool,
    },
    /// List catalog products, optionally filtered by category slug.
    Products {
        #[arg(long)]
        category: Option<Category>,
    },
    /// Print one product as JSON.
    Product { id: String },
    /// Print the listing route table.
    Routes,
    /// Render one page path and print its HTML.
    Render { path: String },
}

impl Commands {
    /// Whether the command talks to the catalog API and so needs the loaded
    /// configuration.
    fn needs_catalog(&self) -> bool {
        !matches!(self, Commands::Routes)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if !cli.command.needs_catalog() {
        commands::print_routes();
        return Ok(());
    }

    let config = techstore_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = CatalogClient::from_config(&config)?;
    match cli.command {
        Commands::Build {
            out,
            allow_failures,
        } => commands::run_build(client, config.prerender_concurrency, &out, allow_failures).await,
        Commands::Products { category } => commands::run_products(&client, category).await,
        Commands::Product { id } => commands::run_product(&client, &id).await,
        Commands::Render { path } => commands::run_render(client, &path).await,
        Commands::Routes => {
            commands::print_routes();
            Ok(())
        }
    }
}
