//! Shopping App CLI - Catalog browsing and cart replay.
//!
//! # Usage
//!
//! ```bash
//! # List every product in the remote catalog
//! shop-cli catalog list
//!
//! # Show one product's detail
//! shop-cli catalog show 3
//!
//! # Apply cart commands to a fresh cart and log the result
//! shop-cli cart replay add:1 add:1 add:2 dec:1 inc:2
//! ```
//!
//! # Commands
//!
//! - `catalog list` - Fetch and log the catalog
//! - `catalog show` - Fetch the catalog and log one product
//! - `cart replay` - Replay add/inc/dec/clear commands against an in-memory cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopping_app_core::{CartAction, ProductId};
use shopping_app_storefront::config::{DEFAULT_CATALOG_URL, parse_catalog_url};
use url::Url;

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Shopping App CLI tools")]
struct Cli {
    /// Product catalog endpoint
    #[arg(long, env = "CATALOG_URL", default_value = DEFAULT_CATALOG_URL, value_parser = catalog_url, global = true)]
    catalog_url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the remote product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Exercise the cart store
    Cart {
        #[command(subcommand)]
        action: CartSubcommand,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List every product (id, title, price)
    List,
    /// Show one product's detail
    Show {
        /// Product ID
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CartSubcommand {
    /// Apply commands to a fresh cart and log the resulting lines
    Replay {
        /// Commands: `add:<id>`, `inc:<id>`, `dec:<id>` or `clear`
        #[arg(required = true)]
        commands: Vec<CartAction>,
    },
}

fn catalog_url(value: &str) -> Result<Url, String> {
    parse_catalog_url("CATALOG_URL", value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(cli.catalog_url).await?,
            CatalogAction::Show { id } => commands::catalog::show(cli.catalog_url, id).await?,
        },
        Commands::Cart { action } => match action {
            CartSubcommand::Replay { commands } => {
                commands::cart::replay(cli.catalog_url, &commands).await?;
            }
        },
    }
    Ok(())
}
