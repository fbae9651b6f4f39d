//! PowerHit CLI - Headless driver for the storefront cart and listing.
//!
//! # Usage
//!
//! ```bash
//! # Add a product from the catalog to the cart
//! powerhit cart add --id 1
//!
//! # Add an arbitrary line
//! powerhit cart add --id grip-tape --name "Grip Tape" --price 4.99 --image grip.png
//!
//! # Change a quantity (negative deltas remove at zero)
//! powerhit cart update --id 1 --delta -1
//!
//! # Show the cart or the checkout summary
//! powerhit cart show
//! powerhit cart checkout
//!
//! # Browse the listing
//! powerhit products list --category bats
//! powerhit products list --search willow
//! ```
//!
//! The cart lives in `<storage-dir>/<storage-key>.json` and is shared by
//! every invocation. Logs go to stderr; set `RUST_LOG` to adjust and
//! `POWERHIT_LOG_FORMAT=json` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use powerhit_core::ProductId;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "powerhit")]
#[command(author, version, about = "PowerHit storefront tools")]
struct Cli {
    /// Directory holding the cart slot (overrides `POWERHIT_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Product listing JSON (overrides `POWERHIT_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the product listing
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product id (number or handle)
        #[arg(long)]
        id: ProductId,

        /// Display name (looked up in the catalog when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Unit price (looked up in the catalog when omitted)
        #[arg(long, allow_hyphen_values = true)]
        price: Option<Decimal>,

        /// Image reference
        #[arg(long)]
        image: Option<String>,
    },
    /// Remove a product's line
    Remove {
        #[arg(long)]
        id: ProductId,
    },
    /// Change a line's quantity by a delta
    Update {
        #[arg(long)]
        id: ProductId,

        #[arg(long, allow_hyphen_values = true)]
        delta: i64,
    },
    /// Print the cart
    Show,
    /// Empty the cart
    Clear,
    /// Print the order summary with shipping
    Checkout,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products, optionally filtered
    List {
        /// Category tag (`all` for everything)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive name/category search
        #[arg(long)]
        search: Option<String>,
    },
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "powerhit=info,powerhit_storefront=info".into());

    // JSON lines when POWERHIT_LOG_FORMAT=json, human-readable otherwise
    let json = std::env::var("POWERHIT_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut config = powerhit_storefront::config::StorefrontConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = catalog;
    }

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add {
                id,
                name,
                price,
                image,
            } => commands::cart::add(
                &config,
                &mut out,
                commands::cart::NewLine {
                    id,
                    name,
                    price,
                    image,
                },
            )?,
            CartAction::Remove { id } => commands::cart::remove(&config, &mut out, &id)?,
            CartAction::Update { id, delta } => {
                commands::cart::update(&config, &mut out, &id, delta)?;
            }
            CartAction::Show => commands::cart::show(&config, &mut out)?,
            CartAction::Clear => commands::cart::clear(&config, &mut out)?,
            CartAction::Checkout => commands::cart::checkout(&config, &mut out)?,
        },
        Commands::Products { action } => match action {
            ProductsAction::List { category, search } => commands::products::list(
                &config,
                &mut out,
                category.as_deref(),
                search.as_deref(),
            )?,
        },
    }
    Ok(())
}
