//! `powerhit cart` commands.

use std::io::Write;

use powerhit_core::{Money, ProductId};
use powerhit_storefront::cart::CartStore;
use powerhit_storefront::catalog::ProductListing;
use powerhit_storefront::config::StorefrontConfig;
use powerhit_storefront::notification::ADDED_TO_CART;
use powerhit_storefront::storage::FileStorage;
use powerhit_storefront::views::{CartView, CheckoutSummary};
use rust_decimal::Decimal;

use super::CommandError;

/// Arguments for `cart add`. Missing fields come from the catalog.
#[derive(Debug)]
pub struct NewLine {
    pub id: ProductId,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
}

fn open(config: &StorefrontConfig) -> CartStore<FileStorage> {
    let cart = CartStore::load(
        FileStorage::new(&config.storage_dir),
        &config.storage_key,
    );
    tracing::debug!(
        key = cart.key(),
        dir = %cart.storage().dir().display(),
        lines = cart.len(),
        "Cart opened"
    );
    cart
}

/// Add one unit of a product.
///
/// # Errors
///
/// Fails if the product is unknown and not fully described, or the cart
/// cannot be saved.
pub fn add(
    config: &StorefrontConfig,
    out: &mut impl Write,
    line: NewLine,
) -> Result<(), CommandError> {
    let NewLine {
        id,
        name,
        price,
        image,
    } = line;

    let (name, price, image) = match (name, price) {
        (Some(name), Some(price)) => (name, price, image.unwrap_or_default()),
        (name, price) => {
            let listing = ProductListing::load(&config.catalog_path)?;
            let product = listing
                .product(&id)
                .ok_or_else(|| CommandError::UnknownProduct(id.to_string()))?;
            (
                name.unwrap_or_else(|| product.name.clone()),
                price.unwrap_or(product.price),
                image.unwrap_or_else(|| product.image.clone()),
            )
        }
    };

    let mut cart = open(config);
    cart.add(id, name, price, image)?;

    writeln!(
        out,
        "{ADDED_TO_CART} {} item(s), subtotal {}",
        cart.total_item_count(),
        Money::new(cart.subtotal(), config.currency)
    )?;
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Fails if the cart cannot be saved.
pub fn remove(
    config: &StorefrontConfig,
    out: &mut impl Write,
    id: &ProductId,
) -> Result<(), CommandError> {
    let mut cart = open(config);
    if cart.get(id).is_none() {
        tracing::info!(%id, "Product not in cart");
    }
    cart.remove(id)?;
    write_cart(config, &cart, out)
}

/// Change a line's quantity.
///
/// # Errors
///
/// Fails if the cart cannot be saved.
pub fn update(
    config: &StorefrontConfig,
    out: &mut impl Write,
    id: &ProductId,
    delta: i64,
) -> Result<(), CommandError> {
    let mut cart = open(config);
    cart.update_quantity(id, delta)?;
    write_cart(config, &cart, out)
}

/// Print the cart.
///
/// # Errors
///
/// Fails if output cannot be written.
pub fn show(config: &StorefrontConfig, out: &mut impl Write) -> Result<(), CommandError> {
    write_cart(config, &open(config), out)
}

/// Empty the cart.
///
/// # Errors
///
/// Fails if the cart cannot be saved.
pub fn clear(config: &StorefrontConfig, out: &mut impl Write) -> Result<(), CommandError> {
    let mut cart = open(config);
    cart.clear()?;
    write_cart(config, &cart, out)
}

/// Print the order summary with the flat shipping surcharge.
///
/// # Errors
///
/// Fails if output cannot be written.
pub fn checkout(config: &StorefrontConfig, out: &mut impl Write) -> Result<(), CommandError> {
    let cart = open(config);
    let summary = CheckoutSummary::from_store(&cart, config.shipping_flat_rate, config.currency);

    for line in &summary.lines {
        writeln!(out, "{} × {}  {}", line.name, line.quantity, line.line_price)?;
    }
    writeln!(out, "Subtotal: {}", summary.subtotal)?;
    writeln!(out, "Shipping: {}", summary.shipping)?;
    writeln!(out, "Total:    {}", summary.total)?;
    Ok(())
}

fn write_cart(
    config: &StorefrontConfig,
    cart: &CartStore<FileStorage>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let view = CartView::from_store(cart, config.currency);
    if view.items.is_empty() {
        writeln!(out, "Your cart is empty")?;
    }
    for item in &view.items {
        writeln!(
            out,
            "[{}] {} × {}  @ {}  = {}",
            item.id, item.name, item.quantity, item.price, item.line_price
        )?;
    }
    writeln!(out, "Items: {}  Subtotal: {}", view.item_count, view.subtotal)?;
    Ok(())
}
