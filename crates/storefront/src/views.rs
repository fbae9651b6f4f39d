//! Display models and templates for the cart, checkout, and product grid.
//!
//! Views are plain structs with preformatted strings so templates stay free
//! of arithmetic. They are rebuilt from the cart store after every change.

use askama::Template;
use powerhit_core::{CurrencyCode, Money};
use rust_decimal::Decimal;

use crate::cart::{CartStore, LineItem};
use crate::catalog::{Product, ProductListing};
use crate::notification::{Notification, Phase};
use crate::storage::CartStorage;

/// Cart item display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self {
            items: Vec::new(),
            subtotal: Money::zero(currency).display(),
            item_count: 0,
        }
    }

    /// Build the view from the live cart.
    #[must_use]
    pub fn from_store<S: CartStorage>(store: &CartStore<S>, currency: CurrencyCode) -> Self {
        Self {
            items: store
                .list()
                .iter()
                .map(|line| CartItemView::from_line(line, currency))
                .collect(),
            subtotal: Money::new(store.subtotal(), currency).display(),
            item_count: store.total_item_count(),
        }
    }
}

impl CartItemView {
    fn from_line(line: &LineItem, currency: CurrencyCode) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: line.unit_price(currency).display(),
            line_price: Money::new(line.line_total(), currency).display(),
        }
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// One row of the order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLineView {
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Order summary: lines, subtotal, flat shipping, and grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub lines: Vec<CheckoutLineView>,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CheckoutSummary {
    /// Summarize the cart, adding a flat `shipping` surcharge.
    ///
    /// The surcharge applies even to an empty cart.
    #[must_use]
    pub fn from_store<S: CartStorage>(
        store: &CartStore<S>,
        shipping: Decimal,
        currency: CurrencyCode,
    ) -> Self {
        let subtotal = store.subtotal();
        Self {
            lines: store
                .list()
                .iter()
                .map(|line| CheckoutLineView {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    line_price: Money::new(line.line_total(), currency).display(),
                })
                .collect(),
            subtotal: Money::new(subtotal, currency),
            shipping: Money::new(shipping, currency),
            total: Money::new(subtotal.saturating_add(shipping), currency),
        }
    }
}

// =============================================================================
// Product grid
// =============================================================================

/// Product card display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: String,
}

impl ProductCardView {
    fn from_product(product: &Product, currency: CurrencyCode) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: Money::new(product.price, currency).display(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart sidebar items fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Full cart page. The page total includes the flat shipping surcharge
/// unless the cart is empty.
#[derive(Template)]
#[template(path = "cart/show.html")]
pub struct CartPageTemplate {
    pub cart: CartView,
    pub total: String,
}

impl CartPageTemplate {
    #[must_use]
    pub fn from_store<S: CartStorage>(
        store: &CartStore<S>,
        shipping: Decimal,
        currency: CurrencyCode,
    ) -> Self {
        if store.is_empty() {
            return Self {
                cart: CartView::empty(currency),
                total: Money::zero(currency).display(),
            };
        }
        Self {
            cart: CartView::from_store(store, currency),
            total: Money::new(store.subtotal().saturating_add(shipping), currency).display(),
        }
    }
}

/// Checkout order summary.
#[derive(Template)]
#[template(path = "checkout/summary.html")]
pub struct CheckoutTemplate {
    pub summary: CheckoutSummary,
}

/// Transient notification toast.
#[derive(Template)]
#[template(path = "partials/notification.html")]
pub struct NotificationTemplate {
    pub message: String,
    pub fading: bool,
}

impl NotificationTemplate {
    #[must_use]
    pub fn new(notification: &Notification, phase: Phase) -> Self {
        Self {
            message: notification.message.clone(),
            fading: phase == Phase::FadingOut,
        }
    }
}

/// Filter buttons and the visible product cards.
#[derive(Template)]
#[template(path = "products/grid.html")]
pub struct ProductGridTemplate {
    pub categories: Vec<String>,
    pub active: String,
    pub products: Vec<ProductCardView>,
}

impl ProductGridTemplate {
    #[must_use]
    pub fn from_listing(listing: &ProductListing, currency: CurrencyCode) -> Self {
        Self {
            categories: listing
                .categories()
                .into_iter()
                .map(str::to_string)
                .collect(),
            active: listing.active_filter().as_str().to_string(),
            products: listing
                .visible_products()
                .map(|product| ProductCardView::from_product(product, currency))
                .collect(),
        }
    }
}
