//! The page context: owns the cart and UI state and dispatches user actions.
//!
//! Every UI affordance maps to one [`Action`]. Cart actions call a single
//! [`CartStore`] operation; the store publishes a [`CartEvent`] that the page
//! collects through its subscription and turns into the set of fragments to
//! re-render.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use askama::Template;
use chrono::{DateTime, Utc};
use powerhit_core::ProductId;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::cart::{CartEvent, CartStore};
use crate::catalog::{CategoryFilter, ProductListing};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::forms::{FormOutcome, FormState};
use crate::notification::{ADDED_TO_CART, FORM_SUBMITTED, NotificationCenter};
use crate::storage::CartStorage;
use crate::ui::{CartSidebar, NavMenu, Navbar, RevealTracker};
use crate::views::{
    CartCountTemplate, CartItemsTemplate, CartPageTemplate, CartView, CheckoutSummary,
    CheckoutTemplate, NotificationTemplate, ProductGridTemplate,
};

/// A user interaction on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddToCart {
        id: ProductId,
        name: String,
        price: Decimal,
        image: String,
    },
    RemoveFromCart {
        id: ProductId,
    },
    ChangeQuantity {
        id: ProductId,
        delta: i64,
    },
    ClearCart,
    OpenCart,
    CloseCart,
    ToggleMenu,
    NavLinkClicked,
    Scroll {
        y: f64,
        viewport_height: f64,
    },
    FilterCategory(String),
    Search(String),
    FormInput {
        form: String,
        field: String,
        value: String,
    },
    SubmitForm {
        form: String,
    },
}

/// A separately rendered region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fragment {
    CartCount,
    CartItems,
    CartPage,
    Checkout,
    ProductGrid,
    Notification,
}

impl Fragment {
    /// Every region that shows cart data.
    pub const CART: [Self; 4] = [
        Self::CartCount,
        Self::CartItems,
        Self::CartPage,
        Self::Checkout,
    ];
}

/// What a dispatched action changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    /// Regions whose content must be re-rendered.
    pub rerender: BTreeSet<Fragment>,
    /// Outcome of a form submit, if the action was one.
    pub form: Option<FormOutcome>,
    /// Elements revealed by a scroll.
    pub revealed: Vec<String>,
}

/// Top-level page state.
pub struct Page<S: CartStorage> {
    config: StorefrontConfig,
    cart: CartStore<S>,
    pending: Rc<RefCell<Vec<CartEvent>>>,
    listing: ProductListing,
    forms: HashMap<String, FormState>,
    sidebar: CartSidebar,
    menu: NavMenu,
    navbar: Navbar,
    reveal: RevealTracker,
    notifications: NotificationCenter,
}

impl<S: CartStorage> std::fmt::Debug for Page<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("cart", &self.cart)
            .field("sidebar", &self.sidebar)
            .field("menu", &self.menu)
            .field("navbar", &self.navbar)
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> Page<S> {
    /// Load the cart from `storage` and set up the page around `listing`.
    ///
    /// The contact and newsletter forms are registered by default.
    #[instrument(skip_all, fields(key = %config.storage_key))]
    pub fn new(config: StorefrontConfig, storage: S, listing: ProductListing) -> Self {
        let mut cart = CartStore::load(storage, &config.storage_key);

        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        cart.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        let forms = [FormState::contact(), FormState::newsletter()]
            .into_iter()
            .map(|form| (form.name().to_string(), form))
            .collect();

        Self {
            config,
            cart,
            pending,
            listing,
            forms,
            sidebar: CartSidebar::default(),
            menu: NavMenu::default(),
            navbar: Navbar::default(),
            reveal: RevealTracker::new(),
            notifications: NotificationCenter::new(),
        }
    }

    /// Handle one user action at time `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Cart`] if a cart change cannot be
    /// persisted (the cart is left unchanged), or
    /// [`StorefrontError::NotFound`] for an unknown form.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, action: Action, now: DateTime<Utc>) -> Result<Update> {
        let mut update = Update::default();
        self.notifications.prune(now);

        match action {
            Action::AddToCart {
                id,
                name,
                price,
                image,
            } => self.cart.add(id, name, price, image)?,
            Action::RemoveFromCart { id } => self.cart.remove(&id)?,
            Action::ChangeQuantity { id, delta } => self.cart.update_quantity(&id, delta)?,
            Action::ClearCart => self.cart.clear()?,
            Action::OpenCart => self.sidebar.open(),
            Action::CloseCart => self.sidebar.close(),
            Action::ToggleMenu => self.menu.toggle(),
            Action::NavLinkClicked => self.menu.link_clicked(),
            Action::Scroll { y, viewport_height } => {
                self.navbar.on_scroll(y);
                update.revealed = self.reveal.update(y, viewport_height);
            }
            Action::FilterCategory(category) => {
                self.listing.filter(CategoryFilter::parse(&category));
                update.rerender.insert(Fragment::ProductGrid);
            }
            Action::Search(query) => {
                self.listing.search(&query);
                update.rerender.insert(Fragment::ProductGrid);
            }
            Action::FormInput { form, field, value } => {
                self.form_mut(&form)?.set(&field, value);
            }
            Action::SubmitForm { form } => {
                let outcome = self.form_mut(&form)?.submit();
                if outcome.is_valid() {
                    self.notifications.show(FORM_SUBMITTED, now);
                    update.rerender.insert(Fragment::Notification);
                }
                update.form = Some(outcome);
            }
        }

        self.apply_cart_events(&mut update, now);
        Ok(update)
    }

    /// Turn events published by the cart into re-render work.
    fn apply_cart_events(&mut self, update: &mut Update, now: DateTime<Utc>) {
        let events: Vec<CartEvent> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            update.rerender.extend(Fragment::CART);
            if matches!(event, CartEvent::ItemAdded { .. }) {
                self.notifications.show(ADDED_TO_CART, now);
                self.sidebar.open();
                update.rerender.insert(Fragment::Notification);
            }
        }
    }

    fn form_mut(&mut self, name: &str) -> Result<&mut FormState> {
        self.forms
            .get_mut(name)
            .ok_or_else(|| StorefrontError::NotFound(format!("form {name}")))
    }

    /// Render one region as HTML.
    ///
    /// The notification region renders empty when nothing is on screen.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::Render`] if the template fails.
    pub fn render(&self, fragment: Fragment, now: DateTime<Utc>) -> Result<String> {
        let currency = self.config.currency;
        let shipping = self.config.shipping_flat_rate;

        let html = match fragment {
            Fragment::CartCount => CartCountTemplate {
                count: self.cart.total_item_count(),
            }
            .render()?,
            Fragment::CartItems => CartItemsTemplate {
                cart: CartView::from_store(&self.cart, currency),
            }
            .render()?,
            Fragment::CartPage => {
                CartPageTemplate::from_store(&self.cart, shipping, currency).render()?
            }
            Fragment::Checkout => CheckoutTemplate {
                summary: CheckoutSummary::from_store(&self.cart, shipping, currency),
            }
            .render()?,
            Fragment::ProductGrid => {
                ProductGridTemplate::from_listing(&self.listing, currency).render()?
            }
            Fragment::Notification => match self.notifications.current(now) {
                Some((notification, phase)) => {
                    NotificationTemplate::new(notification, phase).render()?
                }
                None => String::new(),
            },
        };
        Ok(html)
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    #[must_use]
    pub const fn listing(&self) -> &ProductListing {
        &self.listing
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub fn form(&self, name: &str) -> Option<&FormState> {
        self.forms.get(name)
    }

    #[must_use]
    pub const fn sidebar(&self) -> &CartSidebar {
        &self.sidebar
    }

    #[must_use]
    pub const fn menu(&self) -> &NavMenu {
        &self.menu
    }

    #[must_use]
    pub const fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    #[must_use]
    pub const fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Register a reveal-on-scroll element.
    pub fn observe(&mut self, id: impl Into<String>, top: f64, height: f64) {
        self.reveal.observe(id, top, height);
    }
}
