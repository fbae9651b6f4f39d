//! The cart store.
//!
//! [`CartStore`] owns the ordered list of line items and keeps it durable:
//! it is loaded once from a [`CartStorage`] slot, and every mutation writes
//! the full list back before returning. A mutation is atomic from the
//! caller's side: if the write fails, the in-memory cart is left unchanged.
//!
//! Listeners registered with [`CartStore::subscribe`] receive a
//! [`CartEvent`] after each committed change.

mod item;

use std::collections::HashMap;
use std::fmt;

use powerhit_core::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

use crate::storage::{CartStorage, StorageError};

pub use item::LineItem;

/// Errors raised by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Writing the cart to its slot failed.
    #[error("failed to persist cart: {0}")]
    Storage(#[from] StorageError),

    /// Encoding the cart as JSON failed.
    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A committed change to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A product was added (new line or quantity bump).
    ItemAdded { id: ProductId, quantity: u32 },
    /// A line's quantity changed and it is still in the cart.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// A line left the cart.
    ItemRemoved { id: ProductId },
    /// The cart was emptied.
    Cleared,
}

type Listener = Box<dyn FnMut(&CartEvent)>;

/// The authoritative cart, backed by one storage slot.
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: String,
    items: Vec<LineItem>,
    listeners: Vec<Listener>,
}

impl<S: CartStorage> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Load the cart from the slot named `key`.
    ///
    /// An empty slot, unreadable storage, or content that is not a JSON
    /// array of line items all yield an empty cart. Parsed content is
    /// normalized: zero-quantity lines are dropped and repeated ids are
    /// merged into their first occurrence.
    #[instrument(skip(storage))]
    pub fn load(storage: S, key: &str) -> Self {
        let items = match storage.read(key) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => {
                tracing::debug!("No stored cart, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored cart, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(lines = items.len(), "Cart loaded");

        Self {
            storage,
            key: key.to_string(),
            items,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for committed changes.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add one unit of a product.
    ///
    /// Bumps the quantity of an existing line with the same id, otherwise
    /// appends a new line with quantity 1. Name, price, and image are taken
    /// as given; for an existing line they are not updated.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the cart cannot be persisted.
    #[instrument(skip_all, fields(id = %id))]
    pub fn add(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        image: impl Into<String>,
    ) -> Result<(), CartError> {
        let mut next = self.items.clone();
        let quantity = if let Some(line) = next.iter_mut().find(|line| line.id == id) {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            next.push(LineItem::new(id.clone(), name.into(), price, image.into()));
            1
        };

        self.commit(next, Some(CartEvent::ItemAdded { id, quantity }))
    }

    /// Remove the line with `id`. Removing an absent id is a no-op, though
    /// the cart is still written back.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the cart cannot be persisted.
    #[instrument(skip(self), fields(id = %id))]
    pub fn remove(&mut self, id: &ProductId) -> Result<(), CartError> {
        let mut next = self.items.clone();
        let before = next.len();
        next.retain(|line| &line.id != id);

        let event = (next.len() != before).then(|| CartEvent::ItemRemoved { id: id.clone() });
        self.commit(next, event)
    }

    /// Change the quantity of the line with `id` by `delta`.
    ///
    /// A resulting quantity of zero or less removes the line. An absent id
    /// is a no-op and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the cart cannot be persisted.
    #[instrument(skip(self), fields(id = %id))]
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) -> Result<(), CartError> {
        let Some(position) = self.items.iter().position(|line| &line.id == id) else {
            tracing::debug!("Quantity change for product not in cart ignored");
            return Ok(());
        };

        let mut next = self.items.clone();
        let current = next.get(position).map_or(0, |line| line.quantity);
        let target = i64::from(current).saturating_add(delta);

        if target <= 0 {
            next.remove(position);
            return self.commit(next, Some(CartEvent::ItemRemoved { id: id.clone() }));
        }

        let quantity = u32::try_from(target).unwrap_or(u32::MAX);
        if let Some(line) = next.get_mut(position) {
            line.quantity = quantity;
        }
        self.commit(
            next,
            Some(CartEvent::QuantityChanged {
                id: id.clone(),
                quantity,
            }),
        )
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the cart cannot be persisted.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new(), Some(CartEvent::Cleared))
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price × quantity` across all lines.
    ///
    /// Saturates instead of overflowing, since prices are stored unchecked.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn list(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a single line.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| &line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Name of the storage slot.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Write `next` to storage, then make it current and notify listeners.
    fn commit(&mut self, next: Vec<LineItem>, event: Option<CartEvent>) -> Result<(), CartError> {
        let encoded = serde_json::to_string(&next)?;
        self.storage.write(&self.key, &encoded)?;
        self.items = next;

        if let Some(event) = event {
            tracing::debug!(?event, "Cart updated");
            for listener in &mut self.listeners {
                listener(&event);
            }
        }
        Ok(())
    }
}

/// Parse and normalize stored cart content. Never fails.
///
/// Content that is not a JSON array yields an empty cart; entries that do
/// not parse as line items are skipped individually.
fn decode(raw: &str) -> Vec<LineItem> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Stored cart is corrupt, starting empty");
            return Vec::new();
        }
    };

    let parsed = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<LineItem>(entry) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable cart line");
                None
            }
        });

    let mut items: Vec<LineItem> = Vec::new();
    let mut positions: HashMap<ProductId, usize> = HashMap::new();

    for line in parsed {
        if line.quantity == 0 {
            tracing::debug!(id = %line.id, "Dropping zero-quantity line");
            continue;
        }
        if let Some(existing) = positions.get(&line.id).and_then(|&i| items.get_mut(i)) {
            tracing::debug!(id = %line.id, "Merging duplicate line");
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            continue;
        }
        positions.insert(line.id.clone(), items.len());
        items.push(line);
    }

    items
}
