//! PowerHit Storefront library.
//!
//! Interactive state for the storefront pages, independent of any browser:
//!
//! - [`cart`] - The cart store, persisted to a durable key-value slot
//! - [`storage`] - Slot backends (in-memory and file-based)
//! - [`catalog`] - Product listing with category filter and search
//! - [`views`] - Display models and askama templates
//! - [`page`] - Top-level page context and action dispatch
//! - [`forms`], [`notification`], [`ui`] - Form validation, toasts, and
//!   navigation/scroll state
//!
//! # Example
//!
//! ```rust
//! use powerhit_core::ProductId;
//! use powerhit_storefront::cart::CartStore;
//! use powerhit_storefront::storage::{DEFAULT_CART_KEY, MemoryStorage};
//! use rust_decimal::Decimal;
//!
//! let mut cart = CartStore::load(MemoryStorage::new(), DEFAULT_CART_KEY);
//! cart.add(ProductId::from(1), "Bat", Decimal::new(150, 0), "bat.png")?;
//! cart.add(ProductId::from(1), "Bat", Decimal::new(150, 0), "bat.png")?;
//! assert_eq!(cart.total_item_count(), 2);
//! assert_eq!(cart.subtotal(), Decimal::new(300, 0));
//! # Ok::<(), powerhit_storefront::cart::CartError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod forms;
pub mod notification;
pub mod page;
pub mod storage;
pub mod ui;
pub mod views;

pub use error::{Result, StorefrontError};
