//! PowerHit Core - Shared types library.
//!
//! This crate provides common types used across all PowerHit components:
//! - `storefront` - Cart store, catalog, and page state
//! - `cli` - Headless driver for the cart and catalog
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, money, and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
