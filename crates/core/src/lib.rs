//! Shopping App Core - Catalog types and cart store.
//!
//! This crate provides the domain shared by all Shopping App components:
//! - `storefront` - The single-screen storefront (catalog list, overlay, cart)
//! - `cli` - Command-line tools for browsing the catalog and replaying carts
//!
//! # Architecture
//!
//! The core crate contains only types, the cart reducer and its observable
//! store - no HTTP clients, no rendering. The store's subscription channel is
//! `tokio::sync::watch`, which needs no runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices, plus [`Product`]
//! - [`cart`] - Cart lines, the pure reducer, and the [`CartStore`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{CartAction, CartCommand, CartLine, CartState, CartStore, CommandParseError};
pub use types::*;
