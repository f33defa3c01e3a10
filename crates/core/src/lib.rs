//! Malisek Core - Shared types library.
//!
//! This crate provides common types used across all Malisek components:
//! - `storefront` - Headless storefront service (catalog, cart, checkout)
//! - `cli` - Command-line tools for catalog management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no filesystem
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
