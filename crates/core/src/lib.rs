//! Pocket Store Core - Shared types library.
//!
//! This crate provides the types used across all Pocket Store components:
//! - `client` - Headless storefront client (store, session, screens)
//! - `cli` - Command-line front end for the client
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients, no async. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, categories, product and user records, form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
