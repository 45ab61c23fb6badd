//! Pocket Store client library.
//!
//! Headless storefront client: signs a user in against the DummyJSON user
//! directory, fetches catalog categories, and keeps a session-scoped product
//! list that the screen controllers edit locally.
//!
//! Nothing is written back to the remote API. Every create, edit and delete
//! lives only in the in-memory [`store::ProductStore`] until the process
//! exits or the next catalog fetch replaces it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod screens;
pub mod session;
pub mod storage;
pub mod store;

pub use app::App;
pub use error::{AppError, ErrorKind, Result};
