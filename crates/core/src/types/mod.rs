//! Core types for Pocket Store.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts.

pub mod category;
pub mod form;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use category::{CategoryGroup, CategoryKey};
pub use form::{FormField, ProductForm, ValidatedProduct, ValidationError};
pub use id::*;
pub use price::{Percentage, PercentageError, Price, PriceError};
pub use product::Product;
pub use user::User;
