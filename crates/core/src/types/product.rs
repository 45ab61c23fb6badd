//! Product records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategoryKey;
use super::form::ValidatedProduct;
use super::id::ProductId;
use super::price::{Percentage, Price};

/// A product as listed in the catalog.
///
/// Field names follow the catalog API's camelCase JSON. Fields the API sends
/// but the client never shows are ignored on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub thumbnail: String,
    #[serde(default, alias = "discount")]
    pub discount_percentage: Percentage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryKey>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl Product {
    /// Build a locally created product from a validated form.
    #[must_use]
    pub fn from_form(id: ProductId, form: ValidatedProduct) -> Self {
        Self {
            id,
            title: form.title,
            price: form.price,
            thumbnail: form.thumbnail,
            discount_percentage: form.discount,
            description: form.description,
            category: None,
            rating: None,
            stock: None,
        }
    }

    /// Returns a copy with the editable fields replaced by `form`.
    ///
    /// Server-supplied fields (category, rating, stock) are carried over.
    #[must_use]
    pub fn with_edits(&self, form: ValidatedProduct) -> Self {
        Self {
            id: self.id,
            title: form.title,
            price: form.price,
            thumbnail: form.thumbnail,
            discount_percentage: form.discount,
            description: form.description,
            category: self.category.clone(),
            rating: self.rating,
            stock: self.stock,
        }
    }

    /// Whether the product can currently be bought.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.is_some_and(|stock| stock > 0)
    }
}
