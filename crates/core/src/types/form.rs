//! Product form input and validation.
//!
//! Forms hold exactly what the user typed. Nothing reaches a [`Product`]
//! until [`ProductForm::validate`] has turned the text into typed values.
//!
//! [`Product`]: super::product::Product

use core::fmt;

use super::price::{Percentage, PercentageError, Price, PriceError};
use super::product::Product;

/// Required fields of a product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Price,
    Thumbnail,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Price => f.write_str("price"),
            Self::Thumbnail => f.write_str("thumbnail"),
        }
    }
}

/// Errors produced when validating a product form.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are blank.
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<FormField>),

    /// The price is not a usable amount.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// The discount is not a usable percentage.
    #[error("invalid discount: {0}")]
    InvalidDiscount(#[from] PercentageError),
}

impl ValidationError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingFields(_) => "Fill in all required fields!".to_string(),
            Self::InvalidPrice(_) => "Enter a valid price.".to_string(),
            Self::InvalidDiscount(_) => "Enter a discount between 0 and 100.".to_string(),
        }
    }
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw text of a product form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub thumbnail: String,
    pub discount: String,
}

/// A product form whose values have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProduct {
    pub title: String,
    pub description: Option<String>,
    pub price: Price,
    pub thumbnail: String,
    pub discount: Percentage,
}

impl ProductForm {
    /// Prefill a form with an existing product, for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.amount().normalize().to_string(),
            thumbnail: product.thumbnail.clone(),
            discount: product.discount_percentage.to_string(),
        }
    }

    /// Required fields left blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<FormField> {
        [
            (FormField::Title, &self.title),
            (FormField::Price, &self.price),
            (FormField::Thumbnail, &self.thumbnail),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Check the form and convert it into typed values.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` when a required field is
    /// blank, otherwise the first price or discount parse failure.
    pub fn validate(&self) -> Result<ValidatedProduct, ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let price = Price::parse(&self.price)?;
        let discount = Percentage::parse_optional(&self.discount)?;
        let description = Some(self.description.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_owned);

        Ok(ValidatedProduct {
            title: self.title.trim().to_owned(),
            description,
            price,
            thumbnail: self.thumbnail.trim().to_owned(),
            discount,
        })
    }
}
