//! Remote catalog and user directory API.
//!
//! # Architecture
//!
//! - [`CatalogSource`] and [`UserDirectory`] are the seams the rest of the
//!   client depends on; screens and the session holder never see HTTP
//! - [`DummyJsonClient`] implements both against the DummyJSON demo API
//! - One request per call: no caching, no retries
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_store_client::api::{CatalogSource, DummyJsonClient};
//!
//! let client = DummyJsonClient::new(&config.api)?;
//! let shirts = client.fetch_category(&CategoryKey::from("mens-shirts")).await?;
//! ```

mod dummyjson;

pub use dummyjson::DummyJsonClient;

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use pocket_store_core::{CategoryKey, Product, User};

/// Message shown to the user for any server communication failure.
pub const SERVER_ERROR_MESSAGE: &str = "Error communicating with the server.";

/// Errors that can occur when talking to the remote API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Message shown to the user. Transport details stay in the logs.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        SERVER_ERROR_MESSAGE
    }
}

/// Read-only source of catalog products.
pub trait CatalogSource: Send + Sync {
    /// Fetch every product in a category.
    fn fetch_category(
        &self,
        key: &CategoryKey,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;
}

/// Read-only directory of users.
///
/// The directory offers no filtered lookup; callers receive every user and
/// do their own matching.
pub trait UserDirectory: Send + Sync {
    /// Fetch every user in the directory.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ApiError>> + Send;
}

impl<T: CatalogSource> CatalogSource for Arc<T> {
    fn fetch_category(
        &self,
        key: &CategoryKey,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send {
        (**self).fetch_category(key)
    }
}

impl<T: UserDirectory> UserDirectory for Arc<T> {
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ApiError>> + Send {
        (**self).list_users()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Status {
            status: 404,
            message: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 404 - Not found");
        assert_eq!(err.user_message(), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn test_parse_error_converts() {
        let parse_err = serde_json::from_str::<Vec<Product>>("{").unwrap_err();
        let err = ApiError::from(parse_err);
        assert!(matches!(err, ApiError::Parse(_)));
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
