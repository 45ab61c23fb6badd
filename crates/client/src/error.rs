//! Unified error handling with Sentry integration.
//!
//! Every fallible client operation surfaces one of three user-visible classes:
//! validation failures, authentication failures, and server communication
//! failures. [`AppError`] wraps them all for front ends that want a single
//! type, keeps them distinguishable through [`AppError::kind`], and reports
//! the server-side class to Sentry.

use thiserror::Error;

use pocket_store_core::{ProductId, ValidationError};

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Remote API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Sign-in failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// A form was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Product is not in the store.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Screen action requires a signed-in user.
    #[error("Not signed in")]
    NotSignedIn,
}

/// User-visible error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed form input.
    Validation,
    /// Unknown user or wrong password.
    Authentication,
    /// Network, HTTP status or response parsing failure.
    ServerCommunication,
    /// Anything the user cannot fix by retrying the same input.
    Internal,
}

impl AppError {
    /// Classify the error for display.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Auth(err) => err.kind(),
            Self::Api(_) => ErrorKind::ServerCommunication,
            Self::ProductNotFound(_) | Self::NotSignedIn => ErrorKind::Validation,
            Self::Config(_) | Self::Storage(_) => ErrorKind::Internal,
        }
    }

    /// Message shown to the user. Internal details are never exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::Auth(err) => err.user_message().to_string(),
            Self::Api(err) => err.user_message().to_string(),
            Self::ProductNotFound(_) => "This product is no longer available.".to_string(),
            Self::NotSignedIn => "Sign in to continue.".to_string(),
            Self::Config(_) | Self::Storage(_) => "Something went wrong. Try again.".to_string(),
        }
    }

    /// Log the error and capture server-side failures to Sentry.
    pub fn report(&self) {
        if matches!(
            self.kind(),
            ErrorKind::ServerCommunication | ErrorKind::Internal
        ) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Client error"
            );
        } else {
            tracing::info!(error = %self, "Rejected user action");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, username: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(username.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("navigation", "Opened product", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
