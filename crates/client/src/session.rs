//! Session holder.
//!
//! Signs a user in against the remote directory and keeps the resulting
//! identity for the rest of the session.
//!
//! The directory is a demo endpoint, not an auth service: it returns every
//! user with a plaintext password, so matching happens here. The credential
//! handed out on success is a placeholder used only for presence checks.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use pocket_store_core::User;

use crate::api::{ApiError, SERVER_ERROR_MESSAGE, UserDirectory};
use crate::error::{ErrorKind, clear_sentry_user, set_sentry_user};
use crate::storage::{KeyValueStore, StorageError, keys};

/// Errors that can occur while signing in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username and/or password left blank.
    #[error("missing credentials (username: {username}, password: {password})")]
    MissingCredentials { username: bool, password: bool },

    /// No directory entry has this username.
    #[error("user not found")]
    UserNotFound,

    /// The username exists but the password differs.
    #[error("incorrect password")]
    IncorrectPassword,

    /// Directory could not be fetched or parsed.
    #[error("directory error: {0}")]
    Api(#[from] ApiError),

    /// Session could not be written to local storage.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message shown to the user.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials { .. } => "Username and password are required.",
            Self::UserNotFound => "User not found. Check the username.",
            Self::IncorrectPassword => "Incorrect password. Try again.",
            Self::Api(_) => SERVER_ERROR_MESSAGE,
            Self::Storage(_) => "Could not save the session. Try again.",
        }
    }

    /// User-visible error class.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredentials { .. } => ErrorKind::Validation,
            Self::UserNotFound | Self::IncorrectPassword => ErrorKind::Authentication,
            Self::Api(_) => ErrorKind::ServerCommunication,
            Self::Storage(_) => ErrorKind::Internal,
        }
    }
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// The signed-in user, exactly as the directory returned it.
    pub user: User,
    /// Placeholder credential. Not an authorization token.
    pub token: SecretString,
    /// When the session started.
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    fn start(user: User) -> Self {
        Self {
            user,
            token: SecretString::from(format!("session-{}", Uuid::new_v4())),
            signed_in_at: Utc::now(),
        }
    }
}

/// Holds the signed-in identity for the session.
///
/// Cheap to clone; clones share the same session.
pub struct SessionHolder<D, K> {
    inner: Arc<SessionHolderInner<D, K>>,
}

struct SessionHolderInner<D, K> {
    directory: D,
    storage: K,
    current: watch::Sender<Option<Session>>,
}

impl<D, K> Clone for SessionHolder<D, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<D: UserDirectory, K: KeyValueStore> SessionHolder<D, K> {
    /// Create a holder with nobody signed in.
    #[must_use]
    pub fn new(directory: D, storage: K) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionHolderInner {
                directory,
                storage,
                current,
            }),
        }
    }

    /// Verify a username/password pair against the directory and start a
    /// session.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingCredentials` if either field is blank (no request is made)
    /// - `AuthError::UserNotFound` if no user has exactly this username
    /// - `AuthError::IncorrectPassword` if the password differs
    /// - `AuthError::Api` if the directory cannot be fetched or parsed
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let missing_username = username.trim().is_empty();
        let missing_password = password.trim().is_empty();
        if missing_username || missing_password {
            return Err(AuthError::MissingCredentials {
                username: missing_username,
                password: missing_password,
            });
        }

        let users = self.inner.directory.list_users().await.inspect_err(|e| {
            warn!(error = %e, "Failed to fetch user directory");
        })?;

        let user = users
            .into_iter()
            .find(|user| user.username == username)
            .ok_or(AuthError::UserNotFound)?;

        if !user.password_matches(password) {
            return Err(AuthError::IncorrectPassword);
        }

        let session = Session::start(user);
        let user_info = serde_json::to_string(&session.user).map_err(StorageError::from)?;
        let storage = &self.inner.storage;
        storage.set(keys::USER_INFO, user_info);
        storage.set(keys::USER_TOKEN, session.token.expose_secret().to_owned());

        set_sentry_user(
            &session.user.id,
            &session.user.username,
            Some(&session.user.email),
        );
        self.inner.current.send_replace(Some(session.clone()));

        info!(user_id = %session.user.id, "Signed in");
        Ok(session)
    }

    /// End the session and wipe local storage.
    pub fn logout(&self) {
        self.inner.storage.clear();
        let previous = self.inner.current.send_replace(None);
        clear_sentry_user();
        if let Some(session) = previous {
            info!(user_id = %session.user.id, "Signed out");
        }
    }

    /// The current session, if signed in.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// Subscribe to sign-in and sign-out.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.inner.current.subscribe()
    }

    /// The local storage backing this session.
    #[must_use]
    pub fn storage(&self) -> &K {
        &self.inner.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::storage::MemoryKeyValueStore;

    /// Directory serving a fixed list, or failing every call.
    struct FakeDirectory {
        users: Option<Vec<User>>,
        calls: AtomicUsize,
    }

    impl FakeDirectory {
        fn with_users(json: &str) -> Self {
            Self {
                users: Some(serde_json::from_str(json).unwrap()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                users: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl UserDirectory for FakeDirectory {
        async fn list_users(&self) -> Result<Vec<User>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.users.clone().ok_or_else(|| ApiError::Status {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    const DIRECTORY: &str = r#"[
        {"id": 7, "username": "alice", "password": "secret", "firstName": "Alice",
         "lastName": "Liddell", "email": "alice@example.com", "image": "https://img/alice.png"},
        {"id": 8, "username": "carol", "password": "pw", "firstName": "Carol",
         "lastName": "Danvers", "email": "carol@example.com", "image": "https://img/carol.png"}
    ]"#;

    fn holder(directory: FakeDirectory) -> SessionHolder<FakeDirectory, MemoryKeyValueStore> {
        SessionHolder::new(directory, MemoryKeyValueStore::new())
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let sessions = holder(FakeDirectory::with_users(DIRECTORY));
        let err = sessions.authenticate("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::IncorrectPassword));
        assert!(!sessions.is_signed_in());
        assert!(sessions.storage().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let sessions = holder(FakeDirectory::with_users(DIRECTORY));
        let err = sessions.authenticate("bob", "x").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(err.user_message(), "User not found. Check the username.");
    }

    #[tokio::test]
    async fn test_username_match_is_exact() {
        let sessions = holder(FakeDirectory::with_users(DIRECTORY));
        let err = sessions.authenticate("Alice", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_success_holds_full_record() {
        let sessions = holder(FakeDirectory::with_users(DIRECTORY));
        let session = sessions.authenticate("alice", "secret").await.unwrap();

        assert_eq!(session.user.username, "alice");
        assert_eq!(session.user.full_name(), "Alice Liddell");
        assert_eq!(session.user.email, "alice@example.com");
        assert_eq!(session.user.image, "https://img/alice.png");
        assert!(session.token.expose_secret().starts_with("session-"));

        let current = sessions.current().unwrap();
        assert_eq!(current.user.id, session.user.id);

        let storage = sessions.storage();
        assert_eq!(
            storage.get(keys::USER_TOKEN).as_deref(),
            Some(session.token.expose_secret())
        );
        let stored_user = storage.get(keys::USER_INFO).unwrap();
        assert!(stored_user.contains("\"username\":\"alice\""));
        assert!(!stored_user.contains("secret"));
    }

    #[tokio::test]
    async fn test_blank_fields_skip_network() {
        let sessions = holder(FakeDirectory::with_users(DIRECTORY));
        let err = sessions.authenticate("  ", "").await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::MissingCredentials {
                username: true,
                password: true
            }
        ));
        assert_eq!(sessions.inner.directory.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_distinct() {
        let sessions = holder(FakeDirectory::failing());
        let err = sessions.authenticate("alice", "secret").await.unwrap_err();
        assert!(matches!(err, AuthError::Api(_)));
        assert_eq!(err.user_message(), SERVER_ERROR_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::ServerCommunication);
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let sessions = holder(FakeDirectory::with_users(DIRECTORY));
        let mut rx = sessions.subscribe();
        sessions.authenticate("carol", "pw").await.unwrap();
        assert!(rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();

        sessions.logout();
        assert!(!sessions.is_signed_in());
        assert!(sessions.storage().is_empty());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn test_storage_holds_both_keys_or_neither() {
        let sessions = holder(FakeDirectory::with_users(DIRECTORY));
        let _ = sessions.authenticate("alice", "wrong").await;
        assert_eq!(sessions.storage().len(), 0);

        sessions.authenticate("alice", "secret").await.unwrap();
        assert_eq!(sessions.storage().len(), 2);
        let stored: serde_json::Value =
            serde_json::from_str(&sessions.storage().get(keys::USER_INFO).unwrap()).unwrap();
        assert_eq!(stored["username"], "alice");
        assert_eq!(stored["id"], 7);
    }

    #[tokio::test]
    async fn test_every_attempt_refetches_directory() {
        let sessions = holder(FakeDirectory::with_users(DIRECTORY));
        let _ = sessions.authenticate("alice", "wrong").await;
        let _ = sessions.authenticate("alice", "secret").await;
        assert_eq!(sessions.inner.directory.calls.load(Ordering::SeqCst), 2);
    }
}
