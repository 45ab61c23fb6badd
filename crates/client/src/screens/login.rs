//! Login screen.

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

use crate::api::UserDirectory;
use crate::session::{AuthError, SessionHolder};
use crate::storage::KeyValueStore;

use super::{Navigation, Route};

/// Fields flagged as invalid after a submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub username: bool,
    pub password: bool,
}

impl LoginErrors {
    /// Whether any field is flagged.
    #[must_use]
    pub const fn any(self) -> bool {
        self.username || self.password
    }
}

/// Username/password form backed by a [`SessionHolder`].
pub struct LoginScreen<D, K> {
    sessions: SessionHolder<D, K>,
    username: String,
    password: SecretString,
    errors: LoginErrors,
    loading: watch::Sender<bool>,
}

impl<D: UserDirectory, K: KeyValueStore> LoginScreen<D, K> {
    #[must_use]
    pub fn new(sessions: SessionHolder<D, K>) -> Self {
        let (loading, _) = watch::channel(false);
        Self {
            sessions,
            username: String::new(),
            password: SecretString::from(String::new()),
            errors: LoginErrors::default(),
            loading,
        }
    }

    /// Replace the username text. Clears the username error flag.
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
        self.errors.username = false;
    }

    /// Replace the password text. Clears the password error flag.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = SecretString::from(value.into());
        self.errors.password = false;
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub const fn errors(&self) -> LoginErrors {
        self.errors
    }

    /// Whether a sign-in request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Watch the loading flag.
    #[must_use]
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Validate the form and sign in.
    ///
    /// Blank fields are flagged and rejected before any request is made.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] whose `user_message()` is the alert text.
    pub async fn submit(&mut self) -> Result<Navigation, AuthError> {
        let errors = LoginErrors {
            username: self.username.trim().is_empty(),
            password: self.password.expose_secret().trim().is_empty(),
        };
        self.errors = errors;
        if errors.any() {
            return Err(AuthError::MissingCredentials {
                username: errors.username,
                password: errors.password,
            });
        }

        let _loading = LoadingGuard::start(&self.loading);
        self.sessions
            .authenticate(&self.username, self.password.expose_secret())
            .await
            .map(|_| Navigation::to(Route::Profile))
    }
}

/// Raises the loading flag and lowers it on drop, so a cancelled submit
/// does not leave the form stuck loading.
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> LoadingGuard<'a> {
    fn start(loading: &'a watch::Sender<bool>) -> Self {
        loading.send_replace(true);
        Self(loading)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}
