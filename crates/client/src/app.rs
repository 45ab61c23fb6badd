//! Application root shared by every screen.

use std::sync::Arc;

use crate::api::{CatalogSource, DummyJsonClient, UserDirectory};
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::screens::{CatalogScreen, LoginScreen, ProfileScreen};
use crate::session::SessionHolder;
use crate::storage::{KeyValueStore, MemoryKeyValueStore};
use crate::store::ProductStore;

/// Session-scoped application state.
///
/// Owns the remote API client, the product store and the session holder.
/// Cheap to clone; screens opened from clones share all three.
pub struct App<A = DummyJsonClient, K = MemoryKeyValueStore> {
    inner: Arc<AppInner<A, K>>,
}

struct AppInner<A, K> {
    api: A,
    store: ProductStore,
    sessions: SessionHolder<A, K>,
}

impl<A, K> Clone for App<A, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl App {
    /// Build the application against the configured DummyJSON endpoint, with
    /// in-memory local storage.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        let api = DummyJsonClient::new(&config.api)?;
        Ok(Self::new(api, MemoryKeyValueStore::new()))
    }
}

impl<A, K> App<A, K>
where
    A: CatalogSource + UserDirectory + Clone,
    K: KeyValueStore,
{
    /// Build the application from its parts. The store starts empty and
    /// nobody is signed in.
    #[must_use]
    pub fn new(api: A, storage: K) -> Self {
        let sessions = SessionHolder::new(api.clone(), storage);
        Self {
            inner: Arc::new(AppInner {
                api,
                store: ProductStore::new(),
                sessions,
            }),
        }
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    #[must_use]
    pub fn store(&self) -> &ProductStore {
        &self.inner.store
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionHolder<A, K> {
        &self.inner.sessions
    }

    /// The first screen of a session.
    #[must_use]
    pub fn login_screen(&self) -> LoginScreen<A, K> {
        LoginScreen::new(self.inner.sessions.clone())
    }

    /// Profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotSignedIn` if nobody is signed in.
    pub fn profile_screen(&self) -> Result<ProfileScreen<A, K>, AppError> {
        ProfileScreen::new(self.inner.sessions.clone())
    }

    /// Product list over the shared store.
    #[must_use]
    pub fn catalog_screen(&self) -> CatalogScreen<A> {
        CatalogScreen::new(self.inner.api.clone(), self.inner.store.clone())
    }
}
