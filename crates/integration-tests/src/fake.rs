//! In-process fake of the remote API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use pocket_store_client::api::{ApiError, CatalogSource, UserDirectory};
use pocket_store_core::{CategoryKey, Product, User};

/// Fake catalog and user directory.
///
/// Cheap to clone; clones share state, so a test can keep a handle to
/// inspect call counts after handing one to the app.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<FakeApiInner>,
}

#[derive(Default)]
struct FakeApiInner {
    users: Mutex<Vec<User>>,
    categories: Mutex<HashMap<String, Vec<Product>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    failing: AtomicBool,
    user_calls: AtomicUsize,
    category_calls: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        message: "service unavailable".to_string(),
    }
}

impl FakeApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `users` from the directory.
    #[must_use]
    pub fn with_users(self, users: Vec<User>) -> Self {
        *lock(&self.inner.users) = users;
        self
    }

    /// Serve `products` for `key`. Unknown keys answer 404.
    #[must_use]
    pub fn with_category(self, key: &str, products: Vec<Product>) -> Self {
        lock(&self.inner.categories).insert(key.to_string(), products);
        self
    }

    /// Hold fetches of `key` until the returned gate is notified.
    #[must_use]
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        lock(&self.inner.gates).insert(key.to_string(), Arc::clone(&gate));
        gate
    }

    /// Make every request fail with a 503 until turned off.
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    #[must_use]
    pub fn user_calls(&self) -> usize {
        self.inner.user_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn category_calls(&self) -> usize {
        self.inner.category_calls.load(Ordering::SeqCst)
    }

    fn gate_for(&self, key: &str) -> Option<Arc<Notify>> {
        lock(&self.inner.gates).get(key).cloned()
    }
}

impl CatalogSource for FakeApi {
    async fn fetch_category(&self, key: &CategoryKey) -> Result<Vec<Product>, ApiError> {
        self.inner.category_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = self.gate_for(key.as_str()) {
            gate.notified().await;
        }
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        lock(&self.inner.categories)
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: format!("category {key} not found"),
            })
    }
}

impl UserDirectory for FakeApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.inner.user_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(lock(&self.inner.users).clone())
    }
}
