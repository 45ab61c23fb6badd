//! In-memory product store.
//!
//! The store is the single owner of the session's product list. Screens get
//! cloned handles to the same store; none of them keeps a private copy.
//!
//! # Snapshot discipline
//!
//! The list lives behind an `Arc<Vec<Product>>`. Every mutation builds a new
//! vector from the current snapshot and swaps it in through a
//! [`tokio::sync::watch`] channel, so a reader holding a snapshot never
//! observes a half-applied change and subscribers are woken once per
//! effective mutation.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::watch;
use tracing::debug;

use pocket_store_core::{Product, ProductId};

/// Shared, cloneable handle to the product list.
#[derive(Clone)]
pub struct ProductStore {
    inner: Arc<ProductStoreInner>,
}

struct ProductStoreInner {
    products: watch::Sender<Arc<Vec<Product>>>,
    /// Last identifier handed out by `next_id`.
    last_id: AtomicI64,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStore")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl ProductStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_products(Vec::new())
    }

    /// Create a store holding `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        let (products, _) = watch::channel(Arc::new(products));
        Self {
            inner: Arc::new(ProductStoreInner {
                products,
                last_id: AtomicI64::new(0),
            }),
        }
    }

    /// The current list, most recent first.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Product>> {
        Arc::clone(&self.inner.products.borrow())
    }

    /// Subscribe to list changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Product>>> {
        self.inner.products.subscribe()
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.inner
            .products
            .borrow()
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    /// Number of products held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.products.borrow().len()
    }

    /// Whether the store holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.products.borrow().is_empty()
    }

    /// Insert `product` at the head of the list.
    ///
    /// Identifiers are not checked; use [`next_id`](Self::next_id) for
    /// locally created records.
    pub fn add(&self, product: Product) {
        let id = product.id;
        self.inner.products.send_modify(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.push(product);
            next.extend(current.iter().cloned());
            *current = Arc::new(next);
        });
        debug!(product_id = %id, len = self.len(), "Product added");
    }

    /// Replace the first record sharing `product.id`.
    ///
    /// Returns `false`, leaving the list untouched, when no record matches.
    pub fn update(&self, product: Product) -> bool {
        let id = product.id;
        let replaced = self.inner.products.send_if_modified(|current| {
            let Some(position) = current.iter().position(|existing| existing.id == id) else {
                return false;
            };
            let mut next = current.as_ref().clone();
            if let Some(slot) = next.get_mut(position) {
                *slot = product;
            }
            *current = Arc::new(next);
            true
        });
        debug!(product_id = %id, replaced, "Product update");
        replaced
    }

    /// Remove every record with identifier `id`.
    ///
    /// Returns how many records were removed.
    pub fn remove(&self, id: ProductId) -> usize {
        let mut removed = 0;
        self.inner.products.send_if_modified(|current| {
            let next: Vec<Product> = current
                .iter()
                .filter(|product| product.id != id)
                .cloned()
                .collect();
            removed = current.len() - next.len();
            if removed == 0 {
                return false;
            }
            *current = Arc::new(next);
            true
        });
        debug!(product_id = %id, removed, "Product removal");
        removed
    }

    /// Discard the current list and install `products` verbatim.
    pub fn replace_all(&self, products: Vec<Product>) {
        let len = products.len();
        self.inner.products.send_replace(Arc::new(products));
        debug!(len, "Product list replaced");
    }

    /// Identifier for a locally created product.
    ///
    /// Derived from the current time in milliseconds, strictly increasing
    /// across calls on the same store, and never equal to an identifier the
    /// store currently holds.
    #[must_use]
    pub fn next_id(&self) -> ProductId {
        let now = Utc::now().timestamp_millis();
        let taken: HashSet<ProductId> = self.snapshot().iter().map(|p| p.id).collect();
        let pick = |previous: i64| {
            let mut candidate = now.max(previous.saturating_add(1));
            while taken.contains(&ProductId::new(candidate)) {
                candidate = candidate.saturating_add(1);
            }
            candidate
        };
        let previous = match self
            .inner
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| Some(pick(prev)))
        {
            Ok(prev) | Err(prev) => prev,
        };
        ProductId::new(pick(previous))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use pocket_store_core::Price;

    use super::*;

    fn product(id: i64, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::parse("10").unwrap(),
            thumbnail: format!("https://img.example/{id}.png"),
            discount_percentage: pocket_store_core::Percentage::ZERO,
            description: None,
            category: None,
            rating: None,
            stock: None,
        }
    }

    fn titles(store: &ProductStore) -> Vec<String> {
        store.snapshot().iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_add_then_get_returns_product_unchanged() {
        let store = ProductStore::with_products(vec![product(1, "a")]);
        let new = product(2, "b");
        store.add(new.clone());
        assert_eq!(store.get(ProductId::new(2)), Some(new));
    }

    #[test]
    fn test_add_inserts_at_head() {
        let store = ProductStore::with_products(vec![product(1, "a"), product(2, "b")]);
        store.add(product(3, "c"));
        assert_eq!(titles(&store), ["c", "a", "b"]);
    }

    #[test]
    fn test_add_does_not_check_duplicates() {
        let store = ProductStore::with_products(vec![product(1, "a")]);
        store.add(product(1, "a again"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_replaces_only_matching_record() {
        let store =
            ProductStore::with_products(vec![product(1, "a"), product(2, "b"), product(3, "c")]);
        let before = store.snapshot();

        let mut edited = product(2, "b-edited");
        edited.price = Price::parse("25.50").unwrap();
        assert!(store.update(edited.clone()));

        let after = store.snapshot();
        assert_eq!(after.len(), 3);
        assert_eq!(after[1], edited);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn test_update_replaces_first_match_only() {
        let store = ProductStore::with_products(vec![product(7, "first"), product(7, "second")]);
        assert!(store.update(product(7, "edited")));
        assert_eq!(titles(&store), ["edited", "second"]);
    }

    #[test]
    fn test_update_without_match_is_noop() {
        let store = ProductStore::with_products(vec![product(1, "a")]);
        let before = store.snapshot();
        assert!(!store.update(product(99, "ghost")));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_remove() {
        let store = ProductStore::with_products(vec![product(1, "a"), product(2, "b")]);
        assert_eq!(store.remove(ProductId::new(1)), 1);
        assert_eq!(store.get(ProductId::new(1)), None);
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove(ProductId::new(1)), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_drops_every_match() {
        let store = ProductStore::with_products(vec![product(5, "x"), product(6, "y"), product(5, "z")]);
        assert_eq!(store.remove(ProductId::new(5)), 2);
        assert_eq!(titles(&store), ["y"]);
    }

    #[test]
    fn test_replace_all_is_exact_and_idempotent() {
        let store = ProductStore::with_products(vec![product(1, "old")]);
        store.add(product(2, "local"));

        let fetched = vec![product(10, "x"), product(11, "y")];
        store.replace_all(fetched.clone());
        assert_eq!(*store.snapshot(), fetched);

        store.replace_all(fetched.clone());
        assert_eq!(*store.snapshot(), fetched);
    }

    #[test]
    fn test_old_snapshot_is_not_mutated() {
        let store = ProductStore::with_products(vec![product(1, "a")]);
        let before = store.snapshot();
        store.add(product(2, "b"));
        store.update(product(1, "a2"));
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].title, "a");
    }

    #[test]
    fn test_clones_share_state() {
        let store = ProductStore::new();
        let screen_handle = store.clone();
        screen_handle.add(product(1, "a"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_effective_mutations_only() {
        let store = ProductStore::new();
        let mut rx = store.subscribe();

        store.add(product(1, "a"));
        assert!(rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();

        store.update(product(42, "missing"));
        store.remove(ProductId::new(42));
        assert!(!rx.has_changed().unwrap());

        store.remove(ProductId::new(1));
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_empty());
    }

    #[test]
    fn test_next_id_is_monotonic_and_free() {
        let store = ProductStore::new();
        let first = store.next_id();
        let second = store.next_id();
        assert!(second > first);

        // An identifier already held by the store is skipped.
        let taken = second.as_i64() + 1;
        store.add(product(taken, "taken"));
        let third = store.next_id();
        assert!(third > second);
        assert_ne!(third.as_i64(), taken);
    }

    #[test]
    fn test_next_id_tracks_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let id = ProductStore::new().next_id();
        assert!(id.as_i64() >= before);
    }
}
