//! Catalog screen.
//!
//! Two tabs of category keys over a list of products fetched from the
//! remote catalog. A successful fetch replaces the contents of the shared
//! [`ProductStore`]; local edits made since the previous fetch are lost.
//!
//! Fetches are never cancelled. Each one takes a generation number when it
//! starts, and only the most recent generation may publish its result. A
//! fetch that was overtaken by a newer one, or that completes after
//! [`CatalogScreen::unmount`], is discarded.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use pocket_store_core::{CategoryGroup, CategoryKey, ProductId};

use crate::api::{ApiError, CatalogSource};
use crate::error::AppError;
use crate::store::ProductStore;

use super::{CreationScreen, DetailScreen, Route, record_navigation};

/// Loading state of the product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch completed, successfully or not.
    Loaded,
}

/// What happened to a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The store now holds this many fetched products.
    Loaded(usize),
    /// A newer request or an unmount made this result stale.
    Superseded,
}

/// One line of the product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub id: ProductId,
    pub title: String,
    pub thumbnail: String,
    /// e.g. `R$ 9.99 - 10% OFF`
    pub price_line: String,
}

/// Product list with category tabs.
pub struct CatalogScreen<C> {
    source: C,
    store: ProductStore,
    tab: watch::Sender<CategoryGroup>,
    state: watch::Sender<CatalogState>,
    generation: AtomicU64,
}

impl<C: CatalogSource> CatalogScreen<C> {
    /// Create the screen on the default tab. Nothing is fetched until
    /// [`mount`](Self::mount).
    #[must_use]
    pub fn new(source: C, store: ProductStore) -> Self {
        let (tab, _) = watch::channel(CategoryGroup::default());
        let (state, _) = watch::channel(CatalogState::Idle);
        Self {
            source,
            store,
            tab,
            state,
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn active_tab(&self) -> CategoryGroup {
        *self.tab.borrow()
    }

    /// Category keys offered under the active tab.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryKey> {
        self.active_tab().categories()
    }

    #[must_use]
    pub fn state(&self) -> CatalogState {
        *self.state.borrow()
    }

    /// Watch loading state transitions.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// The shared store this screen lists.
    #[must_use]
    pub const fn store(&self) -> &ProductStore {
        &self.store
    }

    /// Load the active tab's default category.
    ///
    /// # Errors
    ///
    /// Returns the `ApiError` of a failed, non-superseded fetch. The store is
    /// left unchanged.
    pub async fn mount(&self) -> Result<LoadOutcome, ApiError> {
        self.load(self.active_tab().default_category()).await
    }

    /// Switch tabs and load the new tab's default category.
    ///
    /// # Errors
    ///
    /// See [`mount`](Self::mount).
    pub async fn select_tab(&self, group: CategoryGroup) -> Result<LoadOutcome, ApiError> {
        self.tab.send_replace(group);
        self.load(group.default_category()).await
    }

    /// Load a specific category. Switches tabs when the key belongs to the
    /// other group.
    ///
    /// # Errors
    ///
    /// See [`mount`](Self::mount).
    pub async fn select_category(&self, key: CategoryKey) -> Result<LoadOutcome, ApiError> {
        if let Some(group) = CategoryGroup::of(&key) {
            self.tab.send_if_modified(|current| {
                let changed = *current != group;
                *current = group;
                changed
            });
        }
        self.load(key).await
    }

    /// Stop accepting results from fetches already in flight.
    pub fn unmount(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        debug!("Catalog unmounted");
    }

    async fn load(&self, key: CategoryKey) -> Result<LoadOutcome, ApiError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(CatalogState::Loading);

        let result = self.source.fetch_category(&key).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(category = %key, generation, "Discarding superseded fetch");
            return Ok(LoadOutcome::Superseded);
        }
        self.state.send_replace(CatalogState::Loaded);

        match result {
            Ok(products) => {
                let count = products.len();
                self.store.replace_all(products);
                info!(category = %key, count, "Catalog loaded");
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                warn!(category = %key, error = %e, "Failed to fetch products");
                Err(e)
            }
        }
    }

    /// List rows for the store's current contents.
    #[must_use]
    pub fn rows(&self) -> Vec<CatalogRow> {
        self.store
            .snapshot()
            .iter()
            .map(|product| CatalogRow {
                id: product.id,
                title: product.title.clone(),
                thumbnail: product.thumbnail.clone(),
                price_line: format!(
                    "R$ {} - {}% OFF",
                    product.price, product.discount_percentage
                ),
            })
            .collect()
    }

    /// Open the detail screen for a listed product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound` if the store does not hold `id`.
    pub fn open_product(&self, id: ProductId) -> Result<DetailScreen, AppError> {
        let detail = DetailScreen::new(self.store.clone(), id)?;
        record_navigation(Route::ProductDetails(id));
        Ok(detail)
    }

    /// Open the product creation form.
    #[must_use]
    pub fn open_creation(&self) -> CreationScreen {
        record_navigation(Route::AddProduct);
        CreationScreen::new(self.store.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use pocket_store_core::{Percentage, Price, Product};
    use rust_decimal::Decimal;
    use tokio::sync::Notify;

    use super::*;

    fn product(id: i64, title: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::parse(price).unwrap(),
            thumbnail: format!("https://img.example/{id}.png"),
            discount_percentage: Percentage::ZERO,
            description: None,
            category: None,
            rating: None,
            stock: None,
        }
    }

    /// Catalog serving canned lists. Keys with a gate wait for it to open.
    #[derive(Default)]
    struct FakeCatalog {
        lists: HashMap<String, Vec<Product>>,
        gates: HashMap<String, Arc<Notify>>,
    }

    impl FakeCatalog {
        fn with(mut self, key: &str, products: Vec<Product>) -> Self {
            self.lists.insert(key.to_string(), products);
            self
        }

        fn gated(mut self, key: &str, gate: &Arc<Notify>) -> Self {
            self.gates.insert(key.to_string(), Arc::clone(gate));
            self
        }
    }

    impl CatalogSource for FakeCatalog {
        async fn fetch_category(&self, key: &CategoryKey) -> Result<Vec<Product>, ApiError> {
            if let Some(gate) = self.gates.get(key.as_str()) {
                gate.notified().await;
            }
            self.lists
                .get(key.as_str())
                .cloned()
                .ok_or_else(|| ApiError::Status {
                    status: 404,
                    message: "not found".to_string(),
                })
        }
    }

    #[tokio::test]
    async fn test_mount_loads_default_category() {
        let catalog = FakeCatalog::default().with(
            "mens-shirts",
            vec![product(1, "Shirt", "10"), product(2, "Polo", "20")],
        );
        let screen = CatalogScreen::new(catalog, ProductStore::new());
        assert_eq!(screen.state(), CatalogState::Idle);

        let outcome = screen.mount().await.unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded(2));
        assert_eq!(screen.state(), CatalogState::Loaded);
        assert_eq!(screen.store().len(), 2);
    }

    #[tokio::test]
    async fn test_select_tab_loads_its_default() {
        let catalog = FakeCatalog::default()
            .with("mens-shirts", vec![product(1, "Shirt", "10")])
            .with("womens-bags", vec![product(5, "Bag", "50")]);
        let screen = CatalogScreen::new(catalog, ProductStore::new());
        screen.mount().await.unwrap();

        screen.select_tab(CategoryGroup::Womens).await.unwrap();
        assert_eq!(screen.active_tab(), CategoryGroup::Womens);
        assert_eq!(screen.rows()[0].title, "Bag");
        assert!(screen.categories().contains(&CategoryKey::from("womens-jewellery")));
    }

    #[tokio::test]
    async fn test_select_category_follows_group() {
        let catalog = FakeCatalog::default().with("womens-watches", vec![]);
        let screen = CatalogScreen::new(catalog, ProductStore::new());
        screen
            .select_category(CategoryKey::from("womens-watches"))
            .await
            .unwrap();
        assert_eq!(screen.active_tab(), CategoryGroup::Womens);
    }

    #[tokio::test]
    async fn test_fetch_replaces_local_edits() {
        let catalog = FakeCatalog::default().with("mens-shirts", vec![product(1, "Shirt", "10")]);
        let store = ProductStore::new();
        store.add(product(99, "Local", "1"));
        let screen = CatalogScreen::new(catalog, store.clone());

        screen.mount().await.unwrap();
        assert_eq!(store.get(ProductId::new(99)), None);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_store_and_finishes_loading() {
        let store = ProductStore::with_products(vec![product(1, "Kept", "3")]);
        let screen = CatalogScreen::new(FakeCatalog::default(), store.clone());

        let err = screen.mount().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        assert_eq!(screen.state(), CatalogState::Loaded);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_loading_then_loaded() {
        let gate = Arc::new(Notify::new());
        let catalog = FakeCatalog::default()
            .with("mens-shirts", vec![])
            .gated("mens-shirts", &gate);
        let screen = CatalogScreen::new(catalog, ProductStore::new());
        let mut states = screen.subscribe_state();

        let (outcome, ()) = tokio::join!(screen.mount(), async {
            states.changed().await.unwrap();
            assert_eq!(*states.borrow_and_update(), CatalogState::Loading);
            gate.notify_one();
        });
        assert_eq!(outcome.unwrap(), LoadOutcome::Loaded(0));
        assert_eq!(screen.state(), CatalogState::Loaded);
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_discarded() {
        let gate = Arc::new(Notify::new());
        let catalog = FakeCatalog::default()
            .with("mens-shirts", vec![product(1, "Old", "10")])
            .gated("mens-shirts", &gate)
            .with("mens-shoes", vec![product(2, "New", "20")]);
        let screen = CatalogScreen::new(catalog, ProductStore::new());

        let (slow, fast) = tokio::join!(screen.mount(), async {
            tokio::task::yield_now().await;
            let outcome = screen
                .select_category(CategoryKey::from("mens-shoes"))
                .await;
            gate.notify_one();
            outcome
        });

        assert_eq!(fast.unwrap(), LoadOutcome::Loaded(1));
        assert_eq!(slow.unwrap(), LoadOutcome::Superseded);
        assert_eq!(screen.rows()[0].title, "New");
        assert_eq!(screen.state(), CatalogState::Loaded);
    }

    #[tokio::test]
    async fn test_result_after_unmount_is_discarded() {
        let gate = Arc::new(Notify::new());
        let catalog = FakeCatalog::default()
            .with("mens-shirts", vec![product(1, "Late", "10")])
            .gated("mens-shirts", &gate);
        let store = ProductStore::new();
        let screen = CatalogScreen::new(catalog, store.clone());

        let (outcome, ()) = tokio::join!(screen.mount(), async {
            tokio::task::yield_now().await;
            screen.unmount();
            gate.notify_one();
        });

        assert_eq!(outcome.unwrap(), LoadOutcome::Superseded);
        assert!(store.is_empty());
        assert_eq!(screen.state(), CatalogState::Loading);
    }

    #[test]
    fn test_row_format() {
        let mut discounted = product(1, "Watch", "9.99");
        discounted.discount_percentage = Percentage::new(Decimal::new(10, 0)).unwrap();
        let screen = CatalogScreen::new(
            FakeCatalog::default(),
            ProductStore::with_products(vec![discounted, product(2, "Plain", "120")]),
        );
        let rows = screen.rows();
        assert_eq!(rows[0].price_line, "R$ 9.99 - 10% OFF");
        assert_eq!(rows[1].price_line, "R$ 120.00 - 0% OFF");
    }

    #[test]
    fn test_open_unknown_product() {
        let screen = CatalogScreen::new(FakeCatalog::default(), ProductStore::new());
        assert!(matches!(
            screen.open_product(ProductId::new(1)),
            Err(AppError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_child_screens_share_store() {
        let store = ProductStore::with_products(vec![product(4, "Hat", "5")]);
        let screen = CatalogScreen::new(FakeCatalog::default(), store.clone());
        let detail = screen.open_product(ProductId::new(4)).unwrap();
        assert_eq!(detail.product_id(), ProductId::new(4));
        let _creation = screen.open_creation();
        assert_eq!(store.len(), 1);
    }
}
