//! Product detail screen with in-place editing and deletion.

use tracing::info;

use pocket_store_core::{Product, ProductForm, ProductId};

use crate::error::AppError;
use crate::store::ProductStore;

use super::Navigation;

/// Whether the screen shows the product or its edit form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailMode {
    #[default]
    Viewing,
    Editing,
}

/// Visibility of the delete confirmation dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum DeleteDialog {
    #[default]
    Hidden,
    Shown,
}

/// Display text for a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: String,
    /// e.g. `R$ 27.99`
    pub price: String,
    pub category: Option<String>,
    /// e.g. `4.5/5`
    pub rating: Option<String>,
    /// `Stock: N`, or `Out of stock`
    pub stock: String,
}

impl DetailView {
    fn of(product: &Product) -> Self {
        let stock = match product.stock {
            Some(count) if product.in_stock() => format!("Stock: {count}"),
            _ => "Out of stock".to_string(),
        };
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            thumbnail: product.thumbnail.clone(),
            price: format!("R$ {}", product.price),
            category: product.category.as_ref().map(ToString::to_string),
            rating: product
                .rating
                .map(|rating| format!("{}/5", rating.normalize())),
            stock,
        }
    }
}

/// One product from the shared store.
pub struct DetailScreen {
    store: ProductStore,
    product_id: ProductId,
    mode: DetailMode,
    form: ProductForm,
    delete_dialog: DeleteDialog,
}

impl DetailScreen {
    /// Open the product `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound` if the store does not hold `id`.
    pub fn new(store: ProductStore, id: ProductId) -> Result<Self, AppError> {
        if store.get(id).is_none() {
            return Err(AppError::ProductNotFound(id));
        }
        Ok(Self {
            store,
            product_id: id,
            mode: DetailMode::Viewing,
            form: ProductForm::default(),
            delete_dialog: DeleteDialog::Hidden,
        })
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub const fn mode(&self) -> DetailMode {
        self.mode
    }

    fn product(&self) -> Result<Product, AppError> {
        self.store
            .get(self.product_id)
            .ok_or(AppError::ProductNotFound(self.product_id))
    }

    /// Current product text, read from the store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound` if the product has been removed.
    pub fn view(&self) -> Result<DetailView, AppError> {
        self.product().map(|product| DetailView::of(&product))
    }

    /// Switch to editing with the form prefilled from the stored product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ProductNotFound` if the product has been removed.
    pub fn start_editing(&mut self) -> Result<(), AppError> {
        self.form = ProductForm::from_product(&self.product()?);
        self.mode = DetailMode::Editing;
        Ok(())
    }

    /// The edit buffer.
    #[must_use]
    pub const fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Mutable edit buffer. Changes reach the store only through [`save`](Self::save).
    pub const fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Discard the edit buffer.
    pub fn cancel_editing(&mut self) {
        self.form = ProductForm::default();
        self.mode = DetailMode::Viewing;
    }

    /// Validate the edit buffer and write it to the store.
    ///
    /// On rejection the screen stays in editing mode with the buffer intact
    /// and the store untouched.
    ///
    /// # Errors
    ///
    /// - `AppError::Validation` if a required field is blank or the price or
    ///   discount does not parse
    /// - `AppError::ProductNotFound` if the product was removed meanwhile
    pub fn save(&mut self) -> Result<(), AppError> {
        let validated = self.form.validate()?;
        let updated = self.product()?.with_edits(validated);
        if !self.store.update(updated) {
            return Err(AppError::ProductNotFound(self.product_id));
        }
        info!(product_id = %self.product_id, "Product updated");
        self.cancel_editing();
        Ok(())
    }

    #[must_use]
    pub fn is_delete_dialog_shown(&self) -> bool {
        self.delete_dialog == DeleteDialog::Shown
    }

    pub fn request_delete(&mut self) {
        self.delete_dialog = DeleteDialog::Shown;
    }

    pub fn cancel_delete(&mut self) {
        self.delete_dialog = DeleteDialog::Hidden;
    }

    /// Remove the product from the store and leave the screen.
    pub fn confirm_delete(&mut self) -> Navigation {
        let removed = self.store.remove(self.product_id);
        info!(product_id = %self.product_id, removed, "Product deleted");
        self.delete_dialog = DeleteDialog::Hidden;
        Navigation::back()
    }
}
