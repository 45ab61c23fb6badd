//! Product creation screen.

use tracing::info;

use pocket_store_core::{Product, ProductForm, ValidationError};

use crate::store::ProductStore;

use super::Navigation;

/// Form for a new, locally created product.
pub struct CreationScreen {
    store: ProductStore,
    form: ProductForm,
}

impl CreationScreen {
    #[must_use]
    pub fn new(store: ProductStore) -> Self {
        Self {
            store,
            form: ProductForm::default(),
        }
    }

    #[must_use]
    pub const fn form(&self) -> &ProductForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Validate the form, add the product at the head of the store, and
    /// leave the screen. The form is cleared on success.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` if a required field is blank, the price
    /// is not a non-negative number, or the discount is outside 0..=100. The
    /// store is not touched.
    pub fn submit(&mut self) -> Result<Navigation, ValidationError> {
        let validated = self.form.validate()?;
        let product = Product::from_form(self.store.next_id(), validated);
        let id = product.id;
        self.store.add(product);
        self.form = ProductForm::default();
        info!(product_id = %id, "Product created");
        Ok(Navigation::back())
    }
}
