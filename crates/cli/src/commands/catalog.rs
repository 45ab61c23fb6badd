//! Catalog browsing commands.

use pocket_store_client::config::ClientConfig;
use pocket_store_client::{App, Result};
use pocket_store_core::CategoryKey;

use crate::output;

/// Print the category tabs and their keys. No network access.
pub fn categories() {
    output::groups();
}

/// Fetch one category and print its rows.
///
/// Keys outside the two tabs are passed to the API as-is.
pub async fn products(config: &ClientConfig, category: &str) -> Result<()> {
    let app = App::from_config(config)?;
    let catalog = app.catalog_screen();

    catalog.select_category(CategoryKey::from(category)).await?;

    output::heading(category);
    output::rows(&catalog.rows());
    Ok(())
}
