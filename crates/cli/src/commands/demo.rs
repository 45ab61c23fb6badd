//! End-to-end walk through every screen.

use pocket_store_client::config::ClientConfig;
use pocket_store_client::screens::{CatalogScreen, ProfileAction, ProfileOption};
use pocket_store_client::{App, Result};
use pocket_store_core::CategoryKey;

use crate::output;

const DEMO_TITLE: &str = "Pocket Store demo item";
const DEMO_THUMBNAIL: &str = "https://cdn.dummyjson.com/product-images/placeholder.png";

/// Sign in, load a category, then create, edit and delete a product,
/// printing the list after each step. Ends by signing out.
pub async fn run(
    config: &ClientConfig,
    username: &str,
    password: &str,
    category: Option<&str>,
) -> Result<()> {
    let app = App::from_config(config)?;

    let mut login = app.login_screen();
    login.set_username(username);
    login.set_password(password);
    login.submit().await?;

    let mut profile = app.profile_screen()?;
    output::heading("Profile");
    output::profile(&profile);
    if let ProfileAction::Notice(text) = profile.select(ProfileOption::Products) {
        output::line(text);
    }

    let catalog = app.catalog_screen();
    match category {
        Some(key) => catalog.select_category(CategoryKey::from(key)).await?,
        None => catalog.mount().await?,
    };
    print_list(&catalog, "Loaded");

    let mut creation = catalog.open_creation();
    let form = creation.form_mut();
    form.title = DEMO_TITLE.to_string();
    form.price = "42.50".to_string();
    form.thumbnail = DEMO_THUMBNAIL.to_string();
    form.discount = "5".to_string();
    creation.submit()?;
    print_list(&catalog, "Created");

    let Some(created) = catalog.rows().into_iter().next() else {
        tracing::warn!("Created product missing from the list");
        return Ok(());
    };

    let mut detail = catalog.open_product(created.id)?;
    detail.start_editing()?;
    let form = detail.form_mut();
    form.title = format!("{DEMO_TITLE} (edited)");
    form.price = "39.90".to_string();
    detail.save()?;
    output::heading("Edited");
    output::detail(&detail.view()?);
    print_list(&catalog, "After edit");

    detail.request_delete();
    detail.confirm_delete();
    print_list(&catalog, "Deleted");

    profile.request_logout();
    profile.confirm_logout();
    output::line("Signed out.");
    Ok(())
}

fn print_list<C>(catalog: &CatalogScreen<C>, step: &str)
where
    C: pocket_store_client::api::CatalogSource,
{
    output::heading(&format!("{step} ({})", catalog.active_tab().label()));
    output::rows(&catalog.rows());
}
