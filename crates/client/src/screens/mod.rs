//! Screen controllers.
//!
//! Each controller owns the state of one screen and exposes the actions a
//! user can take on it. Rendering is left to the front end; controllers only
//! decide what state to show and where to navigate next.
//!
//! Screens that touch products receive a cloned [`ProductStore`] handle, so
//! every screen in a session reads and writes the same list.
//!
//! [`ProductStore`]: crate::store::ProductStore

mod catalog;
mod creation;
mod detail;
mod login;
mod profile;

pub use catalog::{CatalogRow, CatalogScreen, CatalogState, LoadOutcome};
pub use creation::CreationScreen;
pub use detail::{DetailMode, DetailScreen, DetailView};
pub use login::{LoginErrors, LoginScreen};
pub use profile::{ProfileAction, ProfileOption, ProfileScreen};

use core::fmt;

use pocket_store_core::ProductId;

use crate::error::add_breadcrumb;

/// Navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Profile,
    ProductList,
    ProductDetails(ProductId),
    AddProduct,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("login"),
            Self::Profile => f.write_str("profile"),
            Self::ProductList => f.write_str("product_list"),
            Self::ProductDetails(id) => write!(f, "product_details/{id}"),
            Self::AddProduct => f.write_str("add_product"),
        }
    }
}

/// Where to go after a screen action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Push `Route`.
    To(Route),
    /// Return to the previous screen.
    Back,
}

impl Navigation {
    /// Navigate to `route`, leaving a breadcrumb.
    pub(crate) fn to(route: Route) -> Self {
        record_navigation(route);
        Self::To(route)
    }

    /// Navigate back, leaving a breadcrumb.
    pub(crate) fn back() -> Self {
        add_breadcrumb("navigation", "Back", None);
        Self::Back
    }
}

fn record_navigation(route: Route) {
    let route_name = route.to_string();
    add_breadcrumb("navigation", "Navigate", Some(&[("route", &route_name)]));
}
