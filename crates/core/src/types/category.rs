//! Catalog categories.
//!
//! The catalog is browsed through two fixed groups, each listing the remote
//! category keys it covers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A remote category key such as `mens-shirts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    /// Create a category key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

const MENS_CATEGORIES: &[&str] = &["mens-shirts", "mens-shoes", "mens-watches"];

const WOMENS_CATEGORIES: &[&str] = &[
    "womens-bags",
    "womens-dresses",
    "womens-jewellery",
    "womens-shoes",
    "womens-watches",
];

/// Top-level catalog group shown as a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryGroup {
    #[default]
    Mens,
    Womens,
}

impl CategoryGroup {
    /// All groups in tab order.
    pub const ALL: [Self; 2] = [Self::Mens, Self::Womens];

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mens => "Men",
            Self::Womens => "Women",
        }
    }

    /// Category keys in this group, in display order.
    #[must_use]
    pub fn categories(self) -> Vec<CategoryKey> {
        self.raw_categories()
            .iter()
            .map(|key| CategoryKey::from(*key))
            .collect()
    }

    /// The category loaded when the tab is opened.
    #[must_use]
    pub fn default_category(self) -> CategoryKey {
        let first = match self {
            Self::Mens => "mens-shirts",
            Self::Womens => "womens-bags",
        };
        CategoryKey::from(first)
    }

    /// Whether `key` belongs to this group.
    #[must_use]
    pub fn contains(self, key: &CategoryKey) -> bool {
        self.raw_categories().contains(&key.as_str())
    }

    /// Find the group owning `key`, if any.
    #[must_use]
    pub fn of(key: &CategoryKey) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.contains(key))
    }

    const fn raw_categories(self) -> &'static [&'static str] {
        match self {
            Self::Mens => MENS_CATEGORIES,
            Self::Womens => WOMENS_CATEGORIES,
        }
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
