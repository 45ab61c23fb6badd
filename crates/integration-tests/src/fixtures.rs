//! Test records.

use rust_decimal::Decimal;
use secrecy::SecretString;

use pocket_store_core::{CategoryKey, Percentage, Price, Product, ProductId, User, UserId};

/// A directory user.
#[must_use]
pub fn user(id: i64, username: &str, password: &str, first_name: &str, last_name: &str) -> User {
    User {
        id: UserId::new(id),
        username: username.to_string(),
        password: SecretString::from(password.to_string()),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{username}@example.com"),
        image: format!("https://dummyjson.com/icon/{username}/128"),
    }
}

/// The directory used by the sign-in tests: `alice` / `secret` and
/// `emilys` / `emilyspass`.
#[must_use]
pub fn directory() -> Vec<User> {
    vec![
        user(1, "emilys", "emilyspass", "Emily", "Johnson"),
        user(7, "alice", "secret", "Alice", "Liddell"),
    ]
}

/// A catalog product.
///
/// # Panics
///
/// Panics if `price` is not a non-negative number.
#[must_use]
pub fn product(id: i64, title: &str, price: &str, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        price: Price::parse(price).expect("fixture price"),
        thumbnail: format!("https://cdn.dummyjson.com/products/{id}/thumbnail.png"),
        discount_percentage: Percentage::ZERO,
        description: Some(format!("{title} description")),
        category: Some(CategoryKey::from(category)),
        rating: Some(Decimal::new(42, 1)),
        stock: Some(10),
    }
}

/// `mens-shirts` as the catalog serves it.
#[must_use]
pub fn mens_shirts() -> Vec<Product> {
    vec![
        product(80, "Blue & Black Check Shirt", "29.99", "mens-shirts"),
        product(81, "Gigabyte Aorus Men Tshirt", "24.99", "mens-shirts"),
        product(82, "Man Plaid Shirt", "34.99", "mens-shirts"),
    ]
}

/// `womens-bags` as the catalog serves it.
#[must_use]
pub fn womens_bags() -> Vec<Product> {
    vec![
        product(121, "Blue Women's Handbag", "49.99", "womens-bags"),
        product(122, "Heshe Women's Leather Bag", "129.99", "womens-bags"),
    ]
}
