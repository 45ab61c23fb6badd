//! Terminal output.
//!
//! Results go to stdout; logs and failures go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use pocket_store_client::screens::{CatalogRow, DetailView, ProfileScreen};
use pocket_store_core::CategoryGroup;

pub fn heading(text: &str) {
    println!("\n== {text} ==");
}

pub fn line(text: &str) {
    println!("{text}");
}

pub fn failure(message: &str) {
    eprintln!("error: {message}");
}

pub fn groups() {
    for group in CategoryGroup::ALL {
        println!("{}:", group.label());
        for key in group.categories() {
            println!("  {key}");
        }
    }
}

pub fn rows(rows: &[CatalogRow]) {
    if rows.is_empty() {
        println!("(no products)");
    }
    for row in rows {
        println!("[{}] {}  {}", row.id, row.title, row.price_line);
    }
}

pub fn detail(view: &DetailView) {
    println!("{}", view.title);
    if let Some(description) = &view.description {
        println!("  {description}");
    }
    println!("  {}", view.price);
    if let Some(category) = &view.category {
        println!("  Category: {category}");
    }
    if let Some(rating) = &view.rating {
        println!("  Rating: {rating}");
    }
    println!("  {}", view.stock);
}

pub fn profile<D, K>(profile: &ProfileScreen<D, K>)
where
    D: pocket_store_client::api::UserDirectory,
    K: pocket_store_client::storage::KeyValueStore,
{
    println!("{}", profile.full_name());
    println!("  {}", profile.email());
    println!("  {}", profile.avatar());
}
