//! # Seed Data
//!
//! Starter catalog loaded into a fresh store for development and demos.
//!
//! Seed items go through the normal create path, so they receive ids
//! 1, 2, 3 and the counter continues at 4.

use catalog_core::{ItemDraft, Price};

/// (name, description, price in major units)
pub const SEED_ITEMS: &[(&str, &str, u64)] = &[
    ("Laptop", "14-inch ultrabook", 1200),
    ("Mouse", "Wireless mouse", 25),
    ("Keyboard", "Mechanical keyboard", 95),
];

/// Returns the seed catalog as drafts, in insertion order.
pub fn seed_drafts() -> impl Iterator<Item = ItemDraft> {
    SEED_ITEMS
        .iter()
        .map(|&(name, description, price)| ItemDraft::new(name, description, Price::from_major(price)))
}
