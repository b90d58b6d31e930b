//! Product catalog module.
//!
//! Contains the product record, the curated and generated line-up, and
//! read-only catalog lookups.

mod catalog;
mod product;
mod seed;

pub use catalog::{Catalog, Highlight, DEFAULT_CATALOG_SEED, HIGHLIGHTS_LIMIT, RELATED_PRODUCTS_LIMIT};
pub use product::{Product, ProductSpecs, StockStatus, LOW_STOCK_THRESHOLD, MAX_QUANTITY_CHOICE};
pub use seed::{curated_products, generate_products, BRANDS, CATEGORIES, GENERATED_IDS};
