//! Search module.
//!
//! Filters and sorts the catalog for the products page.

mod filter;
mod query;
mod results;

pub use filter::{FilterSpec, PriceRange, MAX_PRICE_RUPEES};
pub use query::SortOption;
pub use results::QueryResults;
