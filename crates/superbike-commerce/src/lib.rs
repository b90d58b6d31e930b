//! Storefront domain logic for the superbike shop.
//!
//! - **Catalog**: product records, the curated and generated line-up
//! - **Cart**: the pure cart reducer and its persistent session
//! - **Search**: the products page filter and sort pipeline
//! - **Checkout**: address and payment steps, simulated payment, orders
//!
//! # Example
//!
//! ```rust,ignore
//! use superbike_cache::MemoryStore;
//! use superbike_commerce::prelude::*;
//!
//! let catalog = Catalog::generated(DEFAULT_CATALOG_SEED)?;
//!
//! // Filter and sort the catalog
//! let spec = FilterSpec::new()
//!     .with_brand("Ducati")
//!     .with_sort(SortOption::PriceLow);
//! let results = spec.query(catalog.products());
//! println!("{}", results.count_label());
//!
//! // Fill a cart
//! let mut cart = CartEngine::load(MemoryStore::new());
//! let bike = catalog.get("3")?;
//! cart.add_item(bike, 1, bike.default_color())?;
//! println!("Subtotal: {}", format_price(&cart.state().subtotal));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{format_compact, format_price, Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_compact, format_price, Currency, Money};

    // Catalog
    pub use crate::catalog::{
        Catalog, Highlight, Product, ProductSpecs, StockStatus, DEFAULT_CATALOG_SEED,
        HIGHLIGHTS_LIMIT, RELATED_PRODUCTS_LIMIT,
    };

    // Cart
    pub use crate::cart::{
        reduce, CartCommand, CartEngine, CartLineItem, CartNotice, CartOutcome, CartState,
        OrderSummary,
    };

    // Checkout
    pub use crate::checkout::{
        CheckoutFlow, CheckoutStep, OrderConfirmation, PaymentDetails, PaymentGateway,
        PaymentMethod, ShippingAddress, SimulatedGateway,
    };

    // Search
    pub use crate::search::{FilterSpec, PriceRange, QueryResults, SortOption};
}
