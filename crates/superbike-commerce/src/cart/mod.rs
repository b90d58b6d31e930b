//! Shopping cart module.
//!
//! Contains the cart state and reducer, the persistent cart session, and
//! order summary pricing.

mod cart;
mod engine;
mod pricing;

pub use cart::{
    compute_totals, reduce, CartCommand, CartLineItem, CartNotice, CartState, CART_CURRENCY,
};
pub use engine::{CartEngine, CartOutcome, CART_STORAGE_KEY};
pub use pricing::{OrderSummary, COD_FEE_RUPEES, SHIPPING_FEE_RUPEES, TAX_RATE_BASIS_POINTS};
