//! Order summary pricing.

use crate::cart::CartState;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Flat shipping charge per order, in rupees.
pub const SHIPPING_FEE_RUPEES: i64 = 10_000;

/// Cash-on-delivery handling charge, in rupees.
pub const COD_FEE_RUPEES: i64 = 10_000;

/// GST on the subtotal, in basis points (18%).
pub const TAX_RATE_BASIS_POINTS: i64 = 1_800;

/// Pricing breakdown shown beside the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Cart subtotal at effective prices.
    pub subtotal: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Present only when paying cash on delivery.
    pub cod_fee: Option<Money>,
    /// subtotal + shipping + tax + cod_fee.
    pub total: Money,
}

impl OrderSummary {
    /// Price a cart for card-style payment.
    pub fn for_cart(cart: &CartState) -> Self {
        Self::build(cart.subtotal, false)
    }

    /// Price a cart paid for on delivery.
    pub fn for_cart_cod(cart: &CartState) -> Self {
        Self::build(cart.subtotal, true)
    }

    fn build(subtotal: Money, cash_on_delivery: bool) -> Self {
        let currency = subtotal.currency;
        let shipping = Money::from_major(SHIPPING_FEE_RUPEES, currency);
        let tax = subtotal.percentage(TAX_RATE_BASIS_POINTS);
        let cod_fee = cash_on_delivery.then(|| Money::from_major(COD_FEE_RUPEES, currency));

        let mut total = subtotal.saturating_add(&shipping).saturating_add(&tax);
        if let Some(fee) = &cod_fee {
            total = total.saturating_add(fee);
        }

        Self {
            subtotal,
            shipping,
            tax,
            cod_fee,
            total,
        }
    }

    /// Check if a cash-on-delivery fee is included.
    pub fn has_cod_fee(&self) -> bool {
        self.cod_fee.is_some()
    }
}
