//! Checkout module.
//!
//! Contains the address and payment steps, the payment gateway seam and
//! order confirmation.

mod address;
mod flow;
mod payment;

pub use address::ShippingAddress;
pub use flow::{CheckoutFlow, CheckoutStep, OrderConfirmation};
pub use payment::{
    PaymentDetails, PaymentGateway, PaymentMethod, PaymentReceipt, SimulatedGateway,
    DEFAULT_PROCESSING_DELAY,
};
