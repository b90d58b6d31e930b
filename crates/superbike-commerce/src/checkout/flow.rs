//! Checkout flow state machine.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use superbike_cache::KeyValueStore;

use crate::cart::{CartEngine, CartState, OrderSummary};
use crate::checkout::{PaymentDetails, PaymentGateway, PaymentMethod, ShippingAddress};
use crate::error::CommerceError;
use crate::ids::OrderId;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Shipping address entry.
    #[default]
    Address,
    /// Payment method entry.
    Payment,
    /// Order placed.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Address => "address",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Address => "Shipping Address",
            CheckoutStep::Payment => "Payment Method",
            CheckoutStep::Complete => "Complete",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Address => 1,
            CheckoutStep::Payment => 2,
            CheckoutStep::Complete => 3,
        }
    }
}

/// The placed order, as shown on the success page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    /// `SUP` followed by six digits.
    pub order_number: OrderId,
    pub placed_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    pub ship_to: ShippingAddress,
    /// Pricing at the moment of purchase.
    pub summary: OrderSummary,
    /// Units bought.
    pub item_count: i64,
}

/// One shopper's pass through checkout.
///
/// Address and payment entry take `&mut self`. Submission takes `&self` and
/// holds a processing flag for as long as the gateway call is in flight, so
/// a second submission on the same flow is refused rather than charging
/// twice.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    address: Option<ShippingAddress>,
    payment: Option<PaymentDetails>,
    processing: AtomicBool,
    completed: AtomicBool,
}

/// Clears the processing flag when dropped, including on cancellation.
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> CheckoutStep {
        if self.completed.load(Ordering::Acquire) {
            CheckoutStep::Complete
        } else {
            self.step
        }
    }

    pub fn address(&self) -> Option<&ShippingAddress> {
        self.address.as_ref()
    }

    pub fn payment(&self) -> Option<&PaymentDetails> {
        self.payment.as_ref()
    }

    /// Check if a payment is being processed.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Record the shipping address and move on to payment.
    pub fn submit_address(&mut self, address: ShippingAddress) -> Result<CheckoutStep, CommerceError> {
        self.ensure_step(CheckoutStep::Address, CheckoutStep::Payment)?;
        address.validate()?;
        self.address = Some(address);
        self.step = CheckoutStep::Payment;
        Ok(self.step)
    }

    /// Return to the address form.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        self.ensure_step(CheckoutStep::Payment, CheckoutStep::Address)?;
        self.step = CheckoutStep::Address;
        Ok(self.step)
    }

    /// Record the payment details.
    pub fn select_payment(&mut self, details: PaymentDetails) -> Result<(), CommerceError> {
        self.ensure_step(CheckoutStep::Payment, CheckoutStep::Payment)?;
        details.validate()?;
        self.payment = Some(details);
        Ok(())
    }

    /// Price `cart` for the selected payment method.
    pub fn summary(&self, cart: &CartState) -> OrderSummary {
        match self.payment.as_ref().map(PaymentDetails::method) {
            Some(PaymentMethod::CashOnDelivery) => OrderSummary::for_cart_cod(cart),
            _ => OrderSummary::for_cart(cart),
        }
    }

    /// Charge the cart through `gateway`, then empty it.
    ///
    /// The cart is cleared only after the gateway approves; a declined
    /// payment leaves it as it was.
    pub async fn submit_payment<S, G>(
        &self,
        engine: &mut CartEngine<S>,
        gateway: &G,
    ) -> Result<OrderConfirmation, CommerceError>
    where
        S: KeyValueStore,
        G: PaymentGateway + ?Sized,
    {
        if self.completed.load(Ordering::Acquire) {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: CheckoutStep::Complete.as_str().to_string(),
                to: CheckoutStep::Complete.as_str().to_string(),
            });
        }
        let (Some(address), Some(payment)) = (&self.address, &self.payment) else {
            return Err(CommerceError::InvalidCheckoutTransition {
                from: self.step.as_str().to_string(),
                to: CheckoutStep::Complete.as_str().to_string(),
            });
        };
        if engine.state().is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        if self
            .processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CommerceError::CheckoutInProgress);
        }
        let _guard = ProcessingGuard(&self.processing);

        let summary = self.summary(engine.state());
        let item_count = engine.state().total_items;
        tracing::info!(
            method = %payment.method(),
            total = %summary.total,
            item_count,
            "submitting payment"
        );

        let receipt = gateway.authorize(summary.total, payment).await?;

        engine.clear();
        self.completed.store(true, Ordering::Release);

        let confirmation = OrderConfirmation {
            order_number: OrderId::generate(),
            placed_at: Utc::now(),
            payment_method: receipt.method,
            payment_reference: receipt.reference,
            ship_to: address.clone(),
            summary,
            item_count,
        };
        tracing::info!(order = %confirmation.order_number, "order placed");
        Ok(confirmation)
    }

    fn ensure_step(&self, expected: CheckoutStep, to: CheckoutStep) -> Result<(), CommerceError> {
        let current = self.step();
        if current == expected {
            Ok(())
        } else {
            Err(CommerceError::InvalidCheckoutTransition {
                from: current.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::checkout::{PaymentReceipt, SimulatedGateway};
    use crate::money::Money;
    use async_trait::async_trait;
    use std::time::Duration;
    use superbike_cache::MemoryStore;

    struct DecliningGateway;

    #[async_trait]
    impl PaymentGateway for DecliningGateway {
        async fn authorize(
            &self,
            _amount: Money,
            _details: &PaymentDetails,
        ) -> Result<PaymentReceipt, CommerceError> {
            Err(CommerceError::PaymentDeclined("insufficient funds".to_string()))
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            zip_code: "560001".to_string(),
        }
    }

    fn engine_with_bike() -> CartEngine<MemoryStore> {
        let mut engine = CartEngine::load(MemoryStore::new());
        let bike = Product::new("1", "Ninja ZX-10R", "Kawasaki", "Sport", Money::inr(1_580_000));
        engine.add_item(&bike, 1, "Black").unwrap();
        engine
    }

    fn ready_flow(details: PaymentDetails) -> CheckoutFlow {
        let mut flow = CheckoutFlow::new();
        flow.submit_address(address()).unwrap();
        flow.select_payment(details).unwrap();
        flow
    }

    fn fast_gateway() -> SimulatedGateway {
        SimulatedGateway::new(Duration::from_millis(10))
    }

    #[test]
    fn test_step_transitions() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(flow.step(), CheckoutStep::Address);
        assert!(flow.select_payment(PaymentDetails::CashOnDelivery).is_err());

        assert!(flow.submit_address(ShippingAddress::default()).is_err());
        assert_eq!(flow.step(), CheckoutStep::Address);

        assert_eq!(flow.submit_address(address()).unwrap(), CheckoutStep::Payment);
        assert_eq!(flow.go_back().unwrap(), CheckoutStep::Address);
        assert!(flow.go_back().is_err());
    }

    #[test]
    fn test_summary_follows_payment_method() {
        let engine = engine_with_bike();
        let cod = ready_flow(PaymentDetails::CashOnDelivery);
        assert!(cod.summary(engine.state()).has_cod_fee());

        let upi = ready_flow(PaymentDetails::Upi {
            upi_id: "asha@upi".to_string(),
        });
        assert!(!upi.summary(engine.state()).has_cod_fee());
    }

    #[tokio::test]
    async fn test_successful_payment_clears_cart() {
        let mut engine = engine_with_bike();
        let flow = ready_flow(PaymentDetails::CashOnDelivery);

        let order = flow.submit_payment(&mut engine, &fast_gateway()).await.unwrap();
        assert!(order.order_number.as_str().starts_with("SUP"));
        assert_eq!(order.item_count, 1);
        assert_eq!(order.summary.total, Money::inr(1_884_400));
        assert_eq!(order.ship_to.city, "Bengaluru");
        assert!(engine.state().is_empty());
        assert_eq!(flow.step(), CheckoutStep::Complete);
        assert!(!flow.is_processing());

        // A finished flow cannot be charged again
        let mut other = engine_with_bike();
        assert!(matches!(
            flow.submit_payment(&mut other, &fast_gateway()).await,
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_cart_refused() {
        let mut engine = CartEngine::load(MemoryStore::new());
        let flow = ready_flow(PaymentDetails::CashOnDelivery);
        assert!(matches!(
            flow.submit_payment(&mut engine, &fast_gateway()).await,
            Err(CommerceError::EmptyCart)
        ));
    }

    #[tokio::test]
    async fn test_payment_before_details_refused() {
        let mut engine = engine_with_bike();
        let flow = CheckoutFlow::new();
        assert!(matches!(
            flow.submit_payment(&mut engine, &fast_gateway()).await,
            Err(CommerceError::InvalidCheckoutTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_second_submit_while_pending() {
        let mut first = engine_with_bike();
        let mut second = engine_with_bike();
        let flow = ready_flow(PaymentDetails::CashOnDelivery);
        let gateway = SimulatedGateway::new(Duration::from_millis(50));

        let (a, b) = tokio::join!(
            flow.submit_payment(&mut first, &gateway),
            flow.submit_payment(&mut second, &gateway)
        );
        assert!(a.is_ok());
        assert!(matches!(b, Err(CommerceError::CheckoutInProgress)));
        assert!(first.state().is_empty());
        assert_eq!(second.state().total_items, 1);
    }

    #[tokio::test]
    async fn test_declined_payment_keeps_cart() {
        let mut engine = engine_with_bike();
        let flow = ready_flow(PaymentDetails::CashOnDelivery);

        let result = flow.submit_payment(&mut engine, &DecliningGateway).await;
        assert!(matches!(result, Err(CommerceError::PaymentDeclined(_))));
        assert_eq!(engine.state().total_items, 1);
        assert_eq!(flow.step(), CheckoutStep::Payment);
        assert!(!flow.is_processing());
    }
}
