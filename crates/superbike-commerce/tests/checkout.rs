//! Checkout from a persisted cart to an order confirmation.

use std::time::Duration;

use superbike_cache::FileStore;
use superbike_commerce::prelude::*;

fn address() -> ShippingAddress {
    ShippingAddress {
        first_name: "Vikram".to_string(),
        last_name: "Singh".to_string(),
        email: "vikram@example.com".to_string(),
        phone: "9123456780".to_string(),
        address: "4 Park Street".to_string(),
        city: "Kolkata".to_string(),
        state: "West Bengal".to_string(),
        zip_code: "700016".to_string(),
    }
}

#[tokio::test]
async fn test_checkout_clears_persisted_cart() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::curated().unwrap();

    let mut engine = CartEngine::load(FileStore::open(dir.path()).unwrap());
    engine.add_item(catalog.get("8").unwrap(), 2, "Orange").unwrap();

    let mut flow = CheckoutFlow::new();
    flow.submit_address(address()).unwrap();
    flow.select_payment(PaymentDetails::Card {
        card_name: "Vikram Singh".to_string(),
        card_number: "4111 1111 1111 1111".to_string(),
        expiry_date: "08/28".to_string(),
        cvv: "321".to_string(),
    })
    .unwrap();

    let gateway = SimulatedGateway::new(Duration::from_millis(10));
    let order = flow.submit_payment(&mut engine, &gateway).await.unwrap();

    // Two units on sale at 9,99,000
    assert_eq!(order.summary.subtotal, Money::inr(1_998_000));
    assert_eq!(order.summary.tax, Money::inr(359_640));
    assert_eq!(order.summary.total, Money::inr(2_367_640));
    assert_eq!(order.item_count, 2);
    assert_eq!(order.payment_method, PaymentMethod::Card);
    assert_eq!(flow.step(), CheckoutStep::Complete);

    let reloaded = CartEngine::load(FileStore::open(dir.path()).unwrap());
    assert!(reloaded.state().is_empty());
}

#[tokio::test]
async fn test_invalid_payment_details_block_submission() {
    let mut flow = CheckoutFlow::new();
    flow.submit_address(address()).unwrap();

    let err = flow
        .select_payment(PaymentDetails::Upi {
            upi_id: String::new(),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Please enter a valid UPI ID");

    let mut engine = CartEngine::load(superbike_cache::MemoryStore::new());
    let catalog = Catalog::curated().unwrap();
    engine.add_item(catalog.get("1").unwrap(), 1, "Green").unwrap();
    assert!(matches!(
        flow.submit_payment(&mut engine, &SimulatedGateway::new(Duration::ZERO)).await,
        Err(CommerceError::InvalidCheckoutTransition { .. })
    ));
    assert_eq!(engine.state().total_items, 1);
}
