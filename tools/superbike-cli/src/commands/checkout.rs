//! Checkout command.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use superbike_commerce::checkout::{
    CheckoutFlow, CheckoutStep, OrderConfirmation, PaymentDetails, PaymentMethod, ShippingAddress,
};
use superbike_commerce::money::format_price;
use superbike_commerce::CommerceError;

use super::cart::print_summary;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut engine = ctx.cart()?;
    if engine.state().is_empty() {
        return Err(CommerceError::EmptyCart.into());
    }

    let mut flow = CheckoutFlow::new();
    let total_steps = CheckoutStep::Complete.number();

    // Step 1: Address
    ctx.output.step(
        CheckoutStep::Address.number(),
        total_steps,
        CheckoutStep::Address.display_name(),
    );
    flow.submit_address(address_from(&args))?;

    // Step 2: Payment
    ctx.output.step(
        CheckoutStep::Payment.number(),
        total_steps,
        CheckoutStep::Payment.display_name(),
    );
    let method: PaymentMethod = args.method.parse()?;
    flow.select_payment(payment_from(&args, method))?;
    ctx.output.debug(&format!("Paying by {}", method.display_name()));

    let summary = flow.summary(engine.state());
    if !ctx.output.is_json() {
        print_summary(&summary, &ctx.output);
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Pay {} by {}?",
                format_price(&summary.total),
                method.display_name()
            ))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Processing payment...");
    let result = flow.submit_payment(&mut engine, &ctx.gateway()).await;
    spinner.finish_and_clear();
    let order = result.context("Payment failed")?;

    print_confirmation(&order, ctx);
    Ok(())
}

fn address_from(args: &CheckoutArgs) -> ShippingAddress {
    ShippingAddress {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        address: args.address.clone(),
        city: args.city.clone(),
        state: args.state.clone(),
        zip_code: args.zip.clone(),
    }
}

fn payment_from(args: &CheckoutArgs, method: PaymentMethod) -> PaymentDetails {
    match method {
        PaymentMethod::Card => PaymentDetails::Card {
            card_name: args.card_name.clone(),
            card_number: args.card_number.clone(),
            expiry_date: args.expiry.clone(),
            cvv: args.cvv.clone(),
        },
        PaymentMethod::Upi => PaymentDetails::Upi {
            upi_id: args.upi_id.clone(),
        },
        PaymentMethod::NetBanking => PaymentDetails::NetBanking {
            bank_name: args.bank.clone(),
        },
        PaymentMethod::Wallet => PaymentDetails::Wallet {
            phone: args.phone.clone(),
        },
        PaymentMethod::CashOnDelivery => PaymentDetails::CashOnDelivery,
    }
}

fn print_confirmation(order: &OrderConfirmation, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(order);
        return;
    }

    ctx.output.step(
        CheckoutStep::Complete.number(),
        CheckoutStep::Complete.number(),
        "Order placed",
    );
    ctx.output.success("Payment successful! Your order has been placed.");
    ctx.output.kv("Order number", &format!("#{}", order.order_number));
    ctx.output.kv(
        "Placed at",
        &order.placed_at.format("%d %b %Y, %H:%M UTC").to_string(),
    );
    ctx.output.kv("Items", &order.item_count.to_string());
    ctx.output.kv("Paid", &format_price(&order.summary.total));
    ctx.output.kv("Method", order.payment_method.display_name());
    ctx.output.kv("Ship to", &order.ship_to.full_name());
    ctx.output.kv("", &order.ship_to.one_line());
}
