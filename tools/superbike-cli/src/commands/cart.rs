//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use superbike_cache::KeyValueStore;
use superbike_commerce::cart::{CartEngine, CartOutcome, CartState, OrderSummary};
use superbike_commerce::catalog::Catalog;
use superbike_commerce::money::format_price;

use super::{CartAction, CartArgs};
use crate::context::Context;
use crate::output::{amount, Output};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut engine = ctx.cart()?;

    match args.command.unwrap_or(CartAction::Show) {
        CartAction::Show => {
            show_cart(engine.state(), &ctx.output);
            Ok(())
        }
        CartAction::Add {
            id,
            quantity,
            color,
        } => {
            let catalog = ctx.catalog()?;
            add_to_cart(&mut engine, &catalog, &id, quantity, color.as_deref(), &ctx.output)
        }
        CartAction::Update { id, quantity } => {
            if engine.state().quantity_of(&id) == 0 {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
            let outcome = engine.update_quantity(&id, quantity);
            report(&outcome, &ctx.output);
            Ok(())
        }
        CartAction::Remove { id } => {
            let outcome = engine.remove_item(&id);
            report(&outcome, &ctx.output);
            Ok(())
        }
        CartAction::Clear { yes } => {
            if engine.state().is_empty() {
                ctx.output.info("Your cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Remove all {} item(s) from the cart?",
                        engine.state().total_items
                    ))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cart left unchanged");
                    return Ok(());
                }
            }
            let outcome = engine.clear();
            report(&outcome, &ctx.output);
            Ok(())
        }
    }
}

/// Add with the checks the product page applies before its button is enabled.
fn add_to_cart<S: KeyValueStore>(
    engine: &mut CartEngine<S>,
    catalog: &Catalog,
    id: &str,
    quantity: i64,
    color: Option<&str>,
    output: &Output,
) -> Result<()> {
    let product = catalog.get(id)?;
    if !product.in_stock() {
        bail!("{} is out of stock", product.name);
    }
    let color = color.unwrap_or_else(|| product.default_color());
    if !product.offers_color(color) {
        bail!(
            "{} is not available in {} (choose from {})",
            product.name,
            color,
            product.colors.join(", ")
        );
    }
    let max = i64::from(product.max_order_quantity());
    if quantity > max {
        bail!("You can order at most {} of {} at a time", max, product.name);
    }

    let outcome = engine.add_item(product, quantity, color)?;
    report(&outcome, output);
    Ok(())
}

fn report(outcome: &CartOutcome<'_>, output: &Output) {
    if output.is_json() {
        output.json(&json!({
            "notice": outcome.notice.as_ref().map(|n| n.message()),
            "cart": outcome.state,
        }));
        return;
    }
    if let Some(notice) = &outcome.notice {
        output.success(&notice.message());
    }
    output.info(&format!(
        "{} item(s), subtotal {}",
        outcome.state.total_items,
        format_price(&outcome.state.subtotal)
    ));
}

/// Print the cart page: line items then the order summary.
pub fn show_cart(state: &CartState, output: &Output) {
    let summary = OrderSummary::for_cart(state);
    if output.is_json() {
        output.json(&json!({ "cart": state, "summary": summary }));
        return;
    }

    output.header("Your Cart");
    if state.is_empty() {
        output.info("Your cart is empty");
        return;
    }

    let widths = [4, 22, 8, 4, 14, 14];
    output.table_row(&["ID", "PRODUCT", "COLOR", "QTY", "PRICE", "TOTAL"], &widths);
    for item in &state.items {
        let quantity = item.quantity.to_string();
        let unit = format_price(&item.unit_price());
        let total = format_price(&item.line_total());
        output.table_row(
            &[
                item.product.id.as_str(),
                &item.product.name,
                &item.color,
                &quantity,
                &unit,
                &total,
            ],
            &widths,
        );
    }

    print_summary(&summary, output);
}

/// Print an order summary block.
pub fn print_summary(summary: &OrderSummary, output: &Output) {
    output.header("Order Summary");
    output.kv("Subtotal", &amount(&summary.subtotal));
    output.kv("Shipping", &amount(&summary.shipping));
    output.kv("Tax (18%)", &amount(&summary.tax));
    if let Some(fee) = &summary.cod_fee {
        output.kv("COD fee", &amount(fee));
    }
    output.kv("Total", &amount(&summary.total));
}

#[cfg(test)]
mod tests {
    use super::*;
    use superbike_cache::MemoryStore;
    use superbike_commerce::catalog::DEFAULT_CATALOG_SEED;

    fn setup() -> (CartEngine<MemoryStore>, Catalog, Output) {
        (
            CartEngine::load(MemoryStore::new()),
            Catalog::generated(DEFAULT_CATALOG_SEED).unwrap(),
            Output::new(false, true),
        )
    }

    #[test]
    fn test_add_defaults_to_first_color() {
        let (mut engine, catalog, output) = setup();
        add_to_cart(&mut engine, &catalog, "1", 1, None, &output).unwrap();
        assert_eq!(engine.state().items[0].color, "Green");
    }

    #[test]
    fn test_add_rejects_unknown_color_and_product() {
        let (mut engine, catalog, output) = setup();
        assert!(add_to_cart(&mut engine, &catalog, "1", 1, Some("Pink"), &output).is_err());
        assert!(add_to_cart(&mut engine, &catalog, "404", 1, None, &output).is_err());
        assert!(engine.state().is_empty());
    }

    #[test]
    fn test_add_respects_quantity_picker() {
        let (mut engine, catalog, output) = setup();
        let product = catalog.get("1").unwrap();
        let too_many = i64::from(product.max_order_quantity()) + 1;
        assert!(add_to_cart(&mut engine, &catalog, "1", too_many, None, &output).is_err());
        assert!(add_to_cart(&mut engine, &catalog, "1", 0, None, &output).is_err());
        assert!(engine.state().is_empty());
    }
}
