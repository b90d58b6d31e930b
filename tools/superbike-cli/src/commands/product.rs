//! Product detail page.

use anyhow::Result;
use serde_json::json;
use superbike_commerce::catalog::RELATED_PRODUCTS_LIMIT;
use superbike_commerce::money::format_price;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{price_label, stock_badge};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let product = catalog.get(&args.id)?;
    let related = catalog.related(&args.id, RELATED_PRODUCTS_LIMIT);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "effectivePrice": product.effective_price(),
            "related": related,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("{} {}", product.brand, product.name));
    if !product.description.is_empty() {
        ctx.output.info(&product.description);
    }
    ctx.output.kv("Price", &price_label(product));
    if let Some(savings) = product.savings() {
        ctx.output.kv("You save", &format_price(&savings));
    }
    ctx.output.kv("Rating", &format!("{:.1} / 5", product.rating));
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Colors", &product.colors.join(", "));
    ctx.output.kv("Availability", &stock_badge(product.stock_status()));
    if product.in_stock() {
        ctx.output.kv(
            "Order up to",
            &product.max_order_quantity().to_string(),
        );
    }

    let specs = &product.specs;
    ctx.output.header("Specifications");
    for (label, value) in [
        ("Engine", specs.engine.as_str()),
        ("Power", specs.power.as_str()),
        ("Torque", specs.torque.as_str()),
        ("Transmission", specs.transmission.as_str()),
        ("Weight", specs.weight.as_str()),
        ("Top speed", specs.top_speed.as_str()),
        ("Fuel capacity", specs.fuel_capacity.as_str()),
        ("Mileage", specs.mileage.as_str()),
        ("ABS", if specs.abs { "Yes" } else { "No" }),
    ] {
        if !value.is_empty() {
            ctx.output.kv(label, value);
        }
    }

    if !related.is_empty() {
        ctx.output.header("You may also like");
        ctx.output.product_table(&related);
    }

    Ok(())
}
