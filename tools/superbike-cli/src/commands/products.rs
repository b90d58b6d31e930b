//! Product listing.

use anyhow::Result;
use serde_json::json;
use superbike_commerce::money::Money;
use superbike_commerce::search::{FilterSpec, PriceRange, SortOption};

use super::ProductsArgs;
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    if args.facets {
        if ctx.output.is_json() {
            ctx.output.json(&json!({
                "brands": catalog.brands(),
                "categories": catalog.categories(),
            }));
            return Ok(());
        }
        ctx.output.header("Brands");
        for brand in catalog.brands() {
            ctx.output.list_item(brand);
        }
        ctx.output.header("Categories");
        for category in catalog.categories() {
            ctx.output.list_item(category);
        }
        return Ok(());
    }

    let spec = build_spec(&args);
    let results = spec.query(catalog.products());

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", spec.sort.display_name()));
    if results.is_empty() {
        ctx.output.info("No products found");
        return Ok(());
    }
    ctx.output.product_table(&results.products);
    ctx.output.info(&results.count_label());

    Ok(())
}

fn build_spec(args: &ProductsArgs) -> FilterSpec {
    let defaults = PriceRange::default();
    let min = args.min.map(Money::inr).unwrap_or(defaults.min);
    let max = args.max.map(Money::inr).unwrap_or(defaults.max);

    let mut spec = FilterSpec::new()
        .with_search(args.search.trim())
        .with_price_range(min, max)
        .with_sort(SortOption::parse_lenient(&args.sort));
    for brand in &args.brand {
        spec = spec.with_brand(brand.as_str());
    }
    for category in &args.category {
        spec = spec.with_category(category.as_str());
    }
    spec
}
