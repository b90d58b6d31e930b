//! Home page showcase tabs.

use anyhow::Result;
use superbike_commerce::catalog::{Highlight, HIGHLIGHTS_LIMIT};

use super::HighlightsArgs;
use crate::context::Context;

/// Run the highlights command.
pub async fn run(args: HighlightsArgs, ctx: &Context) -> Result<()> {
    let tab: Highlight = args.tab.parse()?;
    let catalog = ctx.catalog()?;
    let products = catalog.highlights(tab, args.limit.unwrap_or(HIGHLIGHTS_LIMIT));

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(tab.display_name());
    if products.is_empty() {
        ctx.output.info("Nothing to show");
    } else {
        ctx.output.product_table(&products);
    }

    Ok(())
}
