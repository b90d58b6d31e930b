//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use superbike_commerce::catalog::{Product, StockStatus};
use superbike_commerce::money::{format_price, Money};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{}", body);
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a step in a process.
    pub fn step(&self, num: u8, total: u8, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style(format!("[{}/{}]", num, total)).dim(), msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print one product per line: id, name, brand, price, rating.
    pub fn product_table(&self, products: &[&Product]) {
        if self.json {
            return;
        }
        let widths = [4, 22, 10, 10, 14, 5];
        self.table_row(&["ID", "NAME", "BRAND", "CATEGORY", "PRICE", "RATING"], &widths);
        for product in products {
            let price = price_label(product);
            let rating = format!("{:.1}", product.rating);
            let mut name = product.name.clone();
            if product.featured {
                name.push_str(" ★");
            }
            self.table_row(
                &[
                    product.id.as_str(),
                    &name,
                    &product.brand,
                    &product.category,
                    &price,
                    &rating,
                ],
                &widths,
            );
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Effective price, with the base price alongside when discounted.
pub fn price_label(product: &Product) -> String {
    let effective = format_price(&product.effective_price());
    match product.savings() {
        Some(_) => format!("{} (was {})", effective, format_price(&product.price)),
        None => effective,
    }
}

/// Colored stock line.
pub fn stock_badge(status: StockStatus) -> String {
    let message = status.message();
    match status {
        StockStatus::InStock => style(message).green().to_string(),
        StockStatus::LowStock(_) => style(message).yellow().to_string(),
        StockStatus::OutOfStock => style(message).red().to_string(),
    }
}

/// Right-aligned amount for summary blocks.
pub fn amount(money: &Money) -> String {
    format!("{:>14}", format_price(money))
}
