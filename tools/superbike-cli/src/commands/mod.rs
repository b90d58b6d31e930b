//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod highlights;
pub mod product;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Search name, brand and description.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only these brands (repeatable).
    #[arg(short, long)]
    pub brand: Vec<String>,

    /// Only these categories (repeatable).
    #[arg(short, long)]
    pub category: Vec<String>,

    /// Lowest effective price, in rupees.
    #[arg(long)]
    pub min: Option<i64>,

    /// Highest effective price, in rupees.
    #[arg(long)]
    pub max: Option<i64>,

    /// featured, price-low, price-high, rating or newest.
    #[arg(long, default_value = "featured")]
    pub sort: String,

    /// List the available brands and categories instead.
    #[arg(long)]
    pub facets: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the highlights command.
#[derive(Args)]
pub struct HighlightsArgs {
    /// featured, new or sale.
    #[arg(default_value = "featured")]
    pub tab: String,

    /// How many products to show.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartAction>,
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart and order summary.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        id: String,
        /// Units to add.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
        /// Color (default: the product's first color).
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Set the quantity of a product's line.
    Update {
        /// Product ID.
        id: String,
        /// New quantity; values below 1 become 1.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line of a product.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    /// Street address.
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub state: String,
    /// PIN code.
    #[arg(long, default_value = "")]
    pub zip: String,

    /// card, upi, netbanking, wallet or cod.
    #[arg(short, long, default_value = "card")]
    pub method: String,

    /// Name on card.
    #[arg(long, default_value = "")]
    pub card_name: String,
    #[arg(long, default_value = "")]
    pub card_number: String,
    /// MM/YY.
    #[arg(long, default_value = "")]
    pub expiry: String,
    #[arg(long, default_value = "")]
    pub cvv: String,
    #[arg(long, default_value = "")]
    pub upi_id: String,
    #[arg(long, default_value = "")]
    pub bank: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
