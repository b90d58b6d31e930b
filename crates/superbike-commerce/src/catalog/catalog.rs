//! The read-only product catalog.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::seed::{curated_products, generate_products, GENERATED_IDS};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// How many related products the product page shows.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// How many products a home page showcase tab shows.
pub const HIGHLIGHTS_LIMIT: usize = 8;

/// Seed used when no catalog seed is configured.
pub const DEFAULT_CATALOG_SEED: u64 = 71;

/// Home page showcase tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Highlight {
    #[default]
    Featured,
    New,
    OnSale,
}

impl Highlight {
    pub fn as_str(&self) -> &'static str {
        match self {
            Highlight::Featured => "featured",
            Highlight::New => "new",
            Highlight::OnSale => "sale",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Highlight::Featured => "Featured",
            Highlight::New => "New Arrivals",
            Highlight::OnSale => "On Sale",
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Highlight::Featured => product.featured,
            Highlight::New => product.is_new,
            Highlight::OnSale => product.on_sale,
        }
    }
}

impl FromStr for Highlight {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "featured" => Ok(Highlight::Featured),
            "new" => Ok(Highlight::New),
            "sale" | "on-sale" => Ok(Highlight::OnSale),
            other => Err(CommerceError::ValidationError(format!(
                "Unknown highlight tab: {}",
                other
            ))),
        }
    }
}

/// An immutable, ordered product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wrap an existing product list, keeping its order.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Only the hand-written entries.
    pub fn curated() -> Result<Self, CommerceError> {
        Ok(Self::new(curated_products()?))
    }

    /// The full storefront line-up: curated entries followed by generated
    /// placeholders whose random fields derive from `seed`.
    pub fn generated(seed: u64) -> Result<Self, CommerceError> {
        let mut products = curated_products()?;
        products.extend(generate_products(GENERATED_IDS, seed));
        tracing::debug!(count = products.len(), seed, "catalog loaded");
        Ok(Self::new(products))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look a product up by id.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Like [`Catalog::find`], but a miss is an error.
    pub fn get(&self, id: &str) -> Result<&Product, CommerceError> {
        self.find(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Unique brands, sorted.
    pub fn brands(&self) -> Vec<&str> {
        unique_sorted(self.products.iter().map(|p| p.brand.as_str()))
    }

    /// Unique categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        unique_sorted(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Highest effective price in the catalog.
    pub fn max_price(&self) -> Money {
        self.products
            .iter()
            .map(Product::effective_price)
            .max_by_key(|m| m.amount_minor)
            .unwrap_or_else(|| Money::zero(Currency::INR))
    }

    /// Products sharing `product_id`'s category, excluding it, in catalog
    /// order, at most `limit` of them.
    ///
    /// An unknown id has no related products.
    pub fn related(&self, product_id: &str, limit: usize) -> Vec<&Product> {
        let Some(product) = self.find(product_id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Products flagged for a showcase tab, in catalog order.
    pub fn highlights(&self, tab: Highlight, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| tab.matches(p))
            .take(limit)
            .collect()
    }
}

fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}
