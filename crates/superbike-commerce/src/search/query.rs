//! Sorting and the query pipeline.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Product;
use crate::search::{FilterSpec, QueryResults};
use serde::{Deserialize, Serialize};

/// Sort options for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Effective price, low to high.
    PriceLow,
    /// Effective price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// New arrivals first.
    Newest,
    /// Featured products first.
    #[default]
    Featured,
}

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Featured,
        SortOption::PriceLow,
        SortOption::PriceHigh,
        SortOption::Rating,
        SortOption::Newest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
            SortOption::Newest => "newest",
            SortOption::Featured => "featured",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Rating",
            SortOption::Newest => "Newest",
            SortOption::Featured => "Featured",
        }
    }

    /// Parse a wire name; anything unrecognised sorts featured-first.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "price-low" => SortOption::PriceLow,
            "price-high" => SortOption::PriceHigh,
            "rating" => SortOption::Rating,
            "newest" => SortOption::Newest,
            _ => SortOption::Featured,
        }
    }

    /// Order `products` in place. Equal keys keep their relative order.
    pub fn sort(&self, products: &mut Vec<&Product>) {
        match self {
            SortOption::PriceLow => {
                products.sort_by_key(|p| p.effective_price().amount_minor);
            }
            SortOption::PriceHigh => {
                products.sort_by(|a, b| {
                    b.effective_price()
                        .amount_minor
                        .cmp(&a.effective_price().amount_minor)
                });
            }
            SortOption::Rating => {
                products.sort_by(|a, b| b.rating.total_cmp(&a.rating));
            }
            SortOption::Newest => partition_first(products, |p| p.is_new),
            SortOption::Featured => partition_first(products, |p| p.featured),
        }
    }
}

/// Move every product satisfying `pred` ahead of the rest, keeping order
/// within both groups.
fn partition_first(products: &mut Vec<&Product>, pred: impl Fn(&Product) -> bool) {
    let (mut first, rest): (Vec<&Product>, Vec<&Product>) =
        products.iter().copied().partition(|p| pred(p));
    first.extend(rest);
    *products = first;
}

impl FromStr for SortOption {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortOption::parse_lenient(s))
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FilterSpec {
    /// Run the filter stages in order, then sort.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut visible: Vec<&Product> = products
            .iter()
            .filter(|p| self.matches_search(p))
            .filter(|p| self.matches_brand(p))
            .filter(|p| self.matches_category(p))
            .filter(|p| self.matches_price(p))
            .collect();
        self.sort.sort(&mut visible);
        tracing::debug!(
            total = products.len(),
            visible = visible.len(),
            sort = self.sort.as_str(),
            "catalog query"
        );
        visible
    }

    /// Like [`FilterSpec::apply`], wrapped with the result count.
    pub fn query<'a>(&self, products: &'a [Product]) -> QueryResults<'a> {
        QueryResults::new(self.apply(products), products.len())
    }
}
