//! Product filter specification.

use std::collections::BTreeSet;

use crate::catalog::Product;
use crate::money::Money;
use crate::search::SortOption;
use serde::{Deserialize, Serialize};

/// Upper end of the products page price slider, in rupees.
pub const MAX_PRICE_RUPEES: i64 = 3_000_000;

/// Inclusive effective-price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Money::inr(0),
            max: Money::inr(MAX_PRICE_RUPEES),
        }
    }
}

impl PriceRange {
    pub fn new(min: Money, max: Money) -> Self {
        Self { min, max }
    }

    /// Check if `price` lies within the bounds, ends included.
    pub fn contains(&self, price: &Money) -> bool {
        self.min.amount_minor <= price.amount_minor && price.amount_minor <= self.max.amount_minor
    }
}

/// Search, facet, price and sort parameters for one catalog query.
///
/// Empty brand or category sets accept every product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against name, brand and description.
    pub search: String,
    pub brands: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub price_range: PriceRange,
    pub sort: SortOption,
}

impl FilterSpec {
    /// A spec that accepts everything, sorted featured-first.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brands.insert(brand.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Flip a brand checkbox.
    pub fn toggle_brand(&mut self, brand: &str) {
        if !self.brands.remove(brand) {
            self.brands.insert(brand.to_string());
        }
    }

    /// Flip a category checkbox.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_string());
        }
    }

    /// Back to the unfiltered, featured-first view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check whether any narrowing filter is set.
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty()
            || !self.brands.is_empty()
            || !self.categories.is_empty()
            || self.price_range != PriceRange::default()
    }

    pub(crate) fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.brand.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    pub(crate) fn matches_brand(&self, product: &Product) -> bool {
        self.brands.is_empty() || self.brands.contains(&product.brand)
    }

    pub(crate) fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    pub(crate) fn matches_price(&self, product: &Product) -> bool {
        self.price_range.contains(&product.effective_price())
    }

    /// Check a product against every filter stage.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.matches_brand(product)
            && self.matches_category(product)
            && self.matches_price(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bike(name: &str, brand: &str, category: &str, rupees: i64) -> Product {
        Product::new("1", name, brand, category, Money::inr(rupees))
    }

    #[test]
    fn test_default_range() {
        let range = PriceRange::default();
        assert!(range.contains(&Money::inr(0)));
        assert!(range.contains(&Money::inr(3_000_000)));
        assert!(!range.contains(&Money::inr(3_000_001)));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let p = bike("Ninja ZX-10R", "Kawasaki", "Sport", 1_580_000)
            .with_description("Track-focused superbike");
        assert!(FilterSpec::new().with_search("ninja").matches(&p));
        assert!(FilterSpec::new().with_search("KAWA").matches(&p));
        assert!(FilterSpec::new().with_search("superbike").matches(&p));
        assert!(!FilterSpec::new().with_search("ducati").matches(&p));
    }

    #[test]
    fn test_facets_accept_all_when_empty() {
        let p = bike("Monster", "Ducati", "Naked", 1_200_000);
        assert!(FilterSpec::new().matches(&p));
        assert!(FilterSpec::new().with_brand("Ducati").with_brand("BMW").matches(&p));
        assert!(!FilterSpec::new().with_brand("BMW").matches(&p));
        assert!(!FilterSpec::new().with_category("Sport").matches(&p));
    }

    #[test]
    fn test_price_uses_effective_price() {
        let p = bike("Panigale V4", "Ducati", "Sport", 2_350_000).with_sale_price(Money::inr(2_200_000));
        let spec = FilterSpec::new().with_price_range(Money::inr(0), Money::inr(2_200_000));
        assert!(spec.matches(&p));
        let spec = FilterSpec::new().with_price_range(Money::inr(0), Money::inr(2_199_999));
        assert!(!spec.matches(&p));
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut spec = FilterSpec::new();
        assert!(!spec.is_filtered());

        spec.toggle_brand("BMW");
        spec.toggle_category("Sport");
        assert!(spec.brands.contains("BMW"));
        assert!(spec.is_filtered());

        spec.toggle_brand("BMW");
        assert!(spec.brands.is_empty());

        spec.sort = SortOption::Rating;
        spec.reset();
        assert_eq!(spec, FilterSpec::default());
    }
}
