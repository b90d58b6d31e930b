//! Product record and stock display policy.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Below this many units a product shows "Only N left in stock".
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Most units the product page offers in its quantity picker.
pub const MAX_QUANTITY_CHOICE: u32 = 5;

/// Technical specification sheet shown on the product page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpecs {
    pub engine: String,
    pub power: String,
    pub torque: String,
    pub transmission: String,
    pub weight: String,
    pub top_speed: String,
    pub fuel_capacity: String,
    pub mileage: String,
    pub abs: bool,
}

/// A motorcycle in the catalog.
///
/// Products are immutable once loaded; the cart embeds a full copy of the
/// record in each line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Base price, stored as a number of rupees.
    #[serde(with = "crate::money::rupees")]
    pub price: Money,
    /// Average rating, 0-5.
    pub rating: f32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub specs: ProductSpecs,
    /// Available colors, never empty for catalog entries.
    pub colors: Vec<String>,
    /// Units in stock.
    pub stock: u32,
    pub featured: bool,
    /// Marked as a new arrival.
    #[serde(rename = "new")]
    pub is_new: bool,
    pub on_sale: bool,
    /// Discounted price, meaningful only while `on_sale` is set.
    #[serde(
        default,
        with = "crate::money::rupees::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_price: Option<Money>,
}

impl Product {
    /// Create a product with the required fields; everything else defaults.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        brand: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            description: String::new(),
            price,
            rating: 0.0,
            image: String::new(),
            gallery: Vec::new(),
            specs: ProductSpecs::default(),
            colors: vec!["Black".to_string()],
            stock: 1,
            featured: false,
            is_new: false,
            on_sale: false,
            sale_price: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating.clamp(0.0, 5.0);
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Put the product on sale at `sale_price`.
    pub fn with_sale_price(mut self, sale_price: Money) -> Self {
        self.on_sale = true;
        self.sale_price = Some(sale_price);
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn new_arrival(mut self) -> Self {
        self.is_new = true;
        self
    }

    /// The price a shopper actually pays.
    ///
    /// The sale price applies only while the product is on sale and the
    /// sale price is set to a non-zero amount.
    pub fn effective_price(&self) -> Money {
        match self.sale_price {
            Some(sale) if self.on_sale && !sale.is_zero() => sale,
            _ => self.price,
        }
    }

    /// Amount saved against the base price, if discounted.
    pub fn savings(&self) -> Option<Money> {
        let effective = self.effective_price();
        (effective != self.price)
            .then(|| Money::new(self.price.amount_minor - effective.amount_minor, self.price.currency))
    }

    /// Color preselected on the product page.
    pub fn default_color(&self) -> &str {
        self.colors.first().map(String::as_str).unwrap_or("Default")
    }

    /// Check whether `color` is one of the product's colors.
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Check if the product can be added to the cart.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Check if fewer than [`LOW_STOCK_THRESHOLD`] units remain.
    pub fn low_stock(&self) -> bool {
        matches!(self.stock_status(), StockStatus::LowStock(_))
    }

    pub fn stock_status(&self) -> StockStatus {
        match self.stock {
            0 => StockStatus::OutOfStock,
            n if n < LOW_STOCK_THRESHOLD => StockStatus::LowStock(n),
            _ => StockStatus::InStock,
        }
    }

    /// Largest quantity the product page lets a shopper pick.
    pub fn max_order_quantity(&self) -> u32 {
        self.stock.min(MAX_QUANTITY_CHOICE)
    }
}

/// Stock label shown next to the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    /// Fewer than [`LOW_STOCK_THRESHOLD`] units remain.
    LowStock(u32),
    OutOfStock,
}

impl StockStatus {
    pub fn message(&self) -> String {
        match self {
            StockStatus::InStock => "In stock".to_string(),
            StockStatus::LowStock(n) => format!("Only {} left in stock", n),
            StockStatus::OutOfStock => "Out of stock".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bike() -> Product {
        Product::new("1", "Ninja ZX-10R", "Kawasaki", "Sport", Money::inr(1_580_000))
    }

    #[test]
    fn test_effective_price_base() {
        assert_eq!(bike().effective_price(), Money::inr(1_580_000));
        assert_eq!(bike().savings(), None);
    }

    #[test]
    fn test_effective_price_on_sale() {
        let p = bike().with_sale_price(Money::inr(1_500_000));
        assert_eq!(p.effective_price(), Money::inr(1_500_000));
        assert_eq!(p.savings(), Some(Money::inr(80_000)));
    }

    #[test]
    fn test_sale_price_ignored_when_not_on_sale() {
        let mut p = bike().with_sale_price(Money::inr(1_500_000));
        p.on_sale = false;
        assert_eq!(p.effective_price(), Money::inr(1_580_000));
    }

    #[test]
    fn test_on_sale_without_price_uses_base() {
        let mut p = bike();
        p.on_sale = true;
        assert_eq!(p.effective_price(), Money::inr(1_580_000));

        p.sale_price = Some(Money::inr(0));
        assert_eq!(p.effective_price(), Money::inr(1_580_000));
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(bike().with_stock(0).stock_status(), StockStatus::OutOfStock);
        assert_eq!(bike().with_stock(3).stock_status(), StockStatus::LowStock(3));
        assert_eq!(bike().with_stock(5).stock_status(), StockStatus::InStock);
        assert_eq!(StockStatus::LowStock(2).message(), "Only 2 left in stock");
        assert!(bike().with_stock(4).low_stock());
        assert!(!bike().with_stock(0).low_stock());
    }

    #[test]
    fn test_max_order_quantity() {
        assert_eq!(bike().with_stock(2).max_order_quantity(), 2);
        assert_eq!(bike().with_stock(40).max_order_quantity(), 5);
        assert!(!bike().with_stock(0).in_stock());
    }

    #[test]
    fn test_colors() {
        let p = bike().with_colors(["Green", "Black"]);
        assert_eq!(p.default_color(), "Green");
        assert!(p.offers_color("Black"));
        assert!(!p.offers_color("Pink"));
    }

    #[test]
    fn test_json_field_names() {
        let p = bike().with_sale_price(Money::inr(1_500_000)).new_arrival();
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["new"], true);
        assert_eq!(json["onSale"], true);
        assert_eq!(json["price"], 1_580_000);
        assert_eq!(json["salePrice"], 1_500_000);
        assert!(json["specs"].get("topSpeed").is_some());
    }
}
