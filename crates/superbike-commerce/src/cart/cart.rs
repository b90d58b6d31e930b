//! Cart state, commands and the pure reducer.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The cart prices everything in rupees; products in other currencies
/// cannot be added.
pub const CART_CURRENCY: Currency = Currency::INR;

/// One (product, color) pairing in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Snapshot of the product when it was added.
    pub product: Product,
    /// Always at least 1.
    pub quantity: i64,
    /// Chosen color.
    pub color: String,
}

impl CartLineItem {
    /// Effective unit price of the product.
    pub fn unit_price(&self) -> Money {
        self.product.effective_price()
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price().saturating_mul(self.quantity)
    }

    fn is_line(&self, product_id: &ProductId, color: &str) -> bool {
        &self.product.id == product_id && self.color == color
    }
}

/// The cart: line items in insertion order plus derived totals.
///
/// `total_items` and `subtotal` are only ever produced by
/// [`CartState::from_items`], so they always match `items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    pub items: Vec<CartLineItem>,
    /// Sum of line quantities.
    pub total_items: i64,
    /// Sum of effective unit price times quantity, stored in rupees.
    #[serde(with = "crate::money::rupees")]
    pub subtotal: Money,
}

impl Default for CartState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            subtotal: Money::zero(CART_CURRENCY),
        }
    }
}

impl CartState {
    /// Build a state from line items, deriving the totals.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let (total_items, subtotal) = compute_totals(&items);
        Self {
            items,
            total_items,
            subtotal,
        }
    }

    /// Repair a state read from storage: quantities below 1 become 1 and
    /// the totals are recomputed.
    pub fn normalized(self) -> Self {
        let items = self
            .items
            .into_iter()
            .map(|mut item| {
                item.quantity = item.quantity.max(1);
                item
            })
            .collect();
        Self::from_items(items)
    }

    /// Check whether the derived totals agree with the line items.
    pub fn is_consistent(&self) -> bool {
        let (total_items, subtotal) = compute_totals(&self.items);
        self.total_items == total_items && self.subtotal == subtotal
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Find the line for a (product, color) pair.
    pub fn find_line(&self, product_id: &str, color: &str) -> Option<&CartLineItem> {
        self.items
            .iter()
            .find(|i| i.product.id.as_str() == product_id && i.color == color)
    }

    /// Total quantity of a product across all colors.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .filter(|i| i.product.id.as_str() == product_id)
            .map(|i| i.quantity)
            .sum()
    }
}

/// Recompute `(total_items, subtotal)` from scratch.
pub fn compute_totals(items: &[CartLineItem]) -> (i64, Money) {
    let total_items = items
        .iter()
        .fold(0_i64, |acc, i| acc.saturating_add(i.quantity));
    let subtotal = items
        .iter()
        .fold(Money::zero(CART_CURRENCY), |acc, i| acc.saturating_add(&i.line_total()));
    (total_items, subtotal)
}

/// A request to change the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add `quantity` units of `product` in `color`, merging with an
    /// existing line for the same pair.
    AddItem {
        product: Product,
        quantity: i64,
        color: String,
    },
    /// Set the quantity of the first line for `product_id`, floored at 1.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    /// Drop every line for `product_id`, whatever its color.
    RemoveItem { product_id: ProductId },
    /// Empty the cart.
    ClearCart,
}

impl CartCommand {
    /// Build an `AddItem`, rejecting non-positive quantities and products
    /// not priced in [`CART_CURRENCY`].
    pub fn add_item(
        product: Product,
        quantity: i64,
        color: impl Into<String>,
    ) -> Result<Self, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if let Some(got) = foreign_currency(&product) {
            return Err(CommerceError::CurrencyMismatch {
                expected: CART_CURRENCY.to_string(),
                got: got.to_string(),
            });
        }
        Ok(CartCommand::AddItem {
            product,
            quantity,
            color: color.into(),
        })
    }

    pub fn update_quantity(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        CartCommand::UpdateQuantity {
            product_id: product_id.into(),
            quantity,
        }
    }

    pub fn remove_item(product_id: impl Into<ProductId>) -> Self {
        CartCommand::RemoveItem {
            product_id: product_id.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::AddItem { .. } => "add_item",
            CartCommand::UpdateQuantity { .. } => "update_quantity",
            CartCommand::RemoveItem { .. } => "remove_item",
            CartCommand::ClearCart => "clear_cart",
        }
    }

    /// The confirmation a shopper sees after this command, if any.
    pub fn notice(&self) -> Option<CartNotice> {
        match self {
            CartCommand::AddItem { product, .. } => Some(CartNotice::Added {
                product_name: product.name.clone(),
            }),
            CartCommand::UpdateQuantity { .. } => None,
            CartCommand::RemoveItem { .. } => Some(CartNotice::Removed),
            CartCommand::ClearCart => Some(CartNotice::Cleared),
        }
    }
}

/// User-facing confirmation of a cart change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartNotice {
    Added { product_name: String },
    Removed,
    Cleared,
}

impl CartNotice {
    pub fn message(&self) -> String {
        match self {
            CartNotice::Added { product_name } => format!("{} added to cart!", product_name),
            CartNotice::Removed => "Item removed from cart".to_string(),
            CartNotice::Cleared => "Cart cleared".to_string(),
        }
    }
}

/// Apply `command` to `state`, producing the next state.
///
/// Never fails and never touches `state`. Commands that match nothing
/// return an equal state.
pub fn reduce(state: &CartState, command: CartCommand) -> CartState {
    match command {
        CartCommand::AddItem {
            product,
            quantity,
            color,
        } => {
            if quantity < 1 || foreign_currency(&product).is_some() {
                return state.clone();
            }
            let mut items = state.items.clone();
            match items.iter_mut().find(|i| i.is_line(&product.id, &color)) {
                Some(line) => line.quantity = line.quantity.saturating_add(quantity),
                None => items.push(CartLineItem {
                    product,
                    quantity,
                    color,
                }),
            }
            CartState::from_items(items)
        }
        CartCommand::UpdateQuantity {
            product_id,
            quantity,
        } => {
            let mut items = state.items.clone();
            match items.iter_mut().find(|i| i.product.id == product_id) {
                Some(line) => line.quantity = quantity.max(1),
                None => return state.clone(),
            }
            CartState::from_items(items)
        }
        CartCommand::RemoveItem { product_id } => {
            let items = state
                .items
                .iter()
                .filter(|i| i.product.id != product_id)
                .cloned()
                .collect();
            CartState::from_items(items)
        }
        CartCommand::ClearCart => CartState::default(),
    }
}

/// The first price on `product` that is not in [`CART_CURRENCY`].
fn foreign_currency(product: &Product) -> Option<Currency> {
    std::iter::once(product.price)
        .chain(product.sale_price)
        .map(|m| m.currency)
        .find(|c| *c != CART_CURRENCY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ninja() -> Product {
        Product::new("1", "Ninja ZX-10R", "Kawasaki", "Sport", Money::inr(1_580_000))
            .with_colors(["Green", "Black", "Blue"])
    }

    fn panigale() -> Product {
        Product::new("3", "Panigale V4", "Ducati", "Sport", Money::inr(2_350_000))
            .with_colors(["Red", "Black"])
            .with_sale_price(Money::inr(2_200_000))
    }

    fn add(state: &CartState, product: Product, quantity: i64, color: &str) -> CartState {
        reduce(state, CartCommand::add_item(product, quantity, color).unwrap())
    }

    #[test]
    fn test_add_item_appends_line() {
        let state = add(&CartState::default(), ninja(), 2, "Green");
        assert_eq!(state.line_count(), 1);
        assert_eq!(state.total_items, 2);
        assert_eq!(state.subtotal, Money::inr(3_160_000));
    }

    #[test]
    fn test_add_same_pair_merges() {
        let state = add(&CartState::default(), ninja(), 2, "Green");
        let state = add(&state, ninja(), 3, "Green");
        assert_eq!(state.line_count(), 1);
        assert_eq!(state.find_line("1", "Green").unwrap().quantity, 5);

        let state = add(&state, ninja(), 1, "Blue");
        assert_eq!(state.line_count(), 2);
        assert_eq!(state.quantity_of("1"), 6);
        // Insertion order
        assert_eq!(state.items[1].color, "Blue");
    }

    #[test]
    fn test_subtotal_uses_sale_price() {
        let state = add(&CartState::default(), panigale(), 2, "Red");
        assert_eq!(state.subtotal, Money::inr(4_400_000));
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let before = add(&CartState::default(), ninja(), 1, "Green");
        let snapshot = before.clone();
        let after = add(&before, ninja(), 4, "Green");
        assert_eq!(before, snapshot);
        assert_eq!(after.total_items, 5);
    }

    #[test]
    fn test_foreign_currency_never_enters_subtotal() {
        let usd = Money::from_major(100, Currency::USD);
        let import = Product::new("99", "Street Rod", "Harley", "Cruiser", usd);
        assert!(matches!(
            CartCommand::add_item(import.clone(), 3, "Black"),
            Err(CommerceError::CurrencyMismatch { .. })
        ));

        // A hand-built command is ignored rather than summed in the wrong currency
        let state = add(&CartState::default(), ninja(), 1, "Green");
        let state = reduce(
            &state,
            CartCommand::AddItem {
                product: import,
                quantity: 3,
                color: "Black".to_string(),
            },
        );
        assert_eq!(state.total_items, 1);
        assert_eq!(state.subtotal, Money::inr(1_580_000));
        assert!(state.is_consistent());

        let mixed_sale = ninja().with_sale_price(Money::from_major(9, Currency::EUR));
        assert!(CartCommand::add_item(mixed_sale, 1, "Green").is_err());
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        assert!(matches!(
            CartCommand::add_item(ninja(), 0, "Green"),
            Err(CommerceError::InvalidQuantity(0))
        ));

        // Constructed directly, the reducer ignores it
        let state = reduce(
            &CartState::default(),
            CartCommand::AddItem {
                product: ninja(),
                quantity: -2,
                color: "Green".to_string(),
            },
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let state = add(&CartState::default(), ninja(), 3, "Green");

        let zero = reduce(&state, CartCommand::update_quantity("1", 0));
        assert_eq!(zero.items[0].quantity, 1);

        let negative = reduce(&state, CartCommand::update_quantity("1", -5));
        assert_eq!(negative.items[0].quantity, 1);
        assert_eq!(negative.total_items, 1);
        assert_eq!(negative.subtotal, Money::inr(1_580_000));
    }

    #[test]
    fn test_update_quantity_first_matching_line_only() {
        let state = add(&CartState::default(), ninja(), 1, "Green");
        let state = add(&state, ninja(), 1, "Blue");

        let state = reduce(&state, CartCommand::update_quantity("1", 4));
        assert_eq!(state.find_line("1", "Green").unwrap().quantity, 4);
        assert_eq!(state.find_line("1", "Blue").unwrap().quantity, 1);
        assert_eq!(state.total_items, 5);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let state = add(&CartState::default(), ninja(), 1, "Green");
        let after = reduce(&state, CartCommand::update_quantity("404", 9));
        assert_eq!(after, state);
    }

    #[test]
    fn test_remove_drops_all_colors() {
        let state = add(&CartState::default(), ninja(), 1, "Green");
        let state = add(&state, ninja(), 2, "Blue");
        let state = add(&state, panigale(), 1, "Red");

        let state = reduce(&state, CartCommand::remove_item("1"));
        assert_eq!(state.line_count(), 1);
        assert_eq!(state.total_items, 1);
        assert_eq!(state.subtotal, Money::inr(2_200_000));

        let unchanged = reduce(&state, CartCommand::remove_item("404"));
        assert_eq!(unchanged, state);
    }

    #[test]
    fn test_clear_resets_exactly() {
        let state = add(&CartState::default(), ninja(), 3, "Green");
        let state = reduce(&state, CartCommand::ClearCart);
        assert_eq!(state, CartState::default());
        assert_eq!(state.total_items, 0);
        assert!(state.subtotal.is_zero());
    }

    #[test]
    fn test_totals_stay_consistent() {
        let commands = vec![
            CartCommand::add_item(ninja(), 2, "Green").unwrap(),
            CartCommand::add_item(panigale(), 1, "Red").unwrap(),
            CartCommand::update_quantity("3", 7),
            CartCommand::add_item(ninja(), 1, "Black").unwrap(),
            CartCommand::update_quantity("1", -1),
            CartCommand::remove_item("3"),
            CartCommand::ClearCart,
            CartCommand::add_item(panigale(), 2, "Black").unwrap(),
        ];

        let mut state = CartState::default();
        for command in commands {
            state = reduce(&state, command);
            assert!(state.is_consistent(), "drift after {:?}", state);
        }
    }

    #[test]
    fn test_quantity_saturates() {
        let state = add(&CartState::default(), ninja(), i64::MAX, "Green");
        let state = add(&state, ninja(), 10, "Green");
        assert_eq!(state.items[0].quantity, i64::MAX);
        assert!(state.is_consistent());
    }

    #[test]
    fn test_normalized_repairs_stored_state() {
        let mut state = add(&CartState::default(), ninja(), 2, "Green");
        state.items[0].quantity = 0;
        state.total_items = 99;

        let repaired = state.normalized();
        assert_eq!(repaired.items[0].quantity, 1);
        assert_eq!(repaired.total_items, 1);
        assert!(repaired.is_consistent());
    }

    #[test]
    fn test_notices() {
        let add = CartCommand::add_item(ninja(), 1, "Green").unwrap();
        assert_eq!(
            add.notice().unwrap().message(),
            "Ninja ZX-10R added to cart!"
        );
        assert_eq!(CartCommand::update_quantity("1", 2).notice(), None);
        assert_eq!(
            CartCommand::remove_item("1").notice(),
            Some(CartNotice::Removed)
        );
        assert_eq!(CartCommand::ClearCart.notice().unwrap().message(), "Cart cleared");
    }

    #[test]
    fn test_json_layout() {
        let state = add(&CartState::default(), ninja(), 2, "Green");
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("items").is_some());
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["subtotal"], 3_160_000);
        assert_eq!(json["items"][0]["product"]["price"], 1_580_000);
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["items"][0]["color"], "Green");
        assert_eq!(json["items"][0]["product"]["id"], "1");
    }
}
