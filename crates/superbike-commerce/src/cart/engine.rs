//! Persistent cart session.

use superbike_cache::{Cache, KeyValueStore};

use crate::cart::{reduce, CartCommand, CartNotice, CartState};
use crate::catalog::Product;
use crate::error::CommerceError;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Result of dispatching a command.
#[derive(Debug, Clone)]
pub struct CartOutcome<'a> {
    /// The cart after the command.
    pub state: &'a CartState,
    /// Confirmation to show the shopper, if the command has one.
    pub notice: Option<CartNotice>,
}

/// Owns the current cart and mirrors every change to a store.
///
/// Commands are applied through [`reduce`]; after each one the whole state
/// is written under [`CART_STORAGE_KEY`]. Storage failures never fail a
/// command: the in-memory cart stays authoritative for the session.
#[derive(Debug)]
pub struct CartEngine<S> {
    cache: Cache<S>,
    state: CartState,
}

impl<S: KeyValueStore> CartEngine<S> {
    /// Restore the cart from `store`.
    ///
    /// A missing key, an unreadable store, or a value that does not parse
    /// all yield an empty cart.
    pub fn load(store: S) -> Self {
        let cache = Cache::new(store);
        let state = match cache.get::<CartState>(CART_STORAGE_KEY) {
            Ok(Some(stored)) => {
                let state = stored.normalized();
                tracing::debug!(lines = state.line_count(), "restored cart");
                state
            }
            Ok(None) => CartState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable stored cart");
                CartState::default()
            }
        };
        Self { cache, state }
    }

    /// The current cart.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Apply `command`, persist the result, and report what happened.
    pub fn dispatch(&mut self, command: CartCommand) -> CartOutcome<'_> {
        let notice = command.notice();
        let name = command.name();
        self.state = reduce(&self.state, command);
        tracing::debug!(
            command = name,
            total_items = self.state.total_items,
            "cart updated"
        );
        self.persist();
        CartOutcome {
            state: &self.state,
            notice,
        }
    }

    /// Add `quantity` of `product` in `color`.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i64,
        color: &str,
    ) -> Result<CartOutcome<'_>, CommerceError> {
        let command = CartCommand::add_item(product.clone(), quantity, color)?;
        Ok(self.dispatch(command))
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CartOutcome<'_> {
        self.dispatch(CartCommand::update_quantity(product_id, quantity))
    }

    pub fn remove_item(&mut self, product_id: &str) -> CartOutcome<'_> {
        self.dispatch(CartCommand::remove_item(product_id))
    }

    pub fn clear(&mut self) -> CartOutcome<'_> {
        self.dispatch(CartCommand::ClearCart)
    }

    /// Write the current cart to the store.
    pub fn save(&self) -> Result<(), CommerceError> {
        self.cache.set(CART_STORAGE_KEY, &self.state)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }

    /// Borrow the backing store.
    pub fn store(&self) -> &S {
        self.cache.store()
    }

    /// Give the backing store back.
    pub fn into_store(self) -> S {
        self.cache.into_store()
    }
}
