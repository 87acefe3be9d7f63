//! Cart state manager: owns the cart and writes it through to a store.

use crate::cart::{
    compute_totals, AddOutcome, CartState, CartStore, CartTotals, QuantityUpdate,
};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// Single owner of the cart.
///
/// Every successful mutation is persisted immediately. A failed write is
/// logged and kept in [`CartManager::last_persist_error`]; the in-memory
/// cart stays authoritative for the rest of the session.
///
/// # Example
///
/// ```
/// use krstore_commerce::prelude::*;
///
/// let mut cart = CartManager::open(MemoryCartStore::new());
/// let phone = Product::new(1, "Phone A", Money::new(50000, Currency::USD)).with_stock(2);
///
/// cart.add_item(&phone).unwrap();
/// cart.add_item(&phone).unwrap();
/// assert!(cart.add_item(&phone).unwrap_err().is_stock_exceeded());
/// assert_eq!(cart.totals().unwrap().subtotal.amount_cents, 100000);
/// ```
#[derive(Debug)]
pub struct CartManager<S: CartStore> {
    state: CartState,
    store: S,
    last_persist_error: Option<CommerceError>,
}

impl<S: CartStore> CartManager<S> {
    /// Load the cart from `store`, totalling in USD.
    pub fn open(store: S) -> Self {
        Self::open_with_currency(store, Currency::default())
    }

    /// Load the cart from `store`.
    ///
    /// Missing or unreadable state yields an empty cart; this never fails.
    pub fn open_with_currency(store: S, currency: Currency) -> Self {
        let state = match store.load() {
            Ok(Some(items)) => {
                let (state, repairs) = CartState::from_items(items, currency);
                if repairs > 0 {
                    tracing::warn!(repairs, "repaired persisted cart items");
                }
                tracing::debug!(items = state.unique_item_count(), "loaded cart");
                state
            }
            Ok(None) => CartState::with_currency(currency),
            Err(e) => {
                tracing::warn!(error = %e, "falling back to empty cart");
                CartState::with_currency(currency)
            }
        };

        Self {
            state,
            store,
            last_persist_error: None,
        }
    }

    /// Add one unit of `product`.
    ///
    /// Returns [`CommerceError::StockExceeded`] when the line is already at
    /// its stock limit; the cart is unchanged in that case.
    pub fn add_item(&mut self, product: &Product) -> Result<AddOutcome, CommerceError> {
        let outcome = self.state.add_item(product).map_err(|e| {
            tracing::debug!(product_id = %product.id, error = %e, "add rejected");
            e
        })?;
        tracing::debug!(product_id = %product.id, ?outcome, "added to cart");
        self.persist();
        Ok(outcome)
    }

    /// Set a line's quantity, capped at its stock limit.
    ///
    /// Quantities below 1 and unknown products are silent no-ops.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> QuantityUpdate {
        let update = self.state.update_quantity(product_id, quantity);
        if update.changed() {
            tracing::debug!(product_id = %product_id, ?update, "updated quantity");
            self.persist();
        }
        update
    }

    /// Remove a line. Removing an absent product is a no-op.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let removed = self.state.remove_item(product_id);
        if removed {
            tracing::debug!(product_id = %product_id, "removed from cart");
            self.persist();
        }
        removed
    }

    /// Empty the cart (used after an order is placed).
    pub fn clear(&mut self) {
        if self.state.clear() {
            tracing::debug!("cleared cart");
            self.persist();
        }
    }

    /// Current totals.
    pub fn totals(&self) -> Result<CartTotals, CommerceError> {
        compute_totals(&self.state)
    }

    /// Read-only view of the cart.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Badge count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }

    /// The most recent persistence failure, cleared by the next successful write.
    pub fn last_persist_error(&self) -> Option<&CommerceError> {
        self.last_persist_error.as_ref()
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        match self.store.save(self.state.items()) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                tracing::warn!(error = %e, "cart not persisted; keeping in-memory state");
                self.last_persist_error = Some(e);
            }
        }
    }
}
