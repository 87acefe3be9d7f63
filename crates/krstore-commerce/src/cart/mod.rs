//! Shopping cart module.
//!
//! Contains the cart state, pricing, the persistence seam and the manager
//! that ties them together.

mod cart;
mod manager;
mod pricing;
mod store;

pub use cart::{AddOutcome, CartState, LineItem, QuantityUpdate};
pub use manager::CartManager;
pub use pricing::{compute_totals, compute_totals_with, CartTotals, LineTotal, ShippingPolicy};
pub use store::{CartStore, KvCartStore, MemoryCartStore, CART_KEY};
