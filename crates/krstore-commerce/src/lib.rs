//! Storefront domain types and logic for krstore.
//!
//! - **Catalog**: products parsed from catalog JSON, brand categories, ratings
//! - **Cart**: the persisted cart state manager and its totals
//! - **Checkout**: order requests and payment links
//! - **Search**: catalog filters
//!
//! # Example
//!
//! ```rust
//! use krstore_commerce::prelude::*;
//!
//! let mut cart = CartManager::open(MemoryCartStore::new());
//! let phone = Product::new(1, "Phone A", Money::new(50000, Currency::USD)).with_stock(2);
//!
//! cart.add_item(&phone).unwrap();
//! cart.update_quantity(&phone.id, 5);
//!
//! let totals = cart.totals().unwrap();
//! assert_eq!(totals.total.display(), "$1000.00");
//! assert_eq!(totals.shipping_label(), "Free");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        build_categories, default_category_rules, parse_catalog, Category, CategoryRule,
        Product, Rating, RatingBook,
    };

    // Cart
    pub use crate::cart::{
        compute_totals, AddOutcome, CartManager, CartState, CartStore, CartTotals,
        KvCartStore, LineItem, MemoryCartStore, QuantityUpdate, ShippingPolicy,
    };

    // Checkout
    pub use crate::checkout::{
        place_order, Customer, OrderReceipt, OrderRequest, PaymentGateway, PaymentLink,
        PaymentMethod, UrlPaymentGateway,
    };

    // Search
    pub use crate::search::{Filter, SearchQuery, SortOption};
}
