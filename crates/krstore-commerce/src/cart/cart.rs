//! Cart state and line item types.
//!
//! [`CartState`] is plain in-memory data with the stock rules applied on
//! every mutation. Persistence lives one layer up in
//! [`crate::cart::CartManager`].

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One product-and-quantity entry in the cart.
///
/// `quantity` is always at least 1 and never above `stock_limit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product this line is for; unique within a cart.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price captured at add-time.
    pub unit_price: Money,
    /// Stock captured at add-time; `None` means unlimited.
    pub stock_limit: Option<u32>,
    /// Quantity.
    pub quantity: u32,
    /// Primary image (denormalized for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    /// Create a line item with quantity 1 from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            stock_limit: product.stock_limit(),
            quantity: 1,
            image: product.primary_image().map(str::to_string),
        }
    }

    /// Whether one more unit fits under the stock limit.
    pub fn can_increment(&self) -> bool {
        self.stock_limit.map_or(true, |limit| self.quantity < limit)
    }

    /// Cap a requested quantity to the stock limit.
    pub fn clamp(&self, requested: u32) -> u32 {
        self.stock_limit.map_or(requested, |limit| requested.min(limit))
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }
}

/// Result of a successful add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line item was created with quantity 1.
    Added,
    /// An existing line item was incremented to `quantity`.
    Incremented { quantity: u32 },
}

/// Result of a quantity update. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// Requested quantity was below 1; nothing changed.
    Ignored,
    /// No line item for the product; nothing changed.
    NotInCart,
    /// Quantity already had the requested value.
    Unchanged,
    /// Quantity set as requested.
    Set(u32),
    /// Request exceeded the stock limit and was capped.
    Clamped { requested: i64, applied: u32 },
}

impl QuantityUpdate {
    /// Whether the cart was modified.
    pub fn changed(&self) -> bool {
        matches!(self, QuantityUpdate::Set(_) | QuantityUpdate::Clamped { .. })
    }
}

/// Ordered collection of line items keyed by product.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    items: Vec<LineItem>,
    currency: Currency,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart that totals in `currency`.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Rebuild a cart from persisted items, repairing anything that breaks
    /// the cart invariants.
    ///
    /// Duplicate products keep their first line, zero quantities and lines
    /// priced in another currency are dropped, quantities above the stock
    /// limit are capped. Returns the cart and the number of repairs made.
    pub fn from_items(items: Vec<LineItem>, currency: Currency) -> (Self, usize) {
        let mut cart = Self::with_currency(currency);
        let mut repairs = 0;
        for mut item in items {
            if item.quantity == 0
                || item.unit_price.currency != currency
                || cart.contains(&item.product_id)
            {
                repairs += 1;
                continue;
            }
            let capped = item.clamp(item.quantity);
            if capped != item.quantity {
                item.quantity = capped;
                repairs += 1;
            }
            cart.items.push(item);
        }
        (cart, repairs)
    }

    /// Add one unit of `product`.
    ///
    /// A new product gets a line with quantity 1. An existing line grows by
    /// one unless it already sits at its stock limit, in which case the cart
    /// is left unchanged and [`CommerceError::StockExceeded`] is returned.
    /// A product priced in another currency is rejected with
    /// [`CommerceError::CurrencyMismatch`].
    pub fn add_item(&mut self, product: &Product) -> Result<AddOutcome, CommerceError> {
        if product.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            if let Some(limit) = existing.stock_limit {
                if existing.quantity >= limit {
                    return Err(CommerceError::StockExceeded {
                        product_id: existing.product_id.to_string(),
                        name: existing.name.clone(),
                        limit,
                    });
                }
            }
            existing.quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;
            return Ok(AddOutcome::Incremented {
                quantity: existing.quantity,
            });
        }

        self.items.push(LineItem::from_product(product));
        Ok(AddOutcome::Added)
    }

    /// Set the quantity of an existing line.
    ///
    /// Below 1 is ignored (removal goes through [`CartState::remove_item`]);
    /// above the stock limit is capped.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> QuantityUpdate {
        if quantity < 1 {
            return QuantityUpdate::Ignored;
        }
        let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) else {
            return QuantityUpdate::NotInCart;
        };

        let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
        let applied = item.clamp(requested);
        if applied == item.quantity {
            return QuantityUpdate::Unchanged;
        }
        item.quantity = applied;

        if i64::from(applied) < quantity {
            QuantityUpdate::Clamped {
                requested: quantity,
                applied,
            }
        } else {
            QuantityUpdate::Set(applied)
        }
    }

    /// Remove the line for a product. Returns whether one was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        self.items.len() < len_before
    }

    /// Remove every line. Returns whether anything was removed.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        self.items.clear();
        had_items
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Currency totals are computed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Get the line for a product.
    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Whether the product has a line.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get_item(product_id).is_some()
    }

    /// Total item count (sum of quantities), shown on the cart badge.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct products.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `sum(unit_price * quantity)`.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.items.iter().try_fold(Money::zero(self.currency), |acc, item| {
            let line = item.line_total()?;
            if line.currency != acc.currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: acc.currency.code().to_string(),
                    got: line.currency.code().to_string(),
                });
            }
            acc.try_add(&line).ok_or(CommerceError::Overflow)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_a() -> Product {
        Product::new(1, "Phone A", Money::from_major(500, Currency::USD).unwrap()).with_stock(2)
    }

    #[test]
    fn test_add_twice_then_stock_exceeded() {
        let mut cart = CartState::new();
        assert_eq!(cart.add_item(&phone_a()).unwrap(), AddOutcome::Added);
        assert_eq!(
            cart.add_item(&phone_a()).unwrap(),
            AddOutcome::Incremented { quantity: 2 }
        );
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.subtotal().unwrap(), Money::from_major(1000, Currency::USD).unwrap());

        let err = cart.add_item(&phone_a()).unwrap_err();
        assert!(err.is_stock_exceeded());
        assert_eq!(cart.get_item(&ProductId::from(1)).unwrap().quantity, 2);
    }

    #[test]
    fn test_unlimited_stock() {
        let mut cart = CartState::new();
        let product = Product::new(5, "Cable", Money::new(300, Currency::USD));
        for _ in 0..50 {
            cart.add_item(&product).unwrap();
        }
        assert_eq!(cart.item_count(), 50);
        assert_eq!(cart.get_item(&product.id).unwrap().stock_limit, None);
    }

    #[test]
    fn test_zero_stock_is_unlimited() {
        let mut cart = CartState::new();
        let product = Product::new(6, "Case", Money::new(300, Currency::USD)).with_stock(0);
        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_clamps_to_stock() {
        let mut cart = CartState::new();
        let product = Product::new(2, "Phone B", Money::from_major(100, Currency::USD).unwrap()).with_stock(1);
        cart.add_item(&product).unwrap();

        let result = cart.update_quantity(&product.id, 5);
        assert_eq!(result, QuantityUpdate::Unchanged);
        assert_eq!(cart.get_item(&product.id).unwrap().quantity, 1);

        let mut cart = CartState::new();
        cart.add_item(&phone_a()).unwrap();
        assert_eq!(
            cart.update_quantity(&ProductId::from(1), 9),
            QuantityUpdate::Clamped { requested: 9, applied: 2 }
        );
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_below_one_ignored() {
        let mut cart = CartState::new();
        cart.add_item(&phone_a()).unwrap();
        cart.add_item(&phone_a()).unwrap();

        for q in [0, -1, i64::MIN] {
            assert_eq!(cart.update_quantity(&ProductId::from(1), q), QuantityUpdate::Ignored);
        }
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_update_sets_quantity() {
        let mut cart = CartState::new();
        cart.add_item(&phone_a()).unwrap();
        cart.add_item(&phone_a()).unwrap();
        assert_eq!(cart.update_quantity(&ProductId::from(1), 1), QuantityUpdate::Set(1));
        assert!(cart.update_quantity(&ProductId::from(1), 1) == QuantityUpdate::Unchanged);
    }

    #[test]
    fn test_update_missing_item() {
        let mut cart = CartState::new();
        assert_eq!(cart.update_quantity(&ProductId::from(3), 2), QuantityUpdate::NotInCart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartState::new();
        cart.add_item(&phone_a()).unwrap();
        assert!(cart.remove_item(&ProductId::from(1)));
        assert!(!cart.remove_item(&ProductId::from(1)));
        assert!(!cart.remove_item(&ProductId::from(99)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_from_items_repairs() {
        let mut over = LineItem::from_product(&phone_a());
        over.quantity = 7;
        let mut zero = LineItem::from_product(&Product::new(2, "Zero", Money::new(1, Currency::USD)));
        zero.quantity = 0;
        let dup = LineItem::from_product(&phone_a());

        let (cart, repairs) = CartState::from_items(vec![over, zero, dup], Currency::USD);
        assert_eq!(repairs, 3);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_line_item_json_shape() {
        let item = LineItem::from_product(&phone_a());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["productId"], "1");
        assert_eq!(json["stockLimit"], 2);
        assert_eq!(json["quantity"], 1);
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_add_rejects_other_currency() {
        let mut cart = CartState::with_currency(Currency::USD);
        cart.add_item(&phone_a()).unwrap();

        let err = cart
            .add_item(&Product::new(9, "Euro thing", Money::new(100, Currency::EUR)))
            .unwrap_err();
        assert!(matches!(err, CommerceError::CurrencyMismatch { .. }));
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.subtotal().unwrap(), Money::from_major(500, Currency::USD).unwrap());
    }

    #[test]
    fn test_from_items_drops_other_currency() {
        let usd = LineItem::from_product(&phone_a());
        let eur = LineItem::from_product(&Product::new(2, "Euro thing", Money::new(100, Currency::EUR)));

        let (cart, repairs) = CartState::from_items(vec![usd, eur], Currency::EUR);
        assert_eq!(repairs, 1);
        assert_eq!(cart.items()[0].product_id.as_str(), "2");
        assert_eq!(cart.subtotal().unwrap().amount_cents, 100);
    }

    #[test]
    fn test_add_at_max_quantity_overflows() {
        let cable = Product::new(5, "Cable", Money::new(300, Currency::USD));
        let mut item = LineItem::from_product(&cable);
        item.quantity = u32::MAX;
        let (mut cart, _) = CartState::from_items(vec![item], Currency::USD);

        assert!(matches!(cart.add_item(&cable), Err(CommerceError::Overflow)));
        assert_eq!(cart.get_item(&cable.id).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_stock_exceeded_reports_limit() {
        let mut cart = CartState::new();
        cart.add_item(&phone_a()).unwrap();
        cart.add_item(&phone_a()).unwrap();
        match cart.add_item(&phone_a()) {
            Err(CommerceError::StockExceeded { limit, .. }) => assert_eq!(limit, 2),
            other => panic!("unexpected {:?}", other),
        }
    }
}
