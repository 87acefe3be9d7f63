//! Cart pricing calculations.

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Shipping rule applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShippingPolicy {
    /// Shipping is always free.
    #[default]
    Free,
}

impl ShippingPolicy {
    /// Shipping charge for a subtotal.
    pub fn charge(&self, subtotal: &Money) -> Money {
        match self {
            ShippingPolicy::Free => Money::zero(subtotal.currency),
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Final total (subtotal + shipping).
    pub total: Money,
    /// Sum of quantities.
    pub item_count: u64,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    /// Label for the shipping row.
    pub fn shipping_label(&self) -> String {
        if self.shipping.is_zero() {
            "Free".to_string()
        } else {
            self.shipping.display()
        }
    }
}

/// Pricing for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    /// Product the line is for.
    pub product_id: ProductId,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub total: Money,
}

/// Compute `{subtotal, shipping, total}` for a cart.
///
/// Pure: reads the cart only, so repeated calls on the same state agree.
pub fn compute_totals(cart: &CartState) -> Result<CartTotals, CommerceError> {
    compute_totals_with(cart, ShippingPolicy::default())
}

/// Compute totals under an explicit shipping policy.
pub fn compute_totals_with(
    cart: &CartState,
    shipping: ShippingPolicy,
) -> Result<CartTotals, CommerceError> {
    let lines = cart
        .items()
        .iter()
        .map(|item| {
            Ok(LineTotal {
                product_id: item.product_id.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                total: item.line_total()?,
            })
        })
        .collect::<Result<Vec<_>, CommerceError>>()?;

    let subtotal = cart.subtotal()?;
    let shipping = shipping.charge(&subtotal);
    let total = subtotal.try_add(&shipping).ok_or(CommerceError::Overflow)?;

    Ok(CartTotals {
        subtotal,
        shipping,
        total,
        item_count: cart.item_count(),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Currency;

    fn cart() -> CartState {
        let mut cart = CartState::new();
        let a = Product::new(1, "Product A", Money::new(1000, Currency::USD)).with_stock(5);
        let b = Product::new(2, "Product B", Money::new(2000, Currency::USD));
        cart.add_item(&a).unwrap();
        cart.add_item(&a).unwrap();
        cart.add_item(&b).unwrap();
        cart
    }

    #[test]
    fn test_totals() {
        let totals = compute_totals(&cart()).unwrap();
        assert_eq!(totals.subtotal.amount_cents, 4000); // 2*1000 + 1*2000
        assert!(totals.shipping.is_zero());
        assert_eq!(totals.total.amount_cents, 4000);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.lines[0].total.amount_cents, 2000);
        assert_eq!(totals.shipping_label(), "Free");
    }

    #[test]
    fn test_totals_are_pure() {
        let cart = cart();
        let before = cart.clone();
        let first = compute_totals(&cart).unwrap();
        let second = compute_totals(&cart).unwrap();
        assert_eq!(first, second);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_empty_cart_totals() {
        let totals = compute_totals(&CartState::new()).unwrap();
        assert!(totals.total.is_zero());
        assert!(totals.lines.is_empty());
    }
}
