//! Placing an order from the current cart.

use crate::cart::{CartManager, CartStore};
use crate::checkout::{Customer, OrderReceipt, OrderRequest, PaymentGateway, PaymentMethod};
use crate::error::CommerceError;
use crate::ids::OrderId;

/// Submit the cart as an order and clear it.
///
/// The cart is only cleared once everything else succeeded: an empty cart
/// fails with [`CommerceError::EmptyCart`], and a gateway failure leaves the
/// cart as it was.
pub fn place_order<S: CartStore>(
    cart: &mut CartManager<S>,
    customer: Customer,
    payment_method: PaymentMethod,
    gateway: &dyn PaymentGateway,
) -> Result<OrderReceipt, CommerceError> {
    if cart.state().is_empty() {
        return Err(CommerceError::EmptyCart);
    }

    let totals = cart.totals()?;
    let request = OrderRequest {
        id: OrderId::generate(),
        items: cart.state().items().to_vec(),
        total: totals.total,
        customer,
        payment_method,
    };

    let payment_link = if payment_method.needs_payment_link() {
        Some(gateway.create_payment(&request.total)?)
    } else {
        None
    };

    cart.clear();

    let message = OrderReceipt::confirmation_message(&request);
    tracing::info!(
        order_id = %request.id,
        total = %request.total,
        items = request.item_count(),
        payment = payment_method.as_str(),
        "order placed"
    );

    Ok(OrderReceipt {
        request,
        payment_link,
        placed_at: chrono::Utc::now(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MemoryCartStore;
    use crate::catalog::Product;
    use crate::checkout::{PaymentLink, UrlPaymentGateway};
    use crate::money::{Currency, Money};

    struct DownGateway;

    impl PaymentGateway for DownGateway {
        fn create_payment(&self, _amount: &Money) -> Result<PaymentLink, CommerceError> {
            Err(CommerceError::PaymentFailed("service unavailable".to_string()))
        }
    }

    fn customer() -> Customer {
        Customer::new("sophea", "sophea@example.com")
    }

    fn filled_cart(store: MemoryCartStore) -> CartManager<MemoryCartStore> {
        let mut cart = CartManager::open(store);
        let product = Product::new(1, "Phone A", Money::new(50000, Currency::USD)).with_stock(2);
        cart.add_item(&product).unwrap();
        cart.add_item(&product).unwrap();
        cart
    }

    #[test]
    fn test_place_order_clears_cart() {
        let store = MemoryCartStore::new();
        let mut cart = filled_cart(store.clone());
        let gateway = UrlPaymentGateway::new("http://localhost:8000/api/payment");

        let receipt = place_order(&mut cart, customer(), PaymentMethod::QrCode, &gateway).unwrap();
        assert_eq!(receipt.request.total.amount_cents, 100000);
        assert_eq!(receipt.request.item_count(), 2);
        assert!(receipt.payment_link.unwrap().url.contains("amount=1000.00"));
        assert_eq!(receipt.message, "Order placed! Total: $1000.00 | Customer: sophea");

        assert!(cart.state().is_empty());
        assert_eq!(store.load().unwrap(), Some(vec![]));
    }

    #[test]
    fn test_cash_skips_gateway() {
        let mut cart = filled_cart(MemoryCartStore::new());
        let receipt = place_order(&mut cart, customer(), PaymentMethod::CashOnDelivery, &DownGateway).unwrap();
        assert!(receipt.payment_link.is_none());
        assert!(cart.state().is_empty());
    }

    #[test]
    fn test_empty_cart_rejected() {
        let mut cart = CartManager::open(MemoryCartStore::new());
        let result = place_order(&mut cart, customer(), PaymentMethod::QrCode, &DownGateway);
        assert!(matches!(result, Err(CommerceError::EmptyCart)));
    }

    #[test]
    fn test_gateway_failure_keeps_cart() {
        let mut cart = filled_cart(MemoryCartStore::new());
        let result = place_order(&mut cart, customer(), PaymentMethod::QrCode, &DownGateway);
        assert!(matches!(result, Err(CommerceError::PaymentFailed(_))));
        assert_eq!(cart.item_count(), 2);
    }
}
