//! End-to-end cart behaviour over a file-backed store.

use krstore_cache::Cache;
use krstore_commerce::cart::CART_KEY;
use krstore_commerce::prelude::*;
use proptest::prelude::*;
use tempfile::TempDir;

fn phone_a() -> Product {
    Product::new(1, "Phone A", Money::new(50000, Currency::USD)).with_stock(2)
}

fn phone_b() -> Product {
    Product::new(2, "Phone B", Money::new(30000, Currency::USD)).with_stock(5)
}

fn open_cart(dir: &TempDir) -> CartManager<KvCartStore> {
    let cache = Cache::open_file(dir.path().join("storage.json")).unwrap();
    CartManager::open(KvCartStore::new(cache))
}

#[test]
fn test_cart_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut cart = open_cart(&dir);
        cart.add_item(&phone_a()).unwrap();
        cart.add_item(&phone_b()).unwrap();
        cart.update_quantity(&phone_b().id, 3);
        assert!(cart.last_persist_error().is_none());
    }

    let cart = open_cart(&dir);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.state().get_item(&phone_b().id).unwrap().quantity, 3);

    let totals = cart.totals().unwrap();
    assert_eq!(totals.subtotal.display(), "$1400.00");
    assert_eq!(totals.total, totals.subtotal);
    assert_eq!(totals.shipping_label(), "Free");
}

#[test]
fn test_stock_limit_scenario() {
    let dir = TempDir::new().unwrap();
    let mut cart = open_cart(&dir);

    assert_eq!(cart.add_item(&phone_a()).unwrap(), AddOutcome::Added);
    assert_eq!(
        cart.add_item(&phone_a()).unwrap(),
        AddOutcome::Incremented { quantity: 2 }
    );

    let err = cart.add_item(&phone_a()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot add more than stock for Phone A: limit is 2"
    );
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.totals().unwrap().total.amount_cents, 100000);
}

#[test]
fn test_update_clamps_and_ignores() {
    let dir = TempDir::new().unwrap();
    let mut cart = open_cart(&dir);
    cart.add_item(&phone_b()).unwrap();

    assert_eq!(
        cart.update_quantity(&phone_b().id, 9),
        QuantityUpdate::Clamped {
            requested: 9,
            applied: 5
        }
    );
    assert_eq!(cart.update_quantity(&phone_b().id, 0), QuantityUpdate::Ignored);
    assert_eq!(cart.update_quantity(&phone_b().id, -3), QuantityUpdate::Ignored);
    assert_eq!(cart.item_count(), 5);
}

#[test]
fn test_remove_and_clear_persist() {
    let dir = TempDir::new().unwrap();
    {
        let mut cart = open_cart(&dir);
        cart.add_item(&phone_a()).unwrap();
        cart.add_item(&phone_b()).unwrap();
        assert!(cart.remove_item(&phone_a().id));
    }
    {
        let mut cart = open_cart(&dir);
        assert_eq!(cart.state().unique_item_count(), 1);
        cart.clear();
    }
    assert!(open_cart(&dir).state().is_empty());
}

#[test]
fn test_corrupt_cart_value_starts_empty() {
    let dir = TempDir::new().unwrap();
    let cache = Cache::open_file(dir.path().join("storage.json")).unwrap();
    cache.set_raw(CART_KEY, "not a cart").unwrap();
    cache.set_raw("productRating_1", "4").unwrap();

    let mut cart = CartManager::open(KvCartStore::new(cache.clone()));
    assert!(cart.state().is_empty());

    // Other keys are untouched and the next write replaces the bad value
    cart.add_item(&phone_a()).unwrap();
    assert_eq!(cache.get_raw("productRating_1").unwrap().as_deref(), Some("4"));
    assert!(cache.get::<Vec<LineItem>>(CART_KEY).unwrap().is_some());
}

#[test]
fn test_checkout_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut cart = open_cart(&dir);
    cart.add_item(&phone_a()).unwrap();

    let gateway = UrlPaymentGateway::new("http://localhost:8000/api/payment");
    let receipt = place_order(
        &mut cart,
        Customer::new("dara", "dara@example.com"),
        PaymentMethod::QrCode,
        &gateway,
    )
    .unwrap();

    assert_eq!(receipt.message, "Order placed! Total: $500.00 | Customer: dara");
    assert!(open_cart(&dir).state().is_empty());
}

proptest! {
    #[test]
    fn prop_quantity_never_exceeds_stock(
        stock in 1u32..6,
        ops in proptest::collection::vec((0u8..3, -3i64..10), 0..40),
    ) {
        let product = Product::new(7, "Tablet", Money::new(1000, Currency::USD)).with_stock(stock);
        let mut cart = CartManager::open(MemoryCartStore::new());

        for (op, qty) in ops {
            match op {
                0 => {
                    let _ = cart.add_item(&product);
                }
                1 => {
                    cart.update_quantity(&product.id, qty);
                }
                _ => {
                    cart.remove_item(&product.id);
                }
            }

            if let Some(item) = cart.state().get_item(&product.id) {
                prop_assert!(item.quantity >= 1);
                prop_assert!(item.quantity <= stock);
            }
            prop_assert!(cart.state().unique_item_count() <= 1);
        }
    }
}
