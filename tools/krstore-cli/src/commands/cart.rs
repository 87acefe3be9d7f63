//! Cart commands.

use anyhow::{anyhow, bail, Result};
use krstore_commerce::cart::{AddOutcome, CartManager, CartStore, QuantityUpdate};
use krstore_commerce::catalog::Product;
use krstore_commerce::{Currency, Money, ProductId};
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let mut cart = ctx.cart(&store)?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(&cart, ctx),
        CartCommand::Add {
            id,
            name,
            price,
            stock,
        } => {
            let product = resolve_product(ctx, &id, name, price, stock)?;
            add(&mut cart, &product, ctx)
        }
        CartCommand::Update { id, quantity } => update(&mut cart, &ProductId::new(id), quantity, ctx),
        CartCommand::Remove { id } => remove(&mut cart, &ProductId::new(id), ctx),
        CartCommand::Clear => {
            cart.clear();
            report_persistence(&cart, ctx);
            ctx.output.success("Cart cleared");
            Ok(())
        }
        CartCommand::Totals => totals(&cart, ctx),
    }
}

/// Find a product in the catalog, or describe one from the command line.
fn resolve_product(
    ctx: &Context,
    id: &str,
    name: Option<String>,
    price: Option<String>,
    stock: Option<u32>,
) -> Result<Product> {
    let catalog = ctx.load_catalog()?;
    if let Some(product) = catalog.into_iter().find(|p| p.id.as_str() == id) {
        return Ok(product);
    }

    match (name, price) {
        (Some(name), Some(price)) => {
            let currency = ctx.currency()?;
            let price = parse_price(&price, currency)?;
            let product = Product::new(id, name, price);
            Ok(match stock {
                Some(stock) => product.with_stock(stock),
                None => product,
            })
        }
        _ => bail!(
            "Product {} is not in the catalog. Pass --name and --price to add it anyway.",
            id
        ),
    }
}

fn parse_price(text: &str, currency: Currency) -> Result<Money> {
    let price = Money::parse(text, currency).ok_or_else(|| anyhow!("Invalid price: {}", text))?;
    if price.is_negative() {
        bail!("Price cannot be negative: {}", text);
    }
    Ok(price)
}

fn add<S: CartStore>(cart: &mut CartManager<S>, product: &Product, ctx: &Context) -> Result<()> {
    let outcome = cart.add_item(product)?;
    report_persistence(cart, ctx);

    if ctx.output.is_json() {
        let quantity = cart.state().get_item(&product.id).map_or(0, |i| i.quantity);
        ctx.output.json(&json!({
            "productId": product.id,
            "quantity": quantity,
            "itemCount": cart.item_count(),
        }));
        return Ok(());
    }

    match outcome {
        AddOutcome::Added => ctx.output.success(&format!("Added {} to cart", product.name)),
        AddOutcome::Incremented { quantity } => ctx
            .output
            .success(&format!("{} now x{} in cart", product.name, quantity)),
    }
    ctx.output.kv("items in cart", &cart.item_count().to_string());
    Ok(())
}

fn update<S: CartStore>(
    cart: &mut CartManager<S>,
    id: &ProductId,
    quantity: i64,
    ctx: &Context,
) -> Result<()> {
    let update = cart.update_quantity(id, quantity);
    report_persistence(cart, ctx);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "productId": id,
            "changed": update.changed(),
            "quantity": cart.state().get_item(id).map(|i| i.quantity),
        }));
        return Ok(());
    }

    match update {
        QuantityUpdate::Ignored => ctx
            .output
            .warn("Quantity must be at least 1; use `krstore cart remove` to remove a product"),
        QuantityUpdate::NotInCart => ctx.output.warn(&format!("Product {} is not in the cart", id)),
        QuantityUpdate::Unchanged => ctx.output.info(&format!("Quantity is already {}", quantity)),
        QuantityUpdate::Set(q) => ctx.output.success(&format!("Quantity set to {}", q)),
        QuantityUpdate::Clamped { requested, applied } => ctx.output.warn(&format!(
            "Only {} in stock; quantity set to {} instead of {}",
            applied, applied, requested
        )),
    }
    Ok(())
}

fn remove<S: CartStore>(cart: &mut CartManager<S>, id: &ProductId, ctx: &Context) -> Result<()> {
    let removed = cart.remove_item(id);
    report_persistence(cart, ctx);

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "productId": id, "removed": removed }));
    } else if removed {
        ctx.output.success(&format!("Removed {} from cart", id));
    } else {
        ctx.output.info(&format!("Product {} was not in the cart", id));
    }
    Ok(())
}

fn show<S: CartStore>(cart: &CartManager<S>, ctx: &Context) -> Result<()> {
    let totals = cart.totals()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.state().items(),
            "totals": totals,
        }));
        return Ok(());
    }

    ctx.output.header("Your Shopping Cart");
    if cart.state().is_empty() {
        ctx.output.info("Your cart is empty!");
        return Ok(());
    }

    let widths = [8, 32, 12, 5, 12];
    ctx.output
        .table_row(&["ID", "PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
    for (item, line) in cart.state().items().iter().zip(totals.lines.iter()) {
        let limit = item
            .stock_limit
            .map(|l| format!("{}/{}", item.quantity, l))
            .unwrap_or_else(|| item.quantity.to_string());
        ctx.output.table_row(
            &[
                item.product_id.as_str(),
                &truncate(&item.name, 32),
                &item.unit_price.display(),
                &limit,
                &line.total.display(),
            ],
            &widths,
        );
    }

    print_totals(&totals, ctx);
    Ok(())
}

fn totals<S: CartStore>(cart: &CartManager<S>, ctx: &Context) -> Result<()> {
    let totals = cart.totals()?;
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "subtotal": totals.subtotal,
            "shipping": totals.shipping,
            "total": totals.total,
            "itemCount": totals.item_count,
        }));
        return Ok(());
    }
    print_totals(&totals, ctx);
    Ok(())
}

fn print_totals(totals: &krstore_commerce::cart::CartTotals, ctx: &Context) {
    ctx.output.header("Order Summary");
    ctx.output.kv("Items", &totals.item_count.to_string());
    ctx.output.kv("Subtotal", &totals.subtotal.display());
    ctx.output.kv("Shipping", &totals.shipping_label());
    ctx.output.kv("Total", &totals.total.display());
}

/// Surface a failed write; the command itself still succeeds.
pub(crate) fn report_persistence<S: CartStore>(cart: &CartManager<S>, ctx: &Context) {
    if let Some(e) = cart.last_persist_error() {
        ctx.output
            .warn(&format!("Cart changes were not saved and will be lost on exit: {}", e));
    }
}
