//! Order placement.

use anyhow::{anyhow, bail, Result};
use krstore_commerce::checkout::{place_order, Customer, PaymentMethod};

use super::CheckoutArgs;
use crate::commands::cart::report_persistence;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let method_name = args
        .payment
        .as_deref()
        .unwrap_or(&ctx.config.checkout.default_payment);
    let payment_method = PaymentMethod::parse(method_name)
        .ok_or_else(|| anyhow!("Unknown payment method: {} (use qr or cash)", method_name))?;

    let store = ctx.open_store()?;
    let Some(user) = ctx.session(&store).current()? else {
        bail!("Please log in to place an order");
    };

    let mut cart = ctx.cart(&store)?;
    let customer = Customer::new(user.name, user.email);
    let gateway = ctx.payment_gateway();
    ctx.output.debug(&format!(
        "Placing order for {} item(s) via {}",
        cart.item_count(),
        payment_method.as_str()
    ));

    let receipt = place_order(&mut cart, customer, payment_method, &gateway)?;
    report_persistence(&cart, ctx);

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output.success(&receipt.message);
    ctx.output.kv("Order", receipt.request.id.as_str());
    ctx.output.kv(
        "Placed at",
        &receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    match receipt.payment_link {
        Some(link) => {
            ctx.output.kv("Pay here", &link.url);
            ctx.output.info("Scan or open the link to complete your payment.");
        }
        None => ctx.output.kv("Payment", "Cash on delivery"),
    }
    Ok(())
}
