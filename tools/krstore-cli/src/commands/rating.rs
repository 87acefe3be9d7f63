//! Product rating commands.

use anyhow::Result;
use krstore_commerce::catalog::Rating;
use krstore_commerce::ProductId;
use serde_json::json;

use super::RateArgs;
use crate::context::Context;

/// Rate a product.
pub fn rate(args: RateArgs, ctx: &Context) -> Result<()> {
    let rating = Rating::new(args.stars)?;
    let product_id = ProductId::new(args.id);

    let store = ctx.open_store()?;
    ctx.ratings(&store).rate(&product_id, rating)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&json!({ "productId": product_id, "rating": rating }));
    } else {
        let name = ctx
            .load_catalog()
            .ok()
            .and_then(|catalog| catalog.into_iter().find(|p| p.id == product_id))
            .map(|p| p.name)
            .unwrap_or_else(|| format!("product {}", product_id));
        ctx.output
            .success(&format!("Rated {} {}", name, rating.stars()));
    }
    Ok(())
}

/// List every stored rating.
pub fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let ratings = ctx.ratings(&store).load_all()?;

    if ctx.output.is_json() {
        ctx.output.json(&ratings);
        return Ok(());
    }

    ctx.output.header("Your Ratings");
    if ratings.is_empty() {
        ctx.output.info("You have not rated any products yet");
        return Ok(());
    }
    for (product_id, rating) in &ratings {
        ctx.output.kv(product_id.as_str(), &rating.stars());
    }
    Ok(())
}
