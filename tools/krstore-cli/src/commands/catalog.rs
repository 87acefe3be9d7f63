//! Catalog browsing commands.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use krstore_commerce::catalog::{build_categories, default_category_rules, Product, Rating};
use krstore_commerce::search::{Filter, SearchQuery};
use krstore_commerce::ProductId;

use super::{CatalogArgs, CatalogCommand, ListArgs};
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    if catalog.is_empty() {
        ctx.output.warn(&format!(
            "No products found in {}",
            ctx.resolve_path(&ctx.config.catalog.path).display()
        ));
    }

    match args.command {
        None => list(&catalog, ListArgs::default(), ctx),
        Some(CatalogCommand::List(list_args)) => list(&catalog, list_args, ctx),
        Some(CatalogCommand::Show { id }) => show(&catalog, &id, ctx),
        Some(CatalogCommand::Categories { products }) => categories(&catalog, products, ctx),
    }
}

/// Translate listing flags into a query.
fn build_query(args: &ListArgs) -> SearchQuery {
    let mut query = SearchQuery::new().sort_by(args.sort.into());

    if let Some(ref text) = args.search {
        query = query.filter(Filter::text(text.clone()));
    }
    match args.brand.as_slice() {
        [] => {}
        [brand] => query = query.filter(Filter::brand(brand.clone())),
        brands => query = query.filter(Filter::Brands(brands.to_vec())),
    }
    if let Some(ref category) = args.category {
        query = query.filter(Filter::category(category.clone()));
    }
    if args.in_stock {
        query = query.filter(Filter::in_stock());
    }
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }
    query
}

fn list(catalog: &[Product], args: ListArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args);
    let results = query.apply(catalog);
    let ratings = load_ratings(ctx);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({} of {}, {})",
        results.len(),
        catalog.len(),
        query.sort.display_name()
    ));
    if results.is_empty() {
        ctx.output.info("No products match your filters");
        return Ok(());
    }

    let widths = [8, 32, 12, 12, 7];
    ctx.output
        .table_row(&["ID", "NAME", "BRAND", "PRICE", "RATING"], &widths);
    for product in results {
        let rating = ratings
            .get(&product.id)
            .map(Rating::stars)
            .unwrap_or_default();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &truncate(&product.name, 32),
                product.brand.as_deref().unwrap_or("-"),
                &product.price.display(),
                &rating,
            ],
            &widths,
        );
        ctx.output.debug(&format!("{} {}", product.id, stock_badge(product.stock)));
    }
    Ok(())
}

fn show(catalog: &[Product], id: &str, ctx: &Context) -> Result<()> {
    let Some(product) = catalog.iter().find(|p| p.id.as_str() == id) else {
        bail!("Product {} not found", id);
    };
    let rating = load_ratings(ctx).remove(&product.id);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": product,
            "rating": rating,
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    ctx.output.kv("Price", &product.price.display());
    ctx.output.kv("Stock", &stock_badge(product.stock));
    if let Some(ref brand) = product.brand {
        ctx.output.kv("Brand", brand);
    }
    if let Some(ref category) = product.category {
        ctx.output.kv("Category", category);
    }
    if let Some(image) = product.primary_image() {
        ctx.output.kv("Image", image);
    }
    match rating {
        Some(r) => ctx.output.kv("Your rating", &format!("{} ({}/5)", r.stars(), r.value())),
        None => ctx.output.kv("Your rating", "not rated"),
    }
    if let Some(ref description) = product.description {
        ctx.output.info("");
        ctx.output.info(description);
    }
    Ok(())
}

fn categories(catalog: &[Product], with_products: bool, ctx: &Context) -> Result<()> {
    let categories = build_categories(&default_category_rules(), catalog);

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        ctx.output.list_item(&format!(
            "{} ({} products) - {}",
            category.name, category.product_count, category.description
        ));
        ctx.output.debug(&format!("brands: {}", category.brands.join(", ")));
        if with_products {
            if category.is_empty() {
                ctx.output.kv("  products", "none available");
            }
            for product in &category.products {
                ctx.output
                    .kv(&format!("  {}", product.id), &format!("{} {}", product.name, product.price));
            }
        }
    }
    Ok(())
}

/// Ratings are decoration here; an unreadable store just hides them.
fn load_ratings(ctx: &Context) -> BTreeMap<ProductId, Rating> {
    let loaded = ctx
        .open_store()
        .map_err(|e| e.to_string())
        .and_then(|store| ctx.ratings(&store).load_all().map_err(|e| e.to_string()));
    match loaded {
        Ok(ratings) => ratings,
        Err(e) => {
            tracing::warn!(error = %e, "ratings unavailable");
            BTreeMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SortArg;
    use krstore_commerce::{Currency, Money};

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "iPhone 15", Money::new(99900, Currency::USD))
                .with_brand("Apple")
                .with_category("Phone")
                .with_stock(3),
            Product::new(2, "Galaxy S24", Money::new(89900, Currency::USD))
                .with_brand("Samsung")
                .with_category("phone")
                .with_stock(0),
            Product::new(3, "ROG Laptop", Money::new(149900, Currency::USD))
                .with_brand("Asus")
                .with_category("Laptop"),
        ]
    }

    #[test]
    fn test_build_query_combines_flags() {
        let args = ListArgs {
            category: Some("PHONE".to_string()),
            in_stock: true,
            ..ListArgs::default()
        };
        let catalog = catalog();
        let results = build_query(&args).apply(&catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "iPhone 15");
    }

    #[test]
    fn test_build_query_brands_and_sort() {
        let args = ListArgs {
            brand: vec!["Asus".to_string(), "Samsung".to_string()],
            sort: SortArg::PriceDesc,
            limit: Some(1),
            ..ListArgs::default()
        };
        let catalog = catalog();
        let results = build_query(&args).apply(&catalog);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "ROG Laptop");
    }

    #[test]
    fn test_build_query_search() {
        let args = ListArgs {
            search: Some("galaxy".to_string()),
            ..ListArgs::default()
        };
        let catalog = catalog();
        assert_eq!(build_query(&args).apply(&catalog)[0].id.as_str(), "2");
    }
}
