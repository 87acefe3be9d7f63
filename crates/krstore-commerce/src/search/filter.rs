//! Search filter types.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// A predicate over catalog products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring of the product name.
    Text(String),
    /// Exact brand.
    Brand(String),
    /// Any of several brands (OR).
    Brands(Vec<String>),
    /// Case-insensitive match on the product's category.
    Category(String),
    /// Only products shown as purchasable.
    InStock,
}

impl Filter {
    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Create a brand filter.
    pub fn brand(brand: impl Into<String>) -> Self {
        Filter::Brand(brand.into())
    }

    /// Create a category filter.
    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    /// Create an in-stock filter.
    pub fn in_stock() -> Self {
        Filter::InStock
    }

    /// Whether `product` passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => product
                .name
                .to_lowercase()
                .contains(&query.to_lowercase()),
            Filter::Brand(brand) => product.brand.as_deref() == Some(brand.as_str()),
            Filter::Brands(brands) => product
                .brand
                .as_deref()
                .map(|b| brands.iter().any(|x| x == b))
                .unwrap_or(false),
            Filter::Category(name) => product
                .category
                .as_deref()
                .map(|c| c.to_lowercase() == name.to_lowercase())
                .unwrap_or(false),
            Filter::InStock => product.is_in_stock(),
        }
    }
}
