//! Catalog product type and boundary parsing.
//!
//! Records arrive from the catalog API as loosely typed JSON: ids may be
//! numbers or strings, prices may be numbers or numeric strings, stock may be
//! missing. Everything is validated here once so the rest of the crate only
//! sees well-formed [`Product`] values.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Units in stock as reported by the catalog (`None` when not reported).
    pub stock: Option<u32>,
    /// Image URLs, first one is the primary image.
    pub images: Vec<String>,
    /// Long description.
    pub description: Option<String>,
    /// Manufacturer brand (e.g., "Apple").
    pub brand: Option<String>,
    /// Catalog category name.
    pub category: Option<String>,
}

impl Product {
    /// Create a product with no stock information.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock: None,
            images: Vec::new(),
            description: None,
            brand: None,
            category: None,
        }
    }

    /// Set the reported stock.
    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add an image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Maximum purchasable quantity for the cart.
    ///
    /// Absent or zero stock means "no limit" and yields `None`.
    pub fn stock_limit(&self) -> Option<u32> {
        self.stock.filter(|s| *s > 0)
    }

    /// Whether the storefront should show the product as purchasable.
    pub fn is_in_stock(&self) -> bool {
        self.stock.map(|s| s > 0).unwrap_or(false)
    }

    /// Primary image URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Validate one untyped catalog record.
    pub fn from_json(value: &Value, currency: Currency) -> Result<Self, CommerceError> {
        let obj = value
            .as_object()
            .ok_or_else(|| CommerceError::InvalidProduct("record is not an object".to_string()))?;

        let id = match obj.get("id") {
            Some(Value::String(s)) if !s.trim().is_empty() => ProductId::new(s.trim()),
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => ProductId::new(n.to_string()),
            _ => return Err(CommerceError::InvalidProduct("missing or invalid id".to_string())),
        };

        let name = match obj.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => {
                return Err(CommerceError::InvalidProduct(format!(
                    "product {} has no name",
                    id
                )))
            }
        };

        let price = parse_price(obj.get("price"), currency)
            .ok_or_else(|| CommerceError::InvalidProduct(format!("product {} has invalid price", id)))?;

        let stock = parse_stock(obj.get("stock"))
            .map_err(|reason| CommerceError::InvalidProduct(format!("product {} {}", id, reason)))?;

        let images = match obj.get("images") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        Ok(Self {
            id,
            name,
            price,
            stock,
            images,
            description: optional_text(obj.get("description")),
            brand: optional_text(obj.get("brand")),
            category: optional_text(obj.get("category")),
        })
    }
}

/// Parse a catalog document (a JSON array of product records).
///
/// Records that fail validation are skipped with a warning; a document that
/// is not an array is an error.
pub fn parse_catalog(json: &str, currency: Currency) -> Result<Vec<Product>, CommerceError> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| CommerceError::InvalidCatalog(e.to_string()))?;

    let records = document
        .as_array()
        .ok_or_else(|| CommerceError::InvalidCatalog("expected a JSON array".to_string()))?;

    let mut products = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match Product::from_json(record, currency) {
            Ok(product) => products.push(product),
            Err(e) => tracing::warn!(index, error = %e, "skipping catalog record"),
        }
    }
    Ok(products)
}

fn parse_price(value: Option<&Value>, currency: Currency) -> Option<Money> {
    let money = match value? {
        Value::Number(n) => {
            if let Some(whole) = n.as_i64() {
                Money::from_major(whole, currency)?
            } else {
                let f = n.as_f64()?;
                if !f.is_finite() {
                    return None;
                }
                Money::from_decimal(f, currency)
            }
        }
        Value::String(s) => Money::parse(s, currency)?,
        _ => return None,
    };
    if money.is_negative() {
        return None;
    }
    Some(money)
}

fn parse_stock(value: Option<&Value>) -> Result<Option<u32>, &'static str> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                u32::try_from(v).map(Some).map_err(|_| "has stock out of range")
            } else if n.as_i64().is_some() {
                Err("has negative stock")
            } else {
                match n.as_f64() {
                    Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
                        Ok(Some(f as u32))
                    }
                    _ => Err("has invalid stock"),
                }
            }
        }
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| "has invalid stock"),
        Some(_) => Err("has invalid stock"),
    }
}

fn optional_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
