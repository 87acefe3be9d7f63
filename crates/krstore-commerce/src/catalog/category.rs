//! Brand-based categories for product organization.
//!
//! The catalog API does not model categories itself. A category is a named
//! rule listing the brands it groups, and is populated by matching each
//! product's brand against that list.

use crate::catalog::Product;
use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A rule describing which brands make up a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRule {
    /// Display name.
    pub name: String,
    /// Brands included in this category (exact match).
    pub brands: Vec<String>,
    /// Card image path.
    pub image: String,
    /// Short description.
    pub description: String,
}

impl CategoryRule {
    /// Create a rule.
    pub fn new(
        name: impl Into<String>,
        brands: &[&str],
        image: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            brands: brands.iter().map(|b| b.to_string()).collect(),
            image: image.into(),
            description: description.into(),
        }
    }

    /// Whether a product belongs to this category.
    pub fn matches(&self, product: &Product) -> bool {
        product
            .brand
            .as_deref()
            .map(|brand| self.brands.iter().any(|b| b == brand))
            .unwrap_or(false)
    }
}

/// A populated category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Position-derived identifier (1-based).
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Brands grouped by this category.
    pub brands: Vec<String>,
    /// Card image path.
    pub image: String,
    /// Short description.
    pub description: String,
    /// Number of matching products.
    pub product_count: usize,
    /// Matching products, in catalog order.
    pub products: Vec<Product>,
}

impl Category {
    /// Whether no product matched.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Populate categories from rules, in rule order.
pub fn build_categories(rules: &[CategoryRule], products: &[Product]) -> Vec<Category> {
    rules
        .iter()
        .enumerate()
        .map(|(idx, rule)| {
            let matching: Vec<Product> = products
                .iter()
                .filter(|p| rule.matches(p))
                .cloned()
                .collect();
            Category {
                id: CategoryId::new((idx + 1).to_string()),
                name: rule.name.clone(),
                brands: rule.brands.clone(),
                image: rule.image.clone(),
                description: rule.description.clone(),
                product_count: matching.len(),
                products: matching,
            }
        })
        .collect()
}

/// The storefront's built-in category rules.
pub fn default_category_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Camera Phone",
            &["Apple", "Samsung", "Howie"],
            "/images/image.png",
            "Phones built around capable cameras for photos and video.",
        ),
        CategoryRule::new(
            "Android",
            &["Vivo", "Oppo", "Horner"],
            "/images/android.png",
            "Smartphones running Google's Android operating system.",
        ),
        CategoryRule::new(
            "Gaming Phone",
            &["Asus"],
            "/images/gamming.png",
            "High-performance phones tuned for smooth gaming.",
        ),
        CategoryRule::new(
            "Flagship Phones",
            &["Apple"],
            "/images/flagship-phone.png",
            "Premium phones with top-tier performance and cameras.",
        ),
        CategoryRule::new(
            "Foldable Phones",
            &["Samsung"],
            "/images/Foldable Phones.png",
            "Phones with flexible screens that fold into a compact shape.",
        ),
        CategoryRule::new(
            "Budget Phones",
            &["Vivo", "Oppo", "Horner"],
            "/images/Budget-Phones.png",
            "Affordable phones covering the essentials.",
        ),
        CategoryRule::new(
            "Accessories",
            &["Apple", "Oppo", "Horner"],
            "/images/accesseries.png",
            "Chargers, headphones, cases and cables.",
        ),
        CategoryRule::new(
            "iPads",
            &["Apple", "Howie", "Sammsung"],
            "/images/ipad.png",
            "Tablets for work, study and entertainment.",
        ),
    ]
}
