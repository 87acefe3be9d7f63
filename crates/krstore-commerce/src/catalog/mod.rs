//! Product catalog module.
//!
//! Contains products parsed from the catalog API, brand categories, and
//! locally stored ratings.

mod category;
mod product;
mod rating;

pub use category::{build_categories, default_category_rules, Category, CategoryRule};
pub use product::{parse_catalog, Product};
pub use rating::{Rating, RatingBook, RATING_KEY_PREFIX};
