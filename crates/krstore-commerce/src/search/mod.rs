//! Search module.
//!
//! Client-side filtering over the product list: name search, brand and
//! category filters, sorting.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{SearchQuery, SortOption};
