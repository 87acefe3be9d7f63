//! Search query builder.

use crate::catalog::Product;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Keep catalog order.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by name A-Z.
    NameAsc,
}

impl SortOption {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
        }
    }
}

/// A search over an in-memory catalog.
///
/// Filters are combined with AND.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchQuery {
    /// Filters to apply.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Create an empty query (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the sort order.
    pub fn sort_by(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Cap the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Run the query.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut results: Vec<&Product> = products
            .iter()
            .filter(|p| self.filters.iter().all(|f| f.matches(p)))
            .collect();

        // Stable sorts keep catalog order among equals
        match self.sort {
            SortOption::Featured => {}
            SortOption::PriceAsc => results.sort_by_key(|p| p.price.amount_cents),
            SortOption::PriceDesc => {
                results.sort_by_key(|p| std::cmp::Reverse(p.price.amount_cents))
            }
            SortOption::NameAsc => results.sort_by_key(|p| p.name.to_lowercase()),
        }

        if let Some(limit) = self.limit {
            results.truncate(limit);
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "iPhone 15", Money::new(90000, Currency::USD)).with_brand("Apple").with_stock(2),
            Product::new(2, "ROG Phone", Money::new(70000, Currency::USD)).with_brand("Asus").with_stock(0),
            Product::new(3, "iPad Air", Money::new(60000, Currency::USD)).with_brand("Apple").with_stock(5),
        ]
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let products = catalog();
        let ids: Vec<&str> = SearchQuery::new().apply(&products).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_filters_are_anded() {
        let products = catalog();
        let results = SearchQuery::new()
            .filter(Filter::brand("Apple"))
            .filter(Filter::text("ipad"))
            .apply(&products);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "3");
    }

    #[test]
    fn test_sort_and_limit() {
        let products = catalog();
        let results = SearchQuery::new()
            .filter(Filter::in_stock())
            .sort_by(SortOption::PriceAsc)
            .limit(1)
            .apply(&products);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id.as_str(), "3");
    }
}
