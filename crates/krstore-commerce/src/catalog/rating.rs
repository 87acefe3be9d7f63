//! Per-product star ratings kept in local storage.

use std::collections::BTreeMap;

use crate::error::CommerceError;
use crate::ids::ProductId;
use krstore_cache::{storage_key, Cache};
use serde::{Deserialize, Serialize};

/// Storage key prefix for ratings.
pub const RATING_KEY_PREFIX: &str = "productRating";

/// A star rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Lowest rating.
    pub const MIN: u8 = 1;
    /// Highest rating.
    pub const MAX: u8 = 5;

    /// Validate a rating value.
    pub fn new(value: i64) -> Result<Self, CommerceError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(CommerceError::InvalidRating(value))
        }
    }

    /// Star count.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Render as filled/empty stars.
    pub fn stars(&self) -> String {
        let filled = usize::from(self.0);
        format!(
            "{}{}",
            "\u{2605}".repeat(filled),
            "\u{2606}".repeat(usize::from(Self::MAX) - filled)
        )
    }
}

impl TryFrom<i64> for Rating {
    type Error = CommerceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Ratings stored one key per product (`productRating_<id>`).
#[derive(Debug, Clone)]
pub struct RatingBook {
    cache: Cache,
}

impl RatingBook {
    /// Create a rating book over a store.
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Record a rating, replacing any previous one.
    pub fn rate(&self, product_id: &ProductId, rating: Rating) -> Result<(), CommerceError> {
        let key = storage_key!(RATING_KEY_PREFIX, product_id);
        self.cache.set_raw(&key, &rating.value().to_string())?;
        tracing::debug!(product_id = %product_id, rating = rating.value(), "rated product");
        Ok(())
    }

    /// Rating for one product, if any valid one is stored.
    pub fn get(&self, product_id: &ProductId) -> Result<Option<Rating>, CommerceError> {
        let key = storage_key!(RATING_KEY_PREFIX, product_id);
        Ok(self.cache.get_raw(&key)?.and_then(|raw| parse_rating(&key, &raw)))
    }

    /// All stored ratings keyed by product.
    ///
    /// Values that are not integers in 1-5 are skipped.
    pub fn load_all(&self) -> Result<BTreeMap<ProductId, Rating>, CommerceError> {
        let prefix = format!("{}_", RATING_KEY_PREFIX);
        let mut ratings = BTreeMap::new();
        for key in self.cache.keys_with_prefix(&prefix)? {
            let Some(id) = key.strip_prefix(&prefix).filter(|id| !id.is_empty()) else {
                continue;
            };
            if let Some(raw) = self.cache.get_raw(&key)? {
                if let Some(rating) = parse_rating(&key, &raw) {
                    ratings.insert(ProductId::new(id), rating);
                }
            }
        }
        Ok(ratings)
    }
}

fn parse_rating(key: &str, raw: &str) -> Option<Rating> {
    let parsed = raw
        .trim()
        .trim_matches('"')
        .parse::<i64>()
        .ok()
        .and_then(|v| Rating::new(v).ok());
    if parsed.is_none() {
        tracing::warn!(key, value = raw, "ignoring invalid stored rating");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert_eq!(Rating::new(3).unwrap().stars(), "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}");
    }

    #[test]
    fn test_rating_serde() {
        let r: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(r.value(), 4);
        assert_eq!(serde_json::to_string(&r).unwrap(), "4");
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_rate_and_get() {
        let cache = Cache::in_memory();
        let book = RatingBook::new(cache.clone());
        let id = ProductId::new("12");

        book.rate(&id, Rating::new(4).unwrap()).unwrap();
        assert_eq!(cache.get_raw("productRating_12").unwrap().as_deref(), Some("4"));
        assert_eq!(book.get(&id).unwrap(), Some(Rating::new(4).unwrap()));

        book.rate(&id, Rating::new(2).unwrap()).unwrap();
        assert_eq!(book.get(&id).unwrap().map(|r| r.value()), Some(2));
    }

    #[test]
    fn test_load_all_skips_invalid() {
        let cache = Cache::in_memory();
        cache.set_raw("productRating_1", "5").unwrap();
        cache.set_raw("productRating_2", "banana").unwrap();
        cache.set_raw("productRating_3", "7").unwrap();
        cache.set_raw("productRating_", "3").unwrap();
        cache.set_raw("cart", "[]").unwrap();

        let ratings = RatingBook::new(cache).load_all().unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[&ProductId::new("1")].value(), 5);
    }

    #[test]
    fn test_ratings_independent_of_other_keys() {
        let cache = Cache::in_memory();
        let book = RatingBook::new(cache.clone());
        book.rate(&ProductId::new("1"), Rating::new(1).unwrap()).unwrap();
        cache.delete("cart").unwrap();
        assert_eq!(book.load_all().unwrap().len(), 1);
    }
}
