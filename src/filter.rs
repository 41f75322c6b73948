use log::debug;

use crate::error::{DiscoveryError, Result};
use crate::models::PlaceCandidate;
use crate::price_level;

pub const MIN_DISTANCE_KM: f64 = 1.0;
pub const MAX_DISTANCE_KM: f64 = 50.0;
pub const MAX_RATING: f64 = 5.0;
/// One above the provider's top tier; means "any price".
pub const ANY_PRICE_LEVEL: u8 = 5;
/// Ratings backed by fewer reviews than this are not trusted.
pub const MIN_REVIEW_COUNT: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilters {
    distance_km: f64,
    min_rating: f64,
    max_price_level: u8,
    cuisines: Vec<String>,
}

impl SearchFilters {
    pub fn new(distance_km: f64, min_rating: f64, max_price_level: u8, cuisines: Vec<String>) -> Result<Self> {
        if !(MIN_DISTANCE_KM..=MAX_DISTANCE_KM).contains(&distance_km) {
            return Err(DiscoveryError::InvalidInput(format!(
                "distance must be between {} and {} km",
                MIN_DISTANCE_KM, MAX_DISTANCE_KM
            )));
        }
        if !(0.0..=MAX_RATING).contains(&min_rating) {
            return Err(DiscoveryError::InvalidInput(format!(
                "rating must be between 0 and {}",
                MAX_RATING
            )));
        }
        if !(1..=ANY_PRICE_LEVEL).contains(&max_price_level) {
            return Err(DiscoveryError::InvalidInput(format!(
                "priceLevel must be between 1 and {}",
                ANY_PRICE_LEVEL
            )));
        }

        Ok(Self {
            distance_km,
            min_rating,
            max_price_level,
            cuisines,
        })
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn min_rating(&self) -> f64 {
        self.min_rating
    }

    pub fn max_price_level(&self) -> u8 {
        self.max_price_level
    }

    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }
}

/// Rating and price acceptance. Cuisine is already narrowed by the provider query.
pub fn accept(candidate: &PlaceCandidate, filters: &SearchFilters) -> bool {
    if filters.min_rating > 0.0 {
        let (Some(rating), Some(count)) = (candidate.rating, candidate.user_rating_count) else {
            return false;
        };
        if rating < filters.min_rating || count < MIN_REVIEW_COUNT {
            return false;
        }
    }

    if filters.max_price_level < ANY_PRICE_LEVEL {
        let level = price_level::decode(candidate.price_level_token.as_deref());
        if level > 0 && level > filters.max_price_level {
            return false;
        }
    }

    true
}

pub fn apply(candidates: Vec<PlaceCandidate>, filters: &SearchFilters) -> Vec<PlaceCandidate> {
    let total = candidates.len();
    let accepted: Vec<PlaceCandidate> = candidates
        .into_iter()
        .filter(|candidate| accept(candidate, filters))
        .collect();
    debug!("Filter kept {} of {} candidates", accepted.len(), total);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(rating: Option<f64>, count: Option<u32>, price: Option<&str>) -> PlaceCandidate {
        PlaceCandidate {
            id: "id".to_string(),
            display_name: "Trattoria".to_string(),
            rating,
            user_rating_count: count,
            price_level_token: price.map(String::from),
            ..Default::default()
        }
    }

    fn assorted() -> Vec<PlaceCandidate> {
        vec![
            candidate(None, None, None),
            candidate(Some(1.2), Some(2), Some("PRICE_LEVEL_VERY_EXPENSIVE")),
            candidate(Some(4.9), None, Some("PRICE_LEVEL_FREE")),
            candidate(None, Some(500), Some("PRICE_LEVEL_EXPENSIVE")),
            candidate(Some(3.0), Some(9), Some("PRICE_LEVEL_UNSPECIFIED")),
            candidate(Some(4.5), Some(1200), Some("PRICE_LEVEL_MODERATE")),
        ]
    }

    fn filters(min_rating: f64, max_price_level: u8) -> SearchFilters {
        SearchFilters::new(5.0, min_rating, max_price_level, vec![]).unwrap()
    }

    #[test]
    fn any_rating_and_any_price_accept_everything() {
        let any = filters(0.0, ANY_PRICE_LEVEL);
        assert!(assorted().iter().all(|c| accept(c, &any)));
    }

    #[test]
    fn any_rating_never_rejects_on_rating_grounds() {
        let strict_price = filters(0.0, 4);
        assert!(assorted().iter().all(|c| accept(c, &strict_price)));
    }

    #[test]
    fn any_price_never_rejects_on_price_grounds() {
        let f = filters(1.0, ANY_PRICE_LEVEL);
        let pricey = candidate(Some(4.0), Some(50), Some("PRICE_LEVEL_VERY_EXPENSIVE"));
        assert!(accept(&pricey, &f));
    }

    #[test]
    fn rating_filter_requires_rating_and_reviews() {
        let f = filters(3.5, ANY_PRICE_LEVEL);
        assert!(!accept(&candidate(None, Some(100), None), &f));
        assert!(!accept(&candidate(Some(4.0), None, None), &f));
        assert!(!accept(&candidate(Some(3.4), Some(100), None), &f));
        assert!(accept(&candidate(Some(3.5), Some(100), None), &f));
    }

    #[test]
    fn review_floor_applies_only_with_a_rating_filter() {
        let thin = candidate(Some(4.8), Some(MIN_REVIEW_COUNT - 1), None);
        assert!(!accept(&thin, &filters(4.0, ANY_PRICE_LEVEL)));
        assert!(accept(&thin, &filters(0.0, ANY_PRICE_LEVEL)));
        let enough = candidate(Some(4.8), Some(MIN_REVIEW_COUNT), None);
        assert!(accept(&enough, &filters(4.0, ANY_PRICE_LEVEL)));
    }

    #[test]
    fn price_filter_rejects_only_known_levels_above_max() {
        let f = filters(0.0, 2);
        assert!(accept(&candidate(None, None, Some("PRICE_LEVEL_INEXPENSIVE")), &f));
        assert!(accept(&candidate(None, None, Some("PRICE_LEVEL_MODERATE")), &f));
        assert!(!accept(&candidate(None, None, Some("PRICE_LEVEL_EXPENSIVE")), &f));
        assert!(accept(&candidate(None, None, Some("PRICE_LEVEL_UNSPECIFIED")), &f));
        assert!(accept(&candidate(None, None, None), &f));
    }

    #[test]
    fn apply_keeps_only_accepted() {
        let kept = apply(assorted(), &filters(4.0, 3));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].rating, Some(4.5));
    }

    #[test]
    fn out_of_range_filters_are_rejected() {
        assert!(SearchFilters::new(0.5, 0.0, 5, vec![]).is_err());
        assert!(SearchFilters::new(51.0, 0.0, 5, vec![]).is_err());
        assert!(SearchFilters::new(f64::NAN, 0.0, 5, vec![]).is_err());
        assert!(SearchFilters::new(5.0, 5.1, 5, vec![]).is_err());
        assert!(SearchFilters::new(5.0, -0.1, 5, vec![]).is_err());
        assert!(SearchFilters::new(5.0, 0.0, 0, vec![]).is_err());
        assert!(SearchFilters::new(5.0, 0.0, 6, vec![]).is_err());
        assert!(SearchFilters::new(50.0, 5.0, 1, vec![]).is_ok());
    }
}
