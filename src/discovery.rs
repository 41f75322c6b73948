use std::sync::Arc;

use log::{debug, info};
use url::Url;

use crate::cuisine;
use crate::error::{DiscoveryError, Result};
use crate::filter::{self, SearchFilters};
use crate::geocode::GeocodeResolver;
use crate::google_places::PlacesApi;
use crate::models::{Coordinates, PlaceCandidate, PlaceLocation, ResolvedPlace, SelectedRestaurant};
use crate::nearby::NearbySearchClient;
use crate::photo::PhotoUrlBuilder;
use crate::price_level;
use crate::selector::Selector;

/// Entry point for the boundary operations. Stateless per request apart from
/// the selector's random generator.
pub struct DiscoveryService {
    geocoder: GeocodeResolver,
    nearby: NearbySearchClient,
    photos: PhotoUrlBuilder,
    selector: Selector,
}

impl DiscoveryService {
    pub fn new(places: Arc<dyn PlacesApi>, api_key: String, selector: Selector) -> Self {
        Self {
            geocoder: GeocodeResolver::new(places.clone()),
            nearby: NearbySearchClient::new(places),
            photos: PhotoUrlBuilder::new(api_key),
            selector,
        }
    }

    pub async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<ResolvedPlace> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(DiscoveryError::InvalidInput(
                "latitude must be within [-90, 90] and longitude within [-180, 180]".to_string(),
            ));
        }
        self.geocoder.resolve_reverse(latitude, longitude).await
    }

    pub async fn autocomplete(&self, query: &str) -> Vec<ResolvedPlace> {
        self.geocoder.resolve_forward(query).await
    }

    pub async fn place_details(&self, place_id: &str) -> Result<PlaceLocation> {
        self.geocoder.resolve_coordinates(place_id).await
    }

    pub async fn search_restaurants(&self, place_id: &str, filters: &SearchFilters) -> Result<SelectedRestaurant> {
        let center = self.geocoder.resolve_coordinates(place_id).await?;
        debug!("Search center for {}: {:?}", place_id, center.coordinates);

        let type_tokens = cuisine::map_cuisines(filters.cuisines());
        let candidates = self
            .nearby
            .search(center.coordinates, filters.distance_km(), &type_tokens)
            .await?;
        if candidates.is_empty() {
            return Err(DiscoveryError::NotFound(format!(
                "nearby search returned nothing within {}km of {}",
                filters.distance_km(),
                place_id
            )));
        }

        let total = candidates.len();
        let survivors = filter::apply(candidates, filters);
        if survivors.is_empty() {
            return Err(DiscoveryError::NotFound(format!(
                "none of {} candidates passed rating >= {} and price <= {}",
                total,
                filters.min_rating(),
                filters.max_price_level()
            )));
        }

        let chosen = self.selector.pick(survivors)?;
        info!("Selected {} ({}) out of {} candidates", chosen.display_name, chosen.id, total);
        let photo_url = self.photos.build_url(&chosen);
        Ok(into_selected(chosen, photo_url))
    }
}

fn into_selected(candidate: PlaceCandidate, photo_url: Option<String>) -> SelectedRestaurant {
    let google_maps_link = candidate
        .location
        .and_then(|location| google_maps_link(&candidate.id, location));
    SelectedRestaurant {
        price_level: price_level::decode(candidate.price_level_token.as_deref()),
        id: candidate.id,
        name: candidate.display_name,
        address: candidate.formatted_address,
        rating: candidate.rating,
        user_rating_count: candidate.user_rating_count,
        photo_url,
        location: candidate.location,
        google_maps_link,
    }
}

fn google_maps_link(place_id: &str, location: Coordinates) -> Option<String> {
    Url::parse_with_params(
        "https://www.google.com/maps/search/",
        &[
            ("api", "1".to_string()),
            ("query", format!("{},{}", location.latitude, location.longitude)),
            ("query_place_id", place_id.to_string()),
        ],
    )
    .ok()
    .map(|url| url.to_string())
}
