use std::sync::Arc;

use log::info;

use crate::error::Result;
use crate::google_places::{Circle, LatLngLiteral, LocationRestriction, NearbyPlace, NearbySearchRequest, PlacesApi};
use crate::models::{Coordinates, PlaceCandidate};

pub const MAX_RESULTS: u32 = 20;
pub const RANK_BY_POPULARITY: &str = "POPULARITY";

pub struct NearbySearchClient {
    places: Arc<dyn PlacesApi>,
}

impl NearbySearchClient {
    pub fn new(places: Arc<dyn PlacesApi>) -> Self {
        Self { places }
    }

    /// One bounded-radius query. An empty result is returned as-is; deciding
    /// that it means "nothing found" is up to the caller.
    pub async fn search(
        &self,
        center: Coordinates,
        distance_km: f64,
        type_tokens: &[&str],
    ) -> Result<Vec<PlaceCandidate>> {
        let request = build_request(center, distance_km, type_tokens);
        info!(
            "Searching {:?} within {}m of {},{}",
            request.included_types, request.location_restriction.circle.radius, center.latitude, center.longitude
        );
        let response = self.places.search_nearby(&request).await?;
        Ok(response.places.into_iter().map(into_candidate).collect())
    }
}

fn build_request(center: Coordinates, distance_km: f64, type_tokens: &[&str]) -> NearbySearchRequest {
    NearbySearchRequest {
        included_types: type_tokens.iter().map(|token| token.to_string()).collect(),
        max_result_count: MAX_RESULTS,
        rank_preference: RANK_BY_POPULARITY.to_string(),
        location_restriction: LocationRestriction {
            circle: Circle {
                center: LatLngLiteral {
                    latitude: center.latitude,
                    longitude: center.longitude,
                },
                radius: distance_km * 1000.0,
            },
        },
    }
}

fn into_candidate(place: NearbyPlace) -> PlaceCandidate {
    PlaceCandidate {
        id: place.id,
        display_name: place.display_name.map(|name| name.text).unwrap_or_default(),
        formatted_address: place.formatted_address.unwrap_or_default(),
        rating: place.rating,
        user_rating_count: place.user_rating_count,
        price_level_token: place.price_level,
        location: place.location.map(|loc| Coordinates {
            latitude: loc.latitude,
            longitude: loc.longitude,
        }),
        photo_refs: place.photos.into_iter().map(|photo| photo.name).collect(),
    }
}
