use std::sync::Arc;

use log::{debug, error, warn};

use crate::error::{DiscoveryError, Result};
use crate::google_places::{PlacesApi, STATUS_NOT_FOUND, STATUS_OK, STATUS_ZERO_RESULTS};
use crate::models::{Coordinates, PlaceLocation, ResolvedPlace};

pub struct GeocodeResolver {
    places: Arc<dyn PlacesApi>,
}

impl GeocodeResolver {
    pub fn new(places: Arc<dyn PlacesApi>) -> Self {
        Self { places }
    }

    /// Autocomplete suggestions for free text. Best effort: any upstream
    /// failure is logged and yields no suggestions.
    pub async fn resolve_forward(&self, query: &str) -> Vec<ResolvedPlace> {
        let response = match self.places.autocomplete(query).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Autocomplete failed for {:?}: {}", query, e);
                return Vec::new();
            }
        };

        if response.status != STATUS_OK && response.status != STATUS_ZERO_RESULTS {
            warn!(
                "Autocomplete returned status {} for {:?}: {}",
                response.status,
                query,
                response.error_message.unwrap_or_default()
            );
            return Vec::new();
        }

        response
            .predictions
            .into_iter()
            .map(|prediction| ResolvedPlace {
                id: prediction.place_id,
                display_name: prediction.structured_formatting.main_text,
                formatted_address: prediction.structured_formatting.secondary_text,
                full_description: prediction.description,
            })
            .collect()
    }

    pub async fn resolve_reverse(&self, latitude: f64, longitude: f64) -> Result<ResolvedPlace> {
        let response = self.places.reverse_geocode(latitude, longitude).await?;

        // ZERO_RESULTS is a successful lookup with nothing in it.
        if response.status != STATUS_OK && response.status != STATUS_ZERO_RESULTS {
            error!(
                "Reverse geocoding returned status {}: {}",
                response.status,
                response.error_message.as_deref().unwrap_or("no error message")
            );
            return Err(DiscoveryError::Upstream(format!(
                "reverse geocoding status {}",
                response.status
            )));
        }

        let first = response.results.into_iter().next().ok_or_else(|| {
            DiscoveryError::NotFound(format!("no address for {},{}", latitude, longitude))
        })?;
        debug!("Reverse geocoded {},{} to {}", latitude, longitude, first.formatted_address);

        let (display_name, formatted_address) = split_address(&first.formatted_address);
        Ok(ResolvedPlace {
            id: first.place_id,
            display_name,
            formatted_address,
            full_description: first.formatted_address,
        })
    }

    /// Center coordinates for a place id picked from autocomplete or reverse geocoding.
    pub async fn resolve_coordinates(&self, place_id: &str) -> Result<PlaceLocation> {
        let response = self.places.place_details(place_id).await?;

        match response.status.as_str() {
            STATUS_OK => {}
            STATUS_NOT_FOUND | STATUS_ZERO_RESULTS => {
                return Err(DiscoveryError::NotFound(format!("place {} does not exist", place_id)));
            }
            other => {
                error!(
                    "Place details returned status {} for {}: {}",
                    other,
                    place_id,
                    response.error_message.as_deref().unwrap_or("no error message")
                );
                return Err(DiscoveryError::Upstream(format!("place details status {}", other)));
            }
        }

        let result = response
            .result
            .ok_or_else(|| DiscoveryError::NotFound(format!("no details for place {}", place_id)))?;
        Ok(PlaceLocation {
            coordinates: Coordinates {
                latitude: result.geometry.location.lat,
                longitude: result.geometry.location.lng,
            },
            formatted_address: result.formatted_address,
        })
    }
}

/// "123 Main St, Springfield, USA" -> ("123 Main St", "Springfield, USA").
/// Without a comma the whole string is the street part.
fn split_address(full: &str) -> (String, String) {
    match full.split_once(',') {
        Some((street, rest)) => (street.to_string(), rest.trim().to_string()),
        None => (full.to_string(), String::new()),
    }
}
