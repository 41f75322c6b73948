use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{DiscoveryError, Result};
use crate::google_places::{
    AutocompleteResponse, GeocodeResponse, Geometry, LatLng, LatLngLiteral, LocalizedText, NearbyPlace,
    NearbySearchRequest, NearbySearchResponse, PlaceDetailsResponse, PlaceDetailsResult, PlacesApi, Photo,
};

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Canned upstream. Errors are replayed as `Upstream` with the original message.
pub struct StubPlaces {
    autocomplete: std::result::Result<AutocompleteResponse, String>,
    details: std::result::Result<PlaceDetailsResponse, String>,
    geocode: std::result::Result<GeocodeResponse, String>,
    nearby: std::result::Result<NearbySearchResponse, String>,
    calls: AtomicUsize,
    last_nearby_request: Mutex<Option<NearbySearchRequest>>,
}

impl Default for StubPlaces {
    fn default() -> Self {
        Self {
            autocomplete: Ok(AutocompleteResponse {
                status: "ZERO_RESULTS".to_string(),
                ..Default::default()
            }),
            details: Ok(details_at(37.7749, -122.4194)),
            geocode: Ok(GeocodeResponse {
                status: "ZERO_RESULTS".to_string(),
                ..Default::default()
            }),
            nearby: Ok(NearbySearchResponse::default()),
            calls: AtomicUsize::new(0),
            last_nearby_request: Mutex::new(None),
        }
    }
}

impl StubPlaces {
    pub fn with_autocomplete(mut self, response: Result<AutocompleteResponse>) -> Self {
        self.autocomplete = response.map_err(|e| e.to_string());
        self
    }

    pub fn with_details(mut self, response: Result<PlaceDetailsResponse>) -> Self {
        self.details = response.map_err(|e| e.to_string());
        self
    }

    pub fn with_geocode(mut self, response: Result<GeocodeResponse>) -> Self {
        self.geocode = response.map_err(|e| e.to_string());
        self
    }

    pub fn with_nearby(mut self, response: Result<NearbySearchResponse>) -> Self {
        self.nearby = response.map_err(|e| e.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_nearby_request(&self) -> Option<NearbySearchRequest> {
        self.last_nearby_request.lock().unwrap().clone()
    }

    fn replay<T: Clone>(&self, canned: &std::result::Result<T, String>) -> Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        canned.clone().map_err(DiscoveryError::Upstream)
    }
}

#[async_trait]
impl PlacesApi for StubPlaces {
    async fn autocomplete(&self, _input: &str) -> Result<AutocompleteResponse> {
        self.replay(&self.autocomplete)
    }

    async fn place_details(&self, _place_id: &str) -> Result<PlaceDetailsResponse> {
        self.replay(&self.details)
    }

    async fn reverse_geocode(&self, _latitude: f64, _longitude: f64) -> Result<GeocodeResponse> {
        self.replay(&self.geocode)
    }

    async fn search_nearby(&self, request: &NearbySearchRequest) -> Result<NearbySearchResponse> {
        *self.last_nearby_request.lock().unwrap() = Some(request.clone());
        self.replay(&self.nearby)
    }
}

pub fn details_at(lat: f64, lng: f64) -> PlaceDetailsResponse {
    PlaceDetailsResponse {
        status: "OK".to_string(),
        result: Some(PlaceDetailsResult {
            geometry: Geometry {
                location: LatLng { lat, lng },
            },
            formatted_address: "San Francisco, CA, USA".to_string(),
        }),
        error_message: None,
    }
}

pub fn nearby_place(id: &str, rating: Option<f64>, reviews: Option<u32>, price: Option<&str>) -> NearbyPlace {
    NearbyPlace {
        id: id.to_string(),
        display_name: Some(LocalizedText {
            text: format!("Restaurant {}", id),
        }),
        formatted_address: Some(format!("{} Market St, San Francisco", id)),
        rating,
        user_rating_count: reviews,
        price_level: price.map(String::from),
        location: Some(LatLngLiteral {
            latitude: 37.78,
            longitude: -122.41,
        }),
        photos: vec![Photo {
            name: format!("places/{}/photos/first", id),
        }],
    }
}
