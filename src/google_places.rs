use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

const MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
const PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";

const AUTOCOMPLETE_PATH: &str = "/place/autocomplete/json";
const DETAILS_PATH: &str = "/place/details/json";
const GEOCODE_PATH: &str = "/geocode/json";
const SEARCH_NEARBY_PATH: &str = "/places:searchNearby";

const NEARBY_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.rating,\
places.userRatingCount,places.priceLevel,places.location,places.photos";

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";

/// The upstream services the pipeline talks to. Implemented over HTTP by
/// [`GooglePlacesClient`] and by a stub in tests.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn autocomplete(&self, input: &str) -> Result<AutocompleteResponse>;

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse>;

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<GeocodeResponse>;

    async fn search_nearby(&self, request: &NearbySearchRequest) -> Result<NearbySearchResponse>;
}

// Legacy Maps web service responses (autocomplete, details, geocode).

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub place_id: String,
    pub description: String,
    pub structured_formatting: StructuredFormatting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructuredFormatting {
    pub main_text: String,
    #[serde(default)]
    pub secondary_text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub status: String,
    pub result: Option<PlaceDetailsResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResult {
    pub geometry: Geometry,
    #[serde(default)]
    pub formatted_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub place_id: String,
    pub formatted_address: String,
}

// Places API (New) nearby search.

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbySearchRequest {
    pub included_types: Vec<String>,
    pub max_result_count: u32,
    pub rank_preference: String,
    pub location_restriction: LocationRestriction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRestriction {
    pub circle: Circle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: LatLngLiteral,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbySearchResponse {
    // The provider omits the key entirely when nothing matched.
    #[serde(default)]
    pub places: Vec<NearbyPlace>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyPlace {
    pub id: String,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub price_level: Option<String>,
    pub location: Option<LatLngLiteral>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Photo {
    pub name: String,
}

/// HTTP implementation of [`PlacesApi`]. Timeouts come from the shared `Client`;
/// nothing is retried.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    maps_base: String,
    places_base: String,
}

impl GooglePlacesClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            maps_base: MAPS_BASE_URL.to_string(),
            places_base: PLACES_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    fn with_base_urls(client: Client, api_key: String, maps_base: &str, places_base: &str) -> Self {
        Self {
            client,
            api_key,
            maps_base: maps_base.trim_end_matches('/').to_string(),
            places_base: places_base.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.maps_base, path);
        debug!("Requesting {} with params {:?}", url, params);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        let response = ensure_success(&url, response).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn ensure_success(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!("Google Places API returned {} for {}: {}", status, url, body);
    Err(DiscoveryError::Upstream(format!("{} returned HTTP {}", url, status)))
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn autocomplete(&self, input: &str) -> Result<AutocompleteResponse> {
        self.get_json(AUTOCOMPLETE_PATH, &[("input", input.to_string())]).await
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetailsResponse> {
        self.get_json(
            DETAILS_PATH,
            &[
                ("place_id", place_id.to_string()),
                ("fields", "geometry,formatted_address".to_string()),
            ],
        )
        .await
    }

    async fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<GeocodeResponse> {
        self.get_json(GEOCODE_PATH, &[("latlng", format!("{},{}", latitude, longitude))])
            .await
    }

    async fn search_nearby(&self, request: &NearbySearchRequest) -> Result<NearbySearchResponse> {
        let url = format!("{}{}", self.places_base, SEARCH_NEARBY_PATH);
        debug!("Sending nearby search: {:?}", request);
        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", NEARBY_FIELD_MASK)
            .json(request)
            .send()
            .await?;
        let response = ensure_success(&url, response).await?;
        Ok(response.json::<NearbySearchResponse>().await?)
    }
}
