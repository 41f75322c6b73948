use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A place resolved from free text or coordinates. Lives for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlace {
    pub id: String,
    pub display_name: String,
    pub formatted_address: String,
    pub full_description: String,
}

/// Center point of a search, looked up from a place id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceLocation {
    pub coordinates: Coordinates,
    pub formatted_address: String,
}

/// A restaurant returned by nearby search, before filtering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceCandidate {
    pub id: String,
    pub display_name: String,
    pub formatted_address: String,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub price_level_token: Option<String>,
    pub location: Option<Coordinates>,
    pub photo_refs: Vec<String>,
}

/// The one restaurant handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedRestaurant {
    pub id: String,
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub price_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
}
