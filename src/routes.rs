use actix_web::{web, HttpResponse, Responder};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryService;
use crate::error::DiscoveryError;
use crate::filter::SearchFilters;
use crate::utils::request_id;

const MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Deserialize)]
struct ReverseGeocodeRequest {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchRestaurantsRequest {
    place_id: String,
    distance: f64,
    rating: f64,
    price_level: u8,
    #[serde(default)]
    cuisines: Vec<String>,
    // Single-select form field; "Any" simply maps to no cuisine.
    cuisine: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteQuery {
    query: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetailsQuery {
    place_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailsResponse {
    lat: f64,
    lng: f64,
    formatted_address: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        DiscoveryError::InvalidInput(format!("Invalid request body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        DiscoveryError::InvalidInput(format!("Invalid query string: {}", err)).into()
    }))
    .route("/health", web::get().to(health_check))
    .service(
        web::scope("/place")
            .route("/reverseGeocode", web::post().to(reverse_geocode))
            .route("/searchRestaurants", web::post().to(search_restaurants))
            .route("/search", web::get().to(autocomplete))
            .route("/details", web::get().to(place_details)),
    );
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "message": "Server is running"
    }))
}

fn log_failure(request_id: &str, e: DiscoveryError) -> DiscoveryError {
    match e {
        DiscoveryError::NotFound(_) | DiscoveryError::InvalidInput(_) => info!("Request {}: {}", request_id, e),
        _ => error!("Request {}: {}", request_id, e),
    }
    e
}

async fn reverse_geocode(
    body: web::Json<ReverseGeocodeRequest>,
    service: web::Data<DiscoveryService>,
) -> Result<HttpResponse, DiscoveryError> {
    let request_id = request_id();
    info!(
        "Request {}: Reverse geocode for {},{}",
        request_id, body.latitude, body.longitude
    );

    let place = service
        .reverse_geocode(body.latitude, body.longitude)
        .await
        .map_err(|e| log_failure(&request_id, e))?;

    debug!("Request {}: Resolved {:?}", request_id, place);
    Ok(HttpResponse::Ok().json(place))
}

async fn search_restaurants(
    body: web::Json<SearchRestaurantsRequest>,
    service: web::Data<DiscoveryService>,
) -> Result<HttpResponse, DiscoveryError> {
    let request_id = request_id();
    let req = body.into_inner();
    info!("Request {}: Restaurant search received", request_id);
    debug!("Request {}: Parsed request body: {:?}", request_id, req);

    let mut cuisines = req.cuisines;
    cuisines.extend(req.cuisine);
    let filters = SearchFilters::new(req.distance, req.rating, req.price_level, cuisines)
        .map_err(|e| log_failure(&request_id, e))?;

    let restaurant = service
        .search_restaurants(&req.place_id, &filters)
        .await
        .map_err(|e| log_failure(&request_id, e))?;

    info!("Request {}: Returning {}", request_id, restaurant.name);
    Ok(HttpResponse::Ok().json(restaurant))
}

async fn autocomplete(
    query: web::Query<AutocompleteQuery>,
    service: web::Data<DiscoveryService>,
) -> Result<HttpResponse, DiscoveryError> {
    let request_id = request_id();
    let text = query.query.trim();
    if text.chars().count() < MIN_QUERY_LEN {
        return Err(log_failure(
            &request_id,
            DiscoveryError::InvalidInput(format!("query must be at least {} characters", MIN_QUERY_LEN)),
        ));
    }

    let places = service.autocomplete(text).await;
    debug!("Request {}: {} suggestions for {:?}", request_id, places.len(), text);
    Ok(HttpResponse::Ok().json(places))
}

async fn place_details(
    query: web::Query<DetailsQuery>,
    service: web::Data<DiscoveryService>,
) -> Result<HttpResponse, DiscoveryError> {
    let request_id = request_id();
    let location = service
        .place_details(&query.place_id)
        .await
        .map_err(|e| log_failure(&request_id, e))?;

    Ok(HttpResponse::Ok().json(DetailsResponse {
        lat: location.coordinates.latitude,
        lng: location.coordinates.longitude,
        formatted_address: location.formatted_address,
    }))
}
