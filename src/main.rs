use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use reqwest::Client;

mod config;
mod cuisine;
mod discovery;
mod error;
mod filter;
mod geocode;
mod google_places;
mod logging;
mod models;
mod nearby;
mod photo;
mod price_level;
mod rate_limit;
mod routes;
mod selector;
#[cfg(test)]
mod test_support;
mod utils;

use crate::config::Settings;
use crate::discovery::DiscoveryService;
use crate::google_places::GooglePlacesClient;
use crate::rate_limit::ClientKeyExtractor;
use crate::selector::Selector;

fn log_environment_variables() {
    match serde_json::to_string_pretty(&utils::masked_environment()) {
        Ok(env_vars) => info!("Environment variables: {}", env_vars),
        Err(e) => error!("Could not serialise environment for logging: {}", e),
    }
}

fn init_logging(settings: &Settings) -> std::io::Result<()> {
    logging::setup_logging(settings).map_err(|e| {
        eprintln!("Failed to set up logging: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, format!("failed to set up logging: {}", e))
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings)?;

    log_environment_variables();

    let client = Client::builder()
        .timeout(settings.request_timeout)
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let places = Arc::new(GooglePlacesClient::new(client, settings.google_api_key.clone()));
    let service = web::Data::new(DiscoveryService::new(
        places,
        settings.google_api_key.clone(),
        Selector::from_entropy(),
    ));

    let governor_config = GovernorConfigBuilder::default()
        .per_second(settings.rate_limit_replenish_secs)
        .burst_size(settings.rate_limit_burst)
        .key_extractor(ClientKeyExtractor)
        .finish()
        .ok_or_else(|| {
            error!("Rate limit settings must be non-zero");
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid rate limit settings")
        })?;

    info!("Starting feedmygf server on {}", settings.bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Governor::new(&governor_config))
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .bind(&settings.bind_address)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn unusable_log_directory_is_a_startup_error() {
        let blocker = std::env::temp_dir().join(format!("feedmygf-log-blocker-{}", std::process::id()));
        fs::write(&blocker, b"not a directory").unwrap();
        let log_dir = blocker.join("logs").to_string_lossy().into_owned();

        let settings = Settings::from_lookup(|key| match key {
            "GOOGLE_PLACES_API_KEY" => Some("key".to_string()),
            "LOG_DIR" => Some(log_dir.clone()),
            _ => None,
        })
        .unwrap();

        let result = init_logging(&settings);
        fs::remove_file(&blocker).unwrap();

        let err = result.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
        assert!(err.to_string().starts_with("failed to set up logging"));
    }
}
