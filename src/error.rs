use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Every failure the discovery pipeline can surface.
///
/// `Display` carries the internal cause and is meant for the server log only.
/// Callers see [`DiscoveryError::public_message`], which is fixed per variant.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl DiscoveryError {
    pub fn public_message(&self) -> String {
        match self {
            Self::Configuration(_) | Self::Internal(_) => {
                "Something went wrong on our side. Please try again later.".to_string()
            }
            Self::RateLimited => "Too many requests. Please slow down and try again shortly.".to_string(),
            Self::Upstream(_) | Self::Http(_) => {
                "The places provider is unavailable right now. Please try again.".to_string()
            }
            Self::NotFound(_) => {
                "No restaurants found. Try increasing the distance or relaxing your filters.".to_string()
            }
            // Validation messages only describe the caller's own input.
            Self::InvalidInput(reason) => reason.clone(),
        }
    }
}

impl ResponseError for DiscoveryError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream(_) | Self::Http(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
        })
    }
}
