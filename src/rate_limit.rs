use std::net::IpAddr;

use actix_governor::governor::clock::{Clock, DefaultClock, QuantaInstant};
use actix_governor::governor::NotUntil;
use actix_governor::{KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::{HttpResponse, HttpResponseBuilder};
use log::warn;

use crate::error::{DiscoveryError, ErrorResponse};

/// Keys the limiter on the peer IP. Anything the caller sends in headers is
/// ignored, so a client cannot mint itself a fresh bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientKeyExtractor;

impl KeyExtractor for ClientKeyExtractor {
    type Key = IpAddr;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        req.peer_addr()
            .map(|addr| addr.ip())
            .ok_or_else(|| SimpleKeyExtractionError::new("Could not identify the client"))
    }

    fn exceed_rate_limit_response(
        &self,
        negative: &NotUntil<QuantaInstant>,
        mut response: HttpResponseBuilder,
    ) -> HttpResponse {
        let wait = negative.wait_time_from(DefaultClock::default().now());
        warn!("Rate limit exceeded, next request allowed in {}s", wait.as_secs());
        response.json(ErrorResponse {
            error: DiscoveryError::RateLimited.public_message(),
        })
    }
}
