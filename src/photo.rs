use log::{debug, warn};
use url::Url;

use crate::models::PlaceCandidate;

const PHOTO_MEDIA_BASE: &str = "https://places.googleapis.com/v1/";
pub const MAX_PHOTO_PX: u32 = 400;

pub struct PhotoUrlBuilder {
    api_key: String,
}

impl PhotoUrlBuilder {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }

    /// Media URL for the first photo, if the place has any. The URL is not fetched.
    pub fn build_url(&self, candidate: &PlaceCandidate) -> Option<String> {
        let reference = candidate.photo_refs.first()?;
        let max_px = MAX_PHOTO_PX.to_string();
        let url = Url::parse(PHOTO_MEDIA_BASE)
            .and_then(|base| base.join(&format!("{}/media", reference)))
            .map(|mut url| {
                url.query_pairs_mut()
                    .append_pair("maxHeightPx", &max_px)
                    .append_pair("maxWidthPx", &max_px)
                    .append_pair("key", &self.api_key);
                url
            });

        match url {
            Ok(url) => {
                debug!("Built photo URL for {}", candidate.id);
                Some(url.to_string())
            }
            Err(e) => {
                warn!("Could not build photo URL from {:?}: {}", reference, e);
                None
            }
        }
    }
}
