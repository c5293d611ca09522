//! 7TV REST API client.
//!
//! Unauthenticated access to the user, paint and badge endpoints. Every
//! call here is part of a fallback chain, so failures are reported as
//! "no data" rather than errors.

mod cosmetics;
pub(crate) mod request;
mod users;

use url::Url;

use crate::ClientError;

/// Public 7TV v3 API base.
pub const SEVENTV_API_BASE: &str = "https://7tv.io/v3";

/// 7TV API client.
#[derive(Debug, Clone)]
pub struct SevenTvClient {
    http: reqwest::Client,
    base: Url,
}

impl SevenTvClient {
    /// Create a client rooted at `base` (e.g. [`SEVENTV_API_BASE`]).
    pub fn new(http: reqwest::Client, base: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            base: Url::parse(base.trim_end_matches('/'))?,
        })
    }

    /// Build `{base}/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
