//! 7TV cosmetics client library.
//!
//! Provides the identity lookup (login -> Twitch user ID), the 7TV REST
//! client, paint/badge normalization and the resolver that ties them
//! together for a single lookup.

pub mod api;
pub mod cosmetics;
pub mod identity;
pub mod record;
pub mod resolver;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Default `User-Agent` sent on every outbound request.
pub const DEFAULT_USER_AGENT: &str = "vercel-7tv-overlay/1.0";

/// Unified error type for the seventv-client crate.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upstream API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Build the shared HTTP client with the identifying `User-Agent`.
pub fn build_http_client(user_agent: &str) -> Result<reqwest::Client, ClientError> {
    let client = reqwest::Client::builder().user_agent(user_agent).build()?;
    Ok(client)
}
