//! Twitch login -> user ID resolution via the IVR public API.

use url::Url;

use crate::ClientError;
use crate::api::request::get_json;
use crate::record::{field, first_of, id_string};

/// IVR Twitch user endpoint.
pub const IVR_TWITCH_USER_API_BASE: &str = "https://api.ivr.fi/v2/twitch/user";

/// Identity lookup client.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl IdentityClient {
    pub fn new(http: reqwest::Client, endpoint: &str) -> Result<Self, ClientError> {
        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
        })
    }

    fn lookup_url(&self, login: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("login", &login.to_lowercase());
        url
    }

    /// Resolve a login to its numeric Twitch user ID.
    ///
    /// Returns `Ok(None)` when the request fails, the service answers with a
    /// non-success status, or the record has neither `id` nor `_id`. A
    /// success response that is not JSON is an error.
    pub async fn resolve_user_id(&self, login: &str) -> Result<Option<String>, ClientError> {
        let url = self.lookup_url(login);
        let body = match get_json(&self.http, url.clone()).await {
            Ok(body) => body,
            Err(ClientError::Json(e)) => return Err(e.into()),
            Err(e) => {
                tracing::debug!(%url, "Identity lookup failed: {e}");
                return Ok(None);
            }
        };

        Ok(first_of(body).and_then(|user| {
            ["id", "_id"]
                .iter()
                .find_map(|key| field(&user, key).and_then(id_string))
        }))
    }
}
