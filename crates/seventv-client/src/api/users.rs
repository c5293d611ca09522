use serde_json::Value;
use url::Url;

use super::SevenTvClient;
use super::request::get_json;
use crate::record::UserRecord;

impl SevenTvClient {
    /// Lookup URLs for a Twitch user, in the order they are tried.
    ///
    /// The login search is only included when a login is known.
    pub fn user_lookup_urls(&self, twitch_id: &str, login: Option<&str>) -> Vec<Url> {
        let mut urls = vec![self.endpoint(&["users", "twitch", twitch_id])];

        let mut by_query = self.endpoint(&["users", "twitch"]);
        by_query.query_pairs_mut().append_pair("id", twitch_id);
        urls.push(by_query);

        if let Some(login) = login {
            let mut search = self.endpoint(&["users"]);
            search
                .query_pairs_mut()
                .append_pair("platform", "TWITCH")
                .append_pair("query", &login.to_lowercase());
            urls.push(search);
        }

        urls
    }

    /// Find the 7TV user record for a Twitch user.
    ///
    /// Tries each lookup shape in turn and stops at the first response that
    /// looks like a user record. Failed tries are skipped; nothing is merged
    /// across tries.
    pub async fn find_user(&self, twitch_id: &str, login: Option<&str>) -> Option<UserRecord> {
        for url in self.user_lookup_urls(twitch_id, login) {
            let body = match get_json(&self.http, url.clone()).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(%url, "7TV user lookup skipped: {e}");
                    continue;
                }
            };
            if let Some(record) = UserRecord::from_body(body) {
                tracing::debug!(%url, "7TV user record found");
                return Some(record);
            }
            tracing::debug!(%url, "7TV user lookup returned no usable record");
        }
        None
    }

    /// Raw GET used by the by-reference fetches; any failure is `None`.
    pub(super) async fn get_optional(&self, url: Url) -> Option<Value> {
        match get_json(&self.http, url.clone()).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(%url, "7TV fetch failed: {e}");
                None
            }
        }
    }
}
