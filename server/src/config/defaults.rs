//! Setting keys and their default values.

use seventv_client::DEFAULT_USER_AGENT;
use seventv_client::api::SEVENTV_API_BASE;
use seventv_client::identity::IVR_TWITCH_USER_API_BASE;

pub const DEFAULT_SERVER_PORT: u16 = 8080;
/// Seconds for both `s-maxage` and `stale-while-revalidate`.
pub const DEFAULT_CACHE_TTL_SECONDS: u32 = 300;

/// `(key, default, description)` for every supported setting.
pub const SETTING_DEFS: &[(&str, &str, &str)] = &[
    ("SERVER_PORT", "8080", "HTTP listen port (PORT is accepted as a fallback)"),
    ("IDENTITY_API_URL", IVR_TWITCH_USER_API_BASE, "Twitch login -> user ID lookup endpoint"),
    ("SEVENTV_API_URL", SEVENTV_API_BASE, "7TV REST API base URL"),
    ("CACHE_TTL_SECONDS", "300", "CDN cache window for successful lookups"),
    ("HTTP_USER_AGENT", DEFAULT_USER_AGENT, "User-Agent sent to upstream services"),
];

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    SETTING_DEFS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, default, _)| *default)
}
