//! Runtime application configuration loaded from the environment.

use super::defaults::{DEFAULT_CACHE_TTL_SECONDS, DEFAULT_SERVER_PORT, get_default};
use super::validation::validate_setting;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_port: u16,
    pub identity_api_url: String,
    pub seventv_api_url: String,
    pub cache_ttl_seconds: u32,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let d = |key: &str| get_default(key).unwrap_or_default().to_string();
        Self {
            server_port: DEFAULT_SERVER_PORT,
            identity_api_url: d("IDENTITY_API_URL"),
            seventv_api_url: d("SEVENTV_API_URL"),
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            user_agent: d("HTTP_USER_AGENT"),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset or blank keys fall back to their defaults; set values must pass
    /// validation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> Result<Option<String>, anyhow::Error> {
            let Some(value) = lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
            else {
                return Ok(None);
            };
            validate_setting(key, &value).map_err(|e| anyhow::anyhow!("{key}: {e}"))?;
            Ok(Some(value))
        };

        let defaults = Self::default();

        // SERVER_PORT wins over the PORT most hosts inject.
        let port = match g("SERVER_PORT")? {
            Some(v) => Some(v),
            None => lookup("PORT")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| {
                    validate_setting("SERVER_PORT", &v)
                        .map(|()| v)
                        .map_err(|e| anyhow::anyhow!("PORT: {e}"))
                })
                .transpose()?,
        };

        Ok(Self {
            server_port: port
                .map(|v| v.parse::<u16>())
                .transpose()?
                .unwrap_or(defaults.server_port),
            identity_api_url: g("IDENTITY_API_URL")?.unwrap_or(defaults.identity_api_url),
            seventv_api_url: g("SEVENTV_API_URL")?.unwrap_or(defaults.seventv_api_url),
            cache_ttl_seconds: g("CACHE_TTL_SECONDS")?
                .map(|v| v.parse::<u32>())
                .transpose()?
                .unwrap_or(defaults.cache_ttl_seconds),
            user_agent: g("HTTP_USER_AGENT")?.unwrap_or(defaults.user_agent),
        })
    }

    /// `Cache-Control` value for successful lookups.
    pub fn cache_control(&self) -> String {
        format!(
            "public, s-maxage={ttl}, stale-while-revalidate={ttl}",
            ttl = self.cache_ttl_seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, anyhow::Error> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.identity_api_url, "https://api.ivr.fi/v2/twitch/user");
        assert_eq!(config.seventv_api_url, "https://7tv.io/v3");
        assert_eq!(config.user_agent, "vercel-7tv-overlay/1.0");
    }

    #[test]
    fn default_cache_control_is_five_minutes() {
        assert_eq!(
            AppConfig::default().cache_control(),
            "public, s-maxage=300, stale-while-revalidate=300"
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("SERVER_PORT", "9000"),
            ("SEVENTV_API_URL", "http://localhost:1234/v3"),
            ("CACHE_TTL_SECONDS", "60"),
            ("HTTP_USER_AGENT", "overlay-test/0.1"),
        ])
        .unwrap();
        assert_eq!(config.server_port, 9000);
        assert_eq!(config.seventv_api_url, "http://localhost:1234/v3");
        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.user_agent, "overlay-test/0.1");
    }

    #[test]
    fn port_fallback_and_precedence() {
        assert_eq!(load(&[("PORT", "3000")]).unwrap().server_port, 3000);
        assert_eq!(
            load(&[("PORT", "3000"), ("SERVER_PORT", "4000")])
                .unwrap()
                .server_port,
            4000
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("CACHE_TTL_SECONDS", "  ")]).unwrap();
        assert_eq!(config.cache_ttl_seconds, 300);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = load(&[("CACHE_TTL_SECONDS", "forever")]).unwrap_err();
        assert!(err.to_string().starts_with("CACHE_TTL_SECONDS:"));

        let err = load(&[("PORT", "0")]).unwrap_err();
        assert!(err.to_string().starts_with("PORT:"));
    }
}
