//! Setting value validation.

use url::Url;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "SERVER_PORT" => {
            let v: u16 = value.parse().map_err(|_| "must be a port number")?;
            if v == 0 {
                return Err("must be between 1 and 65535".into());
            }
        }
        "IDENTITY_API_URL" | "SEVENTV_API_URL" => validate_http_url(value)?,
        "CACHE_TTL_SECONDS" => {
            let v: u32 = value.parse().map_err(|_| "must be an integer")?;
            if !(1..=86_400).contains(&v) {
                return Err("must be between 1 and 86400 seconds".into());
            }
        }
        "HTTP_USER_AGENT" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_http_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{other}' (expected http or https)")),
    }
}
