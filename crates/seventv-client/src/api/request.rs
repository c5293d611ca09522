use serde_json::Value;
use url::Url;

use crate::ClientError;

/// Execute a GET and decode the body as JSON.
///
/// Non-success statuses become [`ClientError::ApiError`] carrying the body
/// text; transport failures and malformed JSON keep their own variants so
/// callers can tell them apart.
pub(crate) async fn get_json(http: &reqwest::Client, url: Url) -> Result<Value, ClientError> {
    let resp = http.get(url).send().await?;

    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ClientError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
