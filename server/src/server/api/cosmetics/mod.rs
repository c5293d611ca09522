//! 7TV paint/badge lookup for overlays.
//!
//! `GET /api/7tv?user_id=148903664` or `GET /api/7tv?login=asrus12`.

#[cfg(test)]
mod tests;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use seventv_client::resolver::{ResolveError, ResolvedCosmetics, UserQuery};

use super::err_json;
use crate::app::SharedState;

/// First non-blank value of `key`; repeated keys do not fail the request.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .find(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
struct CosmeticsResponse {
    ok: bool,
    #[serde(flatten)]
    cosmetics: ResolvedCosmetics,
}

/// Failures of a cosmetics lookup, as reported to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CosmeticsApiError {
    #[error("Use ?user_id=... ou ?login=...")]
    MissingIdentifier,

    #[error("user_id não encontrado")]
    IdentityNotFound,

    #[error("Usuário 7TV não encontrado")]
    UserNotFound,

    #[error("Query string inválida: {0}")]
    InvalidQuery(String),

    #[error("{0}")]
    Internal(String),
}

impl CosmeticsApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingIdentifier | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::IdentityNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResolveError> for CosmeticsApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::IdentityNotFound => Self::IdentityNotFound,
            ResolveError::UserNotFound => Self::UserNotFound,
            ResolveError::Client(e) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for CosmeticsApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(message) = &self {
            tracing::warn!("Cosmetics lookup failed: {message}");
        }
        err_json(self.status().as_u16(), &self.to_string()).into_response()
    }
}

/// `OPTIONS /api/7tv` — CORS preflight; headers come from the router.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `GET /api/7tv`; every method other than `OPTIONS` is served the same way.
pub async fn get_cosmetics(
    State(state): State<SharedState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, CosmeticsApiError> {
    let Query(params) = query.map_err(|e| CosmeticsApiError::InvalidQuery(e.body_text()))?;
    let user_query = UserQuery::from_params(
        first_param(&params, "user_id"),
        first_param(&params, "login"),
    )
    .ok_or(CosmeticsApiError::MissingIdentifier)?;

    let cosmetics = state.resolver().resolve(&user_query).await?;

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, state.config().cache_control())],
        Json(CosmeticsResponse {
            ok: true,
            cosmetics,
        }),
    )
        .into_response())
}
