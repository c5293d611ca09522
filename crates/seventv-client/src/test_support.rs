//! In-process fake of the identity service and the 7TV API.
//!
//! Serves canned responses keyed by `path?query` from an axum router bound
//! to an ephemeral localhost port, and records every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::api::SevenTvClient;
use crate::identity::IdentityClient;
use crate::resolver::CosmeticsResolver;
use crate::{ClientError, DEFAULT_USER_AGENT};

/// Path prefix the fake identity endpoint lives under.
pub const IDENTITY_PATH: &str = "/ivr/v2/twitch/user";
/// Path prefix of the fake 7TV API.
pub const SEVENTV_PATH: &str = "/7tv/v3";

struct Inner {
    routes: HashMap<String, (StatusCode, String)>,
    hits: Mutex<Vec<String>>,
}

/// Canned responses for a [`FakeUpstream`].
#[derive(Default)]
pub struct FakeUpstreamBuilder {
    routes: HashMap<String, (StatusCode, String)>,
}

impl FakeUpstreamBuilder {
    /// Serve `body` as JSON for `path_and_query`.
    pub fn json(self, path_and_query: &str, status: u16, body: Value) -> Self {
        self.raw(path_and_query, status, &body.to_string())
    }

    /// Serve a raw body for `path_and_query`.
    pub fn raw(mut self, path_and_query: &str, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.routes
            .insert(path_and_query.to_string(), (status, body.to_string()));
        self
    }

    pub async fn start(self) -> std::io::Result<FakeUpstream> {
        let inner = Arc::new(Inner {
            routes: self.routes,
            hits: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(respond).with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Fake upstream failed: {e}");
            }
        });

        Ok(FakeUpstream {
            base: format!("http://{addr}"),
            inner,
            handle,
        })
    }
}

/// A running fake upstream. Stops when dropped.
pub struct FakeUpstream {
    base: String,
    inner: Arc<Inner>,
    handle: JoinHandle<()>,
}

impl FakeUpstream {
    pub fn builder() -> FakeUpstreamBuilder {
        FakeUpstreamBuilder::default()
    }

    pub fn identity_endpoint(&self) -> String {
        format!("{}{IDENTITY_PATH}", self.base)
    }

    pub fn seventv_base(&self) -> String {
        format!("{}{SEVENTV_PATH}", self.base)
    }

    /// Every `path?query` requested so far, in order.
    pub fn hits(&self) -> Vec<String> {
        self.inner
            .hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A resolver wired to this fake.
    pub fn resolver(&self) -> Result<CosmeticsResolver, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .no_proxy()
            .build()?;
        Ok(CosmeticsResolver::new(
            IdentityClient::new(http.clone(), &self.identity_endpoint())?,
            SevenTvClient::new(http, &self.seventv_base())?,
        ))
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn respond(State(inner): State<Arc<Inner>>, uri: Uri) -> Response {
    let key = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    inner
        .hits
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(key.clone());

    match inner.routes.get(&key) {
        Some((status, body)) => (
            *status,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "{}").into_response(),
    }
}
