use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use seventv_client::test_support::FakeUpstream;
use tower::ServiceExt;

use crate::app::SharedState;
use crate::config::AppConfig;
use crate::server::router::create_router;

const BY_PATH: &str = "/7tv/v3/users/twitch/148903664";
const BY_QUERY: &str = "/7tv/v3/users/twitch?id=148903664";
const IDENTITY: &str = "/ivr/v2/twitch/user?login=asrus12";

fn router_for(upstream: &FakeUpstream) -> Router {
    let config = AppConfig {
        identity_api_url: upstream.identity_endpoint(),
        seventv_api_url: upstream.seventv_base(),
        ..AppConfig::default()
    };
    create_router(SharedState::with_resolver(
        config,
        upstream.resolver().unwrap(),
    ))
}

async fn call(router: Router, method: Method, uri: &str) -> (StatusCode, header::HeaderMap, Vec<u8>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, header::HeaderMap, Value) {
    let (status, headers, body) = call(router, Method::GET, uri).await;
    (status, headers, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn missing_identifiers_is_400() {
    let upstream = FakeUpstream::builder().start().await.unwrap();

    for uri in ["/api/7tv", "/api/7tv?user_id=&login=", "/api/7tv?other=1"] {
        let (status, headers, body) = get_json(router_for(&upstream), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            body,
            json!({ "ok": false, "error": "Use ?user_id=... ou ?login=..." })
        );
        assert!(headers.get(header::CACHE_CONTROL).is_none());
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
    assert!(upstream.hits().is_empty());
}

#[tokio::test]
async fn unresolvable_login_is_404() {
    let upstream = FakeUpstream::builder()
        .json(IDENTITY, 404, json!({ "error": "not found" }))
        .start()
        .await
        .unwrap();

    let (status, _, body) = get_json(router_for(&upstream), "/api/7tv?login=AsRus12").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "ok": false, "error": "user_id não encontrado" }));
}

#[tokio::test]
async fn unknown_7tv_user_is_404() {
    let upstream = FakeUpstream::builder().start().await.unwrap();

    let (status, headers, body) =
        get_json(router_for(&upstream), "/api/7tv?user_id=148903664&login=asrus12").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "ok": false, "error": "Usuário 7TV não encontrado" })
    );
    assert!(headers.get(header::CACHE_CONTROL).is_none());
    assert_eq!(upstream.hits().len(), 3);
}

#[tokio::test]
async fn malformed_identity_response_is_500() {
    let upstream = FakeUpstream::builder()
        .raw(IDENTITY, 200, "<!doctype html>")
        .start()
        .await
        .unwrap();

    let (status, _, body) = get_json(router_for(&upstream), "/api/7tv?login=asrus12").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().starts_with("JSON parse error"));
}

#[tokio::test]
async fn success_envelope_with_cache_headers() {
    let upstream = FakeUpstream::builder()
        .json(BY_PATH, 500, json!({}))
        .json(
            BY_QUERY,
            200,
            json!({
                "username": "asrus12",
                "display_name": "Asrus12",
                "style": {
                    "paint_id": "p1",
                    "badges": [{ "images": [{ "size": "2x", "url": "http://x/2x.png" }] }]
                }
            }),
        )
        .json("/7tv/v3/paints/p1", 200, json!({ "fn": "linear-gradient", "colors": [1] }))
        .start()
        .await
        .unwrap();

    let (status, headers, body) =
        get_json(router_for(&upstream), "/api/7tv?user_id=148903664").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CACHE_CONTROL],
        "public, s-maxage=300, stale-while-revalidate=300"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        body,
        json!({
            "ok": true,
            "user_id": "148903664",
            "login": "asrus12",
            "display_name": "Asrus12",
            "paint": { "function": "linear-gradient", "angle": 90, "colors": [1] },
            "badges": [{ "name": "7TV Badge", "urls": [["2x", "http://x/2x.png"]] }]
        })
    );
    assert_eq!(upstream.hits(), vec![BY_PATH, BY_QUERY, "/7tv/v3/paints/p1"]);
}

#[tokio::test]
async fn success_without_names_omits_them() {
    let upstream = FakeUpstream::builder()
        .json(BY_PATH, 200, json!({ "style": { "paint": null } }))
        .start()
        .await
        .unwrap();

    let (status, _, body) = get_json(router_for(&upstream), "/api/7tv?user_id=148903664").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "ok": true, "user_id": "148903664", "paint": null, "badges": [] })
    );
}

#[tokio::test]
async fn configured_ttl_drives_cache_control() {
    let upstream = FakeUpstream::builder()
        .json(BY_PATH, 200, json!({ "username": "asrus12" }))
        .start()
        .await
        .unwrap();
    let config = AppConfig {
        seventv_api_url: upstream.seventv_base(),
        cache_ttl_seconds: 60,
        ..AppConfig::default()
    };
    let router = create_router(SharedState::with_resolver(
        config,
        upstream.resolver().unwrap(),
    ));

    let (_, headers, _) = get_json(router, "/api/7tv?user_id=148903664").await;
    assert_eq!(
        headers[header::CACHE_CONTROL],
        "public, s-maxage=60, stale-while-revalidate=60"
    );
}

#[tokio::test]
async fn options_preflight_is_204_with_cors() {
    let upstream = FakeUpstream::builder().start().await.unwrap();

    let (status, headers, body) = call(router_for(&upstream), Method::OPTIONS, "/api/7tv").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert!(upstream.hits().is_empty());
}

#[tokio::test]
async fn other_methods_get_the_lookup_envelope() {
    let upstream = FakeUpstream::builder()
        .json(BY_PATH, 200, json!({ "username": "asrus12" }))
        .start()
        .await
        .unwrap();

    let (status, headers, body) =
        call(router_for(&upstream), Method::POST, "/api/7tv?user_id=148903664").await;
    let body: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["login"], "asrus12");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

    let (status, _, body) = call(router_for(&upstream), Method::DELETE, "/api/7tv").await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "ok": false, "error": "Use ?user_id=... ou ?login=..." })
    );
}

#[tokio::test]
async fn repeated_parameters_use_first_non_blank_value() {
    let upstream = FakeUpstream::builder()
        .json(BY_PATH, 200, json!({ "username": "asrus12" }))
        .start()
        .await
        .unwrap();

    let (status, _, body) = get_json(
        router_for(&upstream),
        "/api/7tv?user_id=&user_id=148903664&user_id=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "148903664");
    assert_eq!(upstream.hits(), vec![BY_PATH]);
}

#[test]
fn first_param_skips_blank_and_other_keys() {
    let params = vec![
        ("login".to_string(), "  ".to_string()),
        ("user_id".to_string(), "1".to_string()),
        ("login".to_string(), "asrus12".to_string()),
        ("login".to_string(), "other".to_string()),
    ];
    assert_eq!(super::first_param(&params, "login"), Some("asrus12"));
    assert_eq!(super::first_param(&params, "user_id"), Some("1"));
    assert_eq!(super::first_param(&params, "missing"), None);
}
