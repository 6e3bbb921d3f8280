mod common;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use jobscope_client::{ApiClient, ApiError, ClientConfig};
use reqwest::Request;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde_json::{Value, json};
use std::error::Error as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Deserialize, PartialEq)]
struct Point {
    x: i32,
}

/// Client with the default interceptor.
fn client(base_url: String, timeout: Duration) -> ApiClient {
    ApiClient::new(ClientConfig { base_url, timeout }).unwrap()
}

/// One route per envelope and transport outcome.
fn envelope_router() -> Router {
    Router::new()
        .route("/ok", get(|| async { Json(json!({"code": 200, "msg": "ok", "data": {"x": 1}})) }))
        .route("/boom", get(|| async { Json(json!({"code": 500, "msg": "boom"})) }))
        .route("/silent", get(|| async { Json(json!({"code": 500})) }))
        .route("/unavailable", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/html", get(|| async { "<html>not json</html>" }))
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({"code": 200, "data": null}))
            }),
        )
        .route(
            "/echo",
            post(|Json(body): Json<Value>| async move { Json(json!({"code": 200, "data": body})) }),
        )
}

#[tokio::test]
async fn test_success_envelope_resolves_to_data() {
    let api = client(common::serve(envelope_router()).await, Duration::from_secs(5));
    let point: Point = api.get("/ok").await.unwrap();
    assert_eq!(point, Point { x: 1 });
}

#[tokio::test]
async fn test_failed_envelope_rejects_with_server_message() {
    let api = client(common::serve(envelope_router()).await, Duration::from_secs(5));
    let err = api.get::<Value>("/boom").await.unwrap_err();
    assert_eq!(err.code(), Some(500));
    assert_eq!(err.message(), "boom");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_failed_envelope_without_message_uses_fallback() {
    let api = client(common::serve(envelope_router()).await, Duration::from_secs(5));
    let err = api.get::<Value>("/silent").await.unwrap_err();
    assert_eq!(err.message(), "Error");
}

#[tokio::test]
async fn test_non_2xx_status_is_a_transport_failure_with_source() {
    let api = client(common::serve(envelope_router()).await, Duration::from_secs(5));
    let err = api.get::<Value>("/unavailable").await.unwrap_err();
    match &err {
        ApiError::Status { status, .. } => assert_eq!(*status, StatusCode::SERVICE_UNAVAILABLE),
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(err.is_transport());
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_unparsable_body_is_a_decode_failure() {
    let api = client(common::serve(envelope_router()).await, Duration::from_secs(5));
    let err = api.get::<Value>("/html").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_failure() {
    let api = client(common::closed_port().await, Duration::from_secs(5));
    let err = api.get::<Value>("/ok").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    assert!(err.source().is_some());
}

#[tokio::test]
async fn test_timeout_rejects_without_waiting_for_the_server() {
    let api = client(common::serve(envelope_router()).await, Duration::from_millis(200));
    let started = Instant::now();
    let err = api.get::<Value>("/slow").await.unwrap_err();

    assert!(err.is_timeout(), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(err.to_string(), "request timed out after 200ms");
}

#[tokio::test]
async fn test_zero_timeout_means_no_limit() {
    let api = client(common::serve(envelope_router()).await, Duration::ZERO);
    let point: Point = api.get("/ok").await.unwrap();
    assert_eq!(point, Point { x: 1 });
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let router = Router::new().nest("/v1", envelope_router());
    let base = format!("{}/v1/", common::serve(router).await);
    let api = client(base, Duration::from_secs(5));
    let point: Point = api.get("/ok").await.unwrap();
    assert_eq!(point.x, 1);
}

#[tokio::test]
async fn test_post_sends_body_unchanged() {
    let api = client(common::serve(envelope_router()).await, Duration::from_secs(5));
    let body = json!({"searchTerm": "milk", "nested": [1, 2, 3]});
    let echoed: Value = api.post("/echo", &body).await.unwrap();
    assert_eq!(echoed, body);
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let api = client(common::serve(envelope_router()).await, Duration::from_secs(5));
    let body = json!({"n": 7});
    let (ok, boom, echo) = tokio::join!(
        api.get::<Point>("/ok"),
        api.get::<Value>("/boom"),
        api.post::<Value, _>("/echo", &body),
    );
    assert_eq!(ok.unwrap(), Point { x: 1 });
    assert_eq!(boom.unwrap_err().message(), "boom");
    assert_eq!(echo.unwrap(), json!({"n": 7}));
}

/// Requests that reached the server.
#[derive(Clone, Default)]
struct Hits(Arc<AtomicUsize>);

/// Echoes the `authorization` header, or `anonymous`, and counts hits.
fn header_router(hits: Hits) -> Router {
    Router::new()
        .route(
            "/whoami",
            get(|State(hits): State<Hits>, headers: HeaderMap| async move {
                hits.0.fetch_add(1, Ordering::SeqCst);
                let token = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("anonymous")
                    .to_string();
                Json(json!({"code": 200, "data": token}))
            }),
        )
        .with_state(hits)
}

#[tokio::test]
async fn test_interceptor_can_inject_headers() {
    let base = common::serve(header_router(Hits::default())).await;
    let config = ClientConfig {
        base_url: base,
        timeout: Duration::from_secs(5),
    };

    let plain = ApiClient::new(config.clone()).unwrap();
    assert_eq!(plain.get::<String>("/whoami").await.unwrap(), "anonymous");

    let authed = ApiClient::with_interceptor(config, |mut request: Request| -> Result<Request, ApiError> {
        request
            .headers_mut()
            .insert("authorization", HeaderValue::from_static("Bearer abc"));
        Ok(request)
    })
    .unwrap();
    assert_eq!(authed.get::<String>("/whoami").await.unwrap(), "Bearer abc");
}

#[tokio::test]
async fn test_interceptor_rejection_sends_nothing() {
    let hits = Hits::default();
    let base = common::serve(header_router(hits.clone())).await;
    let api = ApiClient::with_interceptor(
        ClientConfig {
            base_url: base,
            timeout: Duration::from_secs(5),
        },
        |_: Request| -> Result<Request, ApiError> {
            Err(ApiError::Intercepted("signed out".to_string()))
        },
    )
    .unwrap();

    let err = api.get::<String>("/whoami").await.unwrap_err();
    assert!(matches!(err, ApiError::Intercepted(_)));
    assert_eq!(hits.0.load(Ordering::SeqCst), 0);
}
