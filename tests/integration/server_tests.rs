use crate::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use poetry_relay::server::{build_router, AppState, ErrorResponse};
use poetry_relay::PoemRecord;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_app(upstream: &str) -> Router {
    let config = create_test_config(upstream, None);
    let state = AppState::from_config(&config).expect("Failed to build state");
    build_router(state)
}

fn request(method: &str, uri: &str, origin: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(origin) = origin {
        builder = builder.header("origin", origin);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_preflight_from_any_origin() {
    let app = create_app("http://127.0.0.1:1");

    let response = app
        .oneshot(request("OPTIONS", "/patreon-poetry", Some("https://elsewhere.example")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(headers["access-control-allow-methods"], "GET, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-max-age"], "86400");
}

#[tokio::test]
async fn test_missing_or_wrong_origin_is_forbidden() {
    let app = create_app("http://127.0.0.1:1");

    let response = app
        .clone()
        .oneshot(request("GET", "/test", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get("access-control-allow-origin").is_none());
    assert_eq!(body_string(response).await, "Forbidden");

    let response = app
        .oneshot(request("GET", "/test", Some("https://evil.example")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_plain_routes_carry_cors_headers() {
    let app = create_app("http://127.0.0.1:1");

    let response = app
        .clone()
        .oneshot(request("GET", "/test", Some(ALLOWED_ORIGIN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(response.headers()["vary"], "Origin");
    assert_eq!(body_string(response).await, "Worker is operational.");

    let response = app
        .oneshot(request("GET", "/", Some(ALLOWED_ORIGIN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Worker root path accessed.");
}

#[tokio::test]
async fn test_trailing_slashes_are_normalized() {
    let app = create_app("http://127.0.0.1:1");

    let response = app
        .oneshot(request("GET", "/test///", Some(ALLOWED_ORIGIN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "Worker is operational.");
}

#[tokio::test]
async fn test_other_methods_are_not_allowed_but_keep_cors() {
    let app = create_app("http://127.0.0.1:1");

    let response = app
        .oneshot(request("POST", "/test", Some(ALLOWED_ORIGIN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["access-control-allow-origin"], ALLOWED_ORIGIN);
}

#[tokio::test]
async fn test_head_is_answered_like_get() {
    let app = create_app("http://127.0.0.1:1");

    let response = app
        .oneshot(request("HEAD", "/test", Some(ALLOWED_ORIGIN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], ALLOWED_ORIGIN);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = create_app("http://127.0.0.1:1");

    let response = app
        .oneshot(request("GET", "/poems", Some(ALLOWED_ORIGIN)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()["access-control-allow-origin"], ALLOWED_ORIGIN);
    assert_eq!(
        body_string(response).await,
        "Not Found - Path does not match any endpoint"
    );
}

#[tokio::test]
async fn test_feed_route_serves_poems() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POSTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                post_json("1", "Sonnet 1", "<p>Shall I</p> #poetry #sonnet"),
                post_json("2", "News", "<p>Tour dates</p>"),
            ],
            None,
        )))
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server.uri());
    let response = app
        .oneshot(request("GET", "/patreon-poetry/", Some(ALLOWED_ORIGIN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/json");
    assert_eq!(response.headers()["access-control-allow-origin"], ALLOWED_ORIGIN);

    let poems: Vec<PoemRecord> = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        poems,
        vec![PoemRecord {
            title: "Sonnet 1".to_string(),
            category: "Sonnet".to_string(),
            content: "<p>Shall I</p>".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_feed_route_maps_upstream_failure_to_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(POSTS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{"detail": "The access token is invalid."}]
        })))
        .mount(&mock_server)
        .await;

    let app = create_app(&mock_server.uri());
    let response = app
        .oneshot(request("GET", "/patreon-poetry", Some(ALLOWED_ORIGIN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()["content-type"], "application/json");

    let body: ErrorResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body.error,
        "Failed to fetch posts from Patreon API: The access token is invalid."
    );
}
