#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use drippress_api::auth::jwt::{generate_access_token, JwtConfig};
use drippress_api::config::ServerConfig;
use drippress_api::hooks::default_hooks;
use drippress_api::permalink::PermalinkCache;
use drippress_api::routes;
use drippress_api::state::AppState;
use drippress_core::nonce::NonceSigner;
use drippress_core::plugin::NONCE_ACTION_STATUS;
use drippress_core::types::{DbId, Timestamp};
use drippress_db::models::post::{CreatePost, Post};
use drippress_db::models::user::{CreateUser, User};
use drippress_db::repositories::{PostRepo, UserRepo};
use drippress_events::EventBus;

pub const TEST_SITE_URL: &str = "http://site.test";
pub const TEST_NONCE_SECRET: &str = "test-nonce-secret";
pub const TEST_NONCE_LIFETIME_SECS: i64 = 86_400;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        site_url: TEST_SITE_URL.to_string(),
        assets_url: format!("{TEST_SITE_URL}/assets"),
        jquery_url: format!("{TEST_SITE_URL}/assets/js/jquery.min.js"),
        script_debug: false,
        supported_post_types: vec!["post".to_string()],
        nonce_secret: TEST_NONCE_SECRET.to_string(),
        nonce_lifetime_secs: TEST_NONCE_LIFETIME_SECS,
        jwt: JwtConfig {
            secret: "test-jwt-secret-that-is-long-enough".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the application state used by [`build_test_app`].
pub fn build_test_state(pool: PgPool) -> AppState {
    let config = test_config();
    let nonces = NonceSigner::new(config.nonce_secret.as_bytes(), config.nonce_lifetime_secs);

    AppState {
        pool,
        config: Arc::new(config),
        event_bus: Arc::new(EventBus::default()),
        hooks: Arc::new(default_hooks()),
        nonces: Arc::new(nonces),
        permalinks: Arc::new(PermalinkCache::new()),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// compression, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_state(build_test_state(pool))
}

pub fn build_app_with_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::front_end::router())
        .nest("/ajax", routes::ajax::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tokens and nonces
// ---------------------------------------------------------------------------

pub fn token_for(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).expect("token generation")
}

/// A nonce the test app accepts for `user_id` right now.
pub fn nonce_for(user_id: DbId) -> String {
    NonceSigner::new(TEST_NONCE_SECRET, TEST_NONCE_LIFETIME_SECS).create(
        NONCE_ACTION_STATUS,
        user_id,
        Utc::now(),
    )
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str, signup_at: Option<Timestamp>) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            signup_at,
        },
    )
    .await
    .expect("user creation should succeed")
}

pub async fn create_post(pool: &PgPool, slug: &str, content: &str, status: &str) -> Post {
    PostRepo::create(
        pool,
        &CreatePost {
            slug: slug.to_string(),
            title: format!("Lesson {slug}"),
            content: Some(content.to_string()),
            post_type: Some("post".to_string()),
            status: Some(status.to_string()),
        },
    )
    .await
    .expect("post creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a urlencoded form, optionally as a logged-in reader.
pub async fn post_form(
    app: Router,
    uri: &str,
    fields: &[(&str, String)],
    token: Option<&str>,
) -> Response {
    post_form_with_headers(app, uri, fields, token, &[]).await
}

/// Like [`post_form`], with extra request headers.
pub async fn post_form_with_headers(
    app: Router,
    uri: &str,
    fields: &[(&str, String)],
    token: Option<&str>,
    headers: &[(&str, &str)],
) -> Response {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    send(app, builder.body(Body::from(body)).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
