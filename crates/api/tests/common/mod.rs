#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use biolabel_api::auth::jwt::{generate_access_token, JwtConfig};
use biolabel_api::config::ServerConfig;
use biolabel_api::router::build_app_router;
use biolabel_api::state::AppState;
use biolabel_core::review::ReviewMode;
use biolabel_db::models::record::CreateRecord;
use biolabel_db::repositories::RecordRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(review_mode: ReviewMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        review_mode,
        max_review_page_size: 100,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router (classification mode) on `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_mode(pool, ReviewMode::Classification)
}

/// Build the full application router with the given review mode.
pub fn build_test_app_with_mode(pool: PgPool, review_mode: ReviewMode) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(test_config(review_mode)),
    };
    build_app_router(state)
}

/// Mint a bearer token the test app accepts.
pub fn token_for(user_id: i64, role: &str) -> String {
    let config = test_config(ReviewMode::Classification).jwt;
    generate_access_token(user_id, role, &config).expect("token generation should succeed")
}

/// Insert records `(key, exam_uid, position)` directly through the repository.
pub async fn seed_records(pool: &PgPool, records: &[(&str, &str, i32)]) {
    let input: Vec<CreateRecord> = records
        .iter()
        .map(|(key, exam_uid, position)| CreateRecord {
            key: key.to_string(),
            exam_uid: exam_uid.to_string(),
            position: *position,
            dataset_id: None,
            label: None,
        })
        .collect();
    RecordRepo::ingest(pool, &input)
        .await
        .expect("seeding records should succeed");
}

/// Look up a seeded record's id by key.
pub async fn record_id(pool: &PgPool, key: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM records WHERE key = $1")
        .bind(key)
        .fetch_one(pool)
        .await
        .expect("record should exist")
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
