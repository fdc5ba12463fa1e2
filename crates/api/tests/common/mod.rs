#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, Response};
use axum::Router;
use clubdir_api::config::ServerConfig;
use clubdir_api::router::build_app_router;
use clubdir_api::state::AppState;
use clubdir_core::store::ClubStore;
use clubdir_db::store::PgClubStore;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

pub const BOUNDARY: &str = "clubdir-test-boundary";

/// Build a test `ServerConfig` with safe defaults, spooling uploads into `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        default_admin_username: "admin".to_string(),
        default_admin_password: None,
    }
}

/// Full app against a real database, with the PostgreSQL club store.
pub fn build_test_app(pool: PgPool, upload_dir: &Path) -> Router {
    let store = Arc::new(PgClubStore::new(pool.clone()));
    build_app_with_store(pool, store, upload_dir)
}

/// Full app with an injected club store.
pub fn build_app_with_store(pool: PgPool, store: Arc<dyn ClubStore>, upload_dir: &Path) -> Router {
    let config = test_config(upload_dir);
    let state = AppState {
        pool,
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A pool that never connects, for tests that only touch the club store.
pub fn unused_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://clubdir@localhost:1/unused")
        .expect("lazy pool should build without connecting")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    json: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, json).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a multipart body with a single file part named `field`.
pub async fn upload(app: Router, field: &str, content: &[u8]) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"clubs.csv\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    post_multipart(app, body).await
}

/// POST a raw multipart body using [`BOUNDARY`].
pub async fn post_multipart(app: Router, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/bulk-upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Number of entries left in the upload spool directory.
pub fn spooled_files(dir: &Path) -> usize {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}
