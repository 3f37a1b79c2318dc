//! Shared test harness: a router over a temp-file SQLite database

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use caresite_server::{AppState, Config, api};

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: tempfile::TempDir,
}

/// Build a full application over a fresh temp-file database
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("caresite-test.db");
    let config = Config {
        database_url: format!("sqlite:{}", db_path.display()),
        http_port: 0,
        jwt_secret: "integration-test-secret-32-chars!!!!".into(),
        environment: "development".into(),
    };
    let state = AppState::new(&config).await.expect("initialize state");
    TestApp {
        app: api::router(state.clone()),
        state,
        _dir: dir,
    }
}

/// Send a request through the router and return (status, parsed body)
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).expect("encode body"))),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.clone().oneshot(request).await.expect("send request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse body as JSON")
    };
    (status, body)
}

/// Register an account with standard test data; returns the signup response
pub async fn signup(app: &Router, email: &str, category: &str) -> Value {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "email": email,
            "password": "Xx123456!",
            "password_confirm": "Xx123456!",
            "name": "Dr A",
            "category": category,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    body
}

/// Access token from a signup/login response body
pub fn access_token(body: &Value) -> String {
    body["tokens"]["access"]
        .as_str()
        .expect("access token in response")
        .to_string()
}
