#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use recruitment_backoffice::{
    config::Config,
    dto::user_dto::CreateUserPayload,
    models::user::{User, UserRole},
    routes::build_router,
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@agency.test";
pub const ADMIN_PASSWORD: &str = "admin-password-1";
pub const RECRUITER_EMAIL: &str = "recruiter@agency.test";
pub const RECRUITER_PASSWORD: &str = "recruiter-password-1";

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        jwt_secret: "test_secret_key".into(),
        token_ttl_hours: 1,
        public_rps: 1000,
        api_rps: 1000,
        admin_email: ADMIN_EMAIL.into(),
        admin_username: "admin".into(),
        admin_password: Some(ADMIN_PASSWORD.into()),
    }
}

fn create_user(state: &AppState, username: &str, email: &str, password: &str, role: UserRole) -> User {
    state
        .user_service
        .create(CreateUserPayload {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: "Test".into(),
            last_name: username.into(),
            role: Some(role),
            password_change_required: Some(false),
        })
        .expect("seed user")
}

/// Fresh app with an admin and a regular recruiter, neither forced to rotate
/// their password.
pub fn setup_app() -> (Router, AppState) {
    let state = AppState::new(test_config());
    create_user(&state, "admin", ADMIN_EMAIL, ADMIN_PASSWORD, UserRole::Admin);
    create_user(&state, "recruiter", RECRUITER_EMAIL, RECRUITER_PASSWORD, UserRole::User);
    (build_router(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().expect("token").to_string()
}

pub fn sarah_application() -> JsonValue {
    json!({
        "firstName": "Sarah",
        "lastName": "Johnson",
        "email": "s@x.com",
        "skills": ["Go"],
    })
}
