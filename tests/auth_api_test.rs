mod common;

use axum::http::StatusCode;
use common::*;
use recruitment_backoffice::{routes::build_router, AppState};
use serde_json::json;

#[tokio::test]
async fn login_token_resolves_to_same_user() {
    let (app, state) = setup_app();
    let token = login(&app, RECRUITER_EMAIL, RECRUITER_PASSWORD).await;

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let expected = state
        .user_service
        .find_by_email(RECRUITER_EMAIL)
        .unwrap()
        .unwrap();
    assert_eq!(body["user"]["id"].as_i64(), Some(expected.id));
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn login_email_is_case_insensitive() {
    let (app, _) = setup_app();
    let token = login(&app, "Recruiter@Agency.TEST", RECRUITER_PASSWORD).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn wrong_password_is_unauthenticated_without_token() {
    let (app, _) = setup_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": RECRUITER_EMAIL, "password": "not-the-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("token").is_none());

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@agency.test", "password": "whatever" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let (app, _) = setup_app();

    let (status, body) = send(&app, "GET", "/api/candidates", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization");

    let (status, _) = send(&app, "GET", "/api/candidates", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Unauthenticated takes precedence over role checks.
    let (status, _) = send(&app, "GET", "/api/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_is_forbidden_from_admin_routes() {
    let (app, _) = setup_app();
    let token = login(&app, RECRUITER_EMAIL, RECRUITER_PASSWORD).await;

    let (status, body) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, _) = send(
        &app,
        "POST",
        "/api/leads",
        Some(&token),
        Some(json!({
            "name": "Initech",
            "contactPerson": "Bill Lumbergh",
            "email": "bill@initech.test",
            "phone": "555-0100",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", "/api/users/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_can_manage_users() {
    let (app, _) = setup_app();
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "username": "newhire",
            "email": "newhire@agency.test",
            "password": "initial-password",
            "firstName": "New",
            "lastName": "Hire",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "user");
    assert_eq!(body["passwordChangeRequired"], true);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/users/{}", id),
        Some(&token),
        Some(json!({ "role": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");
    assert_eq!(body["username"], "newhire");

    let (status, body) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = send(&app, "DELETE", &format!("/api/users/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/api/users/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() {
    let (app, _) = setup_app();
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "username": "RECRUITER",
            "email": "other@agency.test",
            "password": "initial-password",
            "firstName": "Dup",
            "lastName": "Name",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/api/users",
        Some(&token),
        Some(json!({
            "username": "someone",
            "email": "Recruiter@Agency.test",
            "password": "initial-password",
            "firstName": "Dup",
            "lastName": "Email",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn admin_cannot_delete_own_account() {
    let (app, state) = setup_app();
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let admin = state.user_service.find_by_email(ADMIN_EMAIL).unwrap().unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/users/{}", admin.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleted_user_token_stops_resolving() {
    let (app, state) = setup_app();
    let token = login(&app, RECRUITER_EMAIL, RECRUITER_PASSWORD).await;
    let recruiter = state
        .user_service
        .find_by_email(RECRUITER_EMAIL)
        .unwrap()
        .unwrap();
    state.user_service.delete(recruiter.id).unwrap();

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn seeded_admin_must_change_password_first() {
    let state = AppState::new(test_config());
    let seeded = state
        .user_service
        .seed_admin(&state.config)
        .unwrap()
        .expect("admin seeded");
    assert!(seeded.password_change_required);
    assert!(state.user_service.seed_admin(&state.config).unwrap().is_none());
    let app = build_router(state);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["passwordChangeRequired"], true);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/clients", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "password_change_required");

    let (status, _) = send(&app, "GET", "/api/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/change-password",
        Some(&token),
        Some(json!({ "currentPassword": "wrong-password", "newPassword": "brand-new-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/change-password",
        Some(&token),
        Some(json!({ "currentPassword": ADMIN_PASSWORD, "newPassword": "brand-new-secret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["passwordChangeRequired"], false);

    let (status, _) = send(&app, "GET", "/api/clients", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    login(&app, ADMIN_EMAIL, "brand-new-secret").await;
}

#[tokio::test]
async fn short_new_password_is_rejected() {
    let (app, _) = setup_app();
    let token = login(&app, RECRUITER_EMAIL, RECRUITER_PASSWORD).await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/change-password",
        Some(&token),
        Some(json!({ "currentPassword": RECRUITER_PASSWORD, "newPassword": "short" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
