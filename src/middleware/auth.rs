use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::Error;
use crate::models::user::{User, UserRole};
use crate::AppState;

/// Authenticated caller, inserted into request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Endpoints still reachable while a password rotation is pending.
const PASSWORD_CHANGE_ALLOWED: [&str; 2] = ["/api/auth/me", "/api/auth/change-password"];

fn bearer_token(req: &Request) -> Result<&str, Error> {
    let Some(auth_header) = req.headers().get(AUTHORIZATION) else {
        return Err(Error::Unauthorized("missing_authorization".into()));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(Error::Unauthorized("bad_authorization".into()));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(Error::Unauthorized("unsupported_scheme".into()));
    };
    Ok(token.trim())
}

/// Resolves the bearer token to a stored user and enforces forced password
/// rotation server-side.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let user = match bearer_token(&req).and_then(|token| state.auth_service.resolve(token)) {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    if user.password_change_required && !PASSWORD_CHANGE_ALLOWED.contains(&req.uri().path()) {
        return Error::Forbidden("password_change_required".into()).into_response();
    }

    req.extensions_mut().insert(CurrentUser(user));
    next.run(req).await
}

/// Must run after [`require_auth`]. The role comes from the stored user, not
/// the token claims, so demotions apply immediately.
pub async fn require_admin(req: Request, next: Next) -> Response {
    let Some(CurrentUser(user)) = req.extensions().get::<CurrentUser>() else {
        return Error::Unauthorized("missing_authorization".into()).into_response();
    };
    if user.role != UserRole::Admin {
        tracing::warn!(user_id = user.id, path = %req.uri().path(), "non-admin hit admin route");
        return Error::Forbidden("forbidden".into()).into_response();
    }
    next.run(req).await
}
