use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::Result, AppState};

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let tables = state.store.read()?;
    let body = json!({
        "status": "ok",
        "records": {
            "users": tables.users.len(),
            "clients": tables.clients.len(),
            "candidates": tables.candidates.len(),
            "applications": tables.applications.len(),
        },
    });
    Ok((StatusCode::OK, Json(body)))
}
