use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::client_dto::{CreateClientPayload, UpdateClientPayload},
    error::Result,
    models::client::Client,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/clients",
    responses(
        (status = 200, description = "All clients", body = [Client])
    )
)]
#[axum::debug_handler]
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>> {
    Ok(Json(state.client_service.list()?))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let client = state.client_service.create(payload)?;
    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    post,
    path = "/api/leads",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "Lead registered", body = Client),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Admin role required")
    )
)]
#[axum::debug_handler]
pub async fn create_lead(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let lead = state.client_service.create_lead(payload)?;
    Ok((StatusCode::CREATED, Json(lead)))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(
        ("id" = i64, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client found", body = Client),
        (status = 404, description = "Client not found")
    )
)]
#[axum::debug_handler]
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Client>> {
    Ok(Json(state.client_service.get(id)?))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    params(
        ("id" = i64, Path, description = "Client ID")
    ),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 404, description = "Client not found")
    )
)]
#[axum::debug_handler]
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateClientPayload>,
) -> Result<Json<Client>> {
    payload.validate()?;
    Ok(Json(state.client_service.update(id, payload)?))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(
        ("id" = i64, Path, description = "Client ID")
    ),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.client_service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
