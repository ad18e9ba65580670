use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::application_dto::{
        ApprovalResponse, CreateApplicationPayload, UpdateApplicationStatusPayload,
    },
    error::Result,
    models::application::Application,
    AppState,
};

/// Public intake form. No token required.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application received", body = Application),
        (status = 400, description = "Invalid payload"),
        (status = 429, description = "Rate limit exceeded")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Json(payload): Json<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state.application_service.submit(payload)?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/applications",
    responses(
        (status = 200, description = "All applications", body = [Application])
    )
)]
#[axum::debug_handler]
pub async fn list_applications(State(state): State<AppState>) -> Result<Json<Vec<Application>>> {
    Ok(Json(state.application_service.list()?))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = Application),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Application>> {
    Ok(Json(state.application_service.get(id)?))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    request_body = UpdateApplicationStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = Application),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Transition not allowed")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<Json<Application>> {
    Ok(Json(
        state.application_service.update_status(id, payload.status)?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/approve",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application approved, candidate created", body = ApprovalResponse),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Already decided or candidate email taken")
    )
)]
#[axum::debug_handler]
pub async fn approve_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApprovalResponse>> {
    let (application, candidate) = state.application_service.approve(id)?;
    Ok(Json(ApprovalResponse {
        application,
        candidate,
    }))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/reject",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application rejected", body = Application),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Already decided")
    )
)]
#[axum::debug_handler]
pub async fn reject_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Application>> {
    Ok(Json(state.application_service.reject(id)?))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = i64, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
