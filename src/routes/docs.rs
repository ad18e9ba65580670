use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    application_dto::{ApprovalResponse, CreateApplicationPayload, UpdateApplicationStatusPayload},
    candidate_dto::{CreateCandidatePayload, CvPreviewResponse, UpdateCandidatePayload},
    client_dto::{CreateClientPayload, UpdateClientPayload},
    user_dto::{
        ChangePasswordRequest, CreateUserPayload, LoginRequest, LoginResponse, MeResponse,
        UpdateUserPayload,
    },
};
use crate::models::{
    application::{Application, ApplicationStatus},
    candidate::{Candidate, CandidateStatus},
    client::{Client, ClientStatus},
    profile::{EducationEntry, ExperienceEntry},
    user::{User, UserRole},
};
use crate::routes::{applications, auth, candidate_routes, clients, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::me,
        auth::change_password,
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        clients::list_clients,
        clients::create_client,
        clients::create_lead,
        clients::get_client,
        clients::update_client,
        clients::delete_client,
        candidate_routes::list_candidates,
        candidate_routes::create_candidate,
        candidate_routes::get_candidate,
        candidate_routes::update_candidate,
        candidate_routes::delete_candidate,
        candidate_routes::get_cv_preview,
        applications::submit_application,
        applications::list_applications,
        applications::get_application,
        applications::update_application_status,
        applications::approve_application,
        applications::reject_application,
        applications::delete_application,
    ),
    components(schemas(
        User,
        UserRole,
        Client,
        ClientStatus,
        Candidate,
        CandidateStatus,
        Application,
        ApplicationStatus,
        ExperienceEntry,
        EducationEntry,
        LoginRequest,
        LoginResponse,
        MeResponse,
        ChangePasswordRequest,
        CreateUserPayload,
        UpdateUserPayload,
        CreateClientPayload,
        UpdateClientPayload,
        CreateCandidatePayload,
        UpdateCandidatePayload,
        CvPreviewResponse,
        CreateApplicationPayload,
        UpdateApplicationStatusPayload,
        ApprovalResponse,
    )),
    tags((name = "recruitment-backoffice", description = "Recruitment back-office API"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
