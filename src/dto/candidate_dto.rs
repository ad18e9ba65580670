use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::candidate::CandidateStatus;
use crate::models::profile::{EducationEntry, ExperienceEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub current_position: Option<String>,
    pub profile: Option<String>,
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub languages: Option<String>,
    pub certifications: Option<String>,
    pub summary: Option<String>,
    pub status: Option<CandidateStatus>,
    pub notes: Option<String>,
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub current_position: Option<String>,
    pub profile: Option<String>,
    pub linkedin_url: Option<String>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub skills: Option<Vec<String>>,
    pub languages: Option<String>,
    pub certifications: Option<String>,
    pub summary: Option<String>,
    pub status: Option<CandidateStatus>,
    pub notes: Option<String>,
    pub resume_path: Option<String>,
}

/// Best-effort CV preview assembled from a candidate record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CvPreviewResponse {
    pub candidate_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: String,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Option<String>,
    pub certifications: Option<String>,
    /// Always true: extracted fields are heuristic, not validated data.
    pub approximate: bool,
}
