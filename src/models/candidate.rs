use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::store::Record;
use crate::dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload};
use crate::models::profile::{EducationEntry, ExperienceEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    #[default]
    Active,
    Interviewing,
    Placed,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub current_position: Option<String>,
    pub profile: Option<String>,
    pub linkedin_url: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Option<String>,
    pub certifications: Option<String>,
    pub summary: Option<String>,
    pub status: CandidateStatus,
    pub notes: Option<String>,
    pub resume_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

impl Record for Candidate {
    type New = CreateCandidatePayload;
    type Patch = UpdateCandidatePayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, new: CreateCandidatePayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            location: new.location,
            current_position: new.current_position,
            profile: new.profile,
            linkedin_url: new.linkedin_url,
            experience: new.experience,
            education: new.education,
            skills: new.skills,
            languages: new.languages,
            certifications: new.certifications,
            summary: new.summary,
            status: new.status.unwrap_or_default(),
            notes: new.notes,
            resume_path: new.resume_path,
            created_at: now,
            updated_at: now,
        }
    }

    fn merge(&mut self, patch: UpdateCandidatePayload, now: DateTime<Utc>) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if patch.phone.is_some() {
            self.phone = patch.phone;
        }
        if patch.location.is_some() {
            self.location = patch.location;
        }
        if patch.current_position.is_some() {
            self.current_position = patch.current_position;
        }
        if patch.profile.is_some() {
            self.profile = patch.profile;
        }
        if patch.linkedin_url.is_some() {
            self.linkedin_url = patch.linkedin_url;
        }
        if let Some(experience) = patch.experience {
            self.experience = experience;
        }
        if let Some(education) = patch.education {
            self.education = education;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if patch.languages.is_some() {
            self.languages = patch.languages;
        }
        if patch.certifications.is_some() {
            self.certifications = patch.certifications;
        }
        if patch.summary.is_some() {
            self.summary = patch.summary;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
        if patch.resume_path.is_some() {
            self.resume_path = patch.resume_path;
        }
        self.updated_at = now;
    }
}
