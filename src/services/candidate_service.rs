use std::sync::Arc;

use crate::database::store::{Store, Tables};
use crate::dto::candidate_dto::{CreateCandidatePayload, CvPreviewResponse, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::utils::cv_extract::build_cv_preview;

#[derive(Clone)]
pub struct CandidateService {
    store: Arc<Store>,
}

/// Case-insensitive email uniqueness across candidates, optionally ignoring
/// the candidate being edited. `email` must already be trimmed.
pub(crate) fn candidate_email_taken(tables: &Tables, email: &str, except: Option<i64>) -> bool {
    tables
        .candidates
        .find(|c| Some(c.id) != except && c.email.eq_ignore_ascii_case(email))
        .is_some()
}

impl CandidateService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Candidate>> {
        Ok(self.store.read()?.candidates.all())
    }

    pub fn get(&self, id: i64) -> Result<Candidate> {
        self.store
            .read()?
            .candidates
            .get(id)
            .ok_or_else(|| Error::NotFound("Candidate not found".into()))
    }

    pub fn create(&self, mut payload: CreateCandidatePayload) -> Result<Candidate> {
        payload.email = payload.email.trim().to_string();
        let mut tables = self.store.write()?;
        if candidate_email_taken(&tables, &payload.email, None) {
            return Err(Error::Conflict(
                "A candidate with this email address already exists.".into(),
            ));
        }
        let candidate = tables.candidates.insert(payload);
        tracing::info!(candidate_id = candidate.id, "candidate created");
        Ok(candidate)
    }

    pub fn update(&self, id: i64, mut payload: UpdateCandidatePayload) -> Result<Candidate> {
        payload.email = payload.email.map(|e| e.trim().to_string());
        let mut tables = self.store.write()?;
        if let Some(email) = &payload.email {
            if candidate_email_taken(&tables, email, Some(id)) {
                return Err(Error::Conflict(
                    "A candidate with this email address already exists.".into(),
                ));
            }
        }
        tables
            .candidates
            .update(id, payload)
            .ok_or_else(|| Error::NotFound("Candidate not found".into()))
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        if !self.store.write()?.candidates.remove(id) {
            return Err(Error::NotFound("Candidate not found".into()));
        }
        Ok(())
    }

    pub fn cv_preview(&self, id: i64) -> Result<CvPreviewResponse> {
        let candidate = self.get(id)?;
        Ok(build_cv_preview(&candidate))
    }
}
