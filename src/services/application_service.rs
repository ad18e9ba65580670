use std::sync::Arc;

use crate::database::store::Store;
use crate::dto::application_dto::CreateApplicationPayload;
use crate::dto::candidate_dto::CreateCandidatePayload;
use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationPatch, ApplicationStatus};
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::services::candidate_service::candidate_email_taken;

/// Intake and triage of public applications.
///
/// Status moves only `pending -> approved` or `pending -> rejected`; both
/// targets are terminal. Approval is the single path that turns an
/// application into a candidate.
#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<Store>,
}

/// Maps an application onto a new active candidate. Values are copied, so
/// later edits to either record do not propagate.
fn candidate_from_application(application: &Application) -> CreateCandidatePayload {
    CreateCandidatePayload {
        first_name: application.first_name.clone(),
        last_name: application.last_name.clone(),
        email: application.email.clone(),
        phone: application.phone.clone(),
        location: Some(String::new()),
        current_position: application.current_position.clone(),
        profile: application.profile.clone(),
        linkedin_url: Some(String::new()),
        experience: application.experience.clone(),
        education: application.education.clone(),
        skills: application.skills.clone(),
        languages: None,
        certifications: None,
        summary: None,
        status: Some(CandidateStatus::Active),
        notes: Some(application.cover_letter.clone().unwrap_or_default()),
        resume_path: Some(application.resume_path.clone().unwrap_or_default()),
    }
}

fn ensure_transition(from: ApplicationStatus, to: ApplicationStatus) -> Result<()> {
    match (from, to) {
        (ApplicationStatus::Pending, ApplicationStatus::Approved)
        | (ApplicationStatus::Pending, ApplicationStatus::Rejected) => Ok(()),
        (from, _) if from.is_terminal() => Err(Error::Conflict(format!(
            "Application has already been {}",
            from
        ))),
        (from, to) => Err(Error::Conflict(format!(
            "Invalid status transition from {} to {}",
            from, to
        ))),
    }
}

impl ApplicationService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Application>> {
        Ok(self.store.read()?.applications.all())
    }

    pub fn get(&self, id: i64) -> Result<Application> {
        self.store
            .read()?
            .applications
            .get(id)
            .ok_or_else(|| Error::NotFound("Application not found".into()))
    }

    /// Stores a public submission. New applications are always `pending`.
    pub fn submit(&self, mut payload: CreateApplicationPayload) -> Result<Application> {
        payload.email = payload.email.trim().to_string();
        let application = self.store.write()?.applications.insert(payload);
        tracing::info!(application_id = application.id, "application submitted");
        Ok(application)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        if !self.store.write()?.applications.remove(id) {
            return Err(Error::NotFound("Application not found".into()));
        }
        Ok(())
    }

    /// Approves a pending application and creates its candidate.
    ///
    /// Both writes happen under one store guard: the candidate is inserted
    /// first and removed again if the status update does not land, so no
    /// reader ever sees an approved application without its candidate.
    /// Approving a terminal application is a conflict and creates nothing.
    pub fn approve(&self, id: i64) -> Result<(Application, Candidate)> {
        let mut tables = self.store.write()?;
        let application = tables
            .applications
            .get(id)
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        ensure_transition(application.status, ApplicationStatus::Approved)?;

        if candidate_email_taken(&tables, &application.email, None) {
            tracing::warn!(
                application_id = id,
                "approval blocked by existing candidate email"
            );
            return Err(Error::Conflict(
                "A candidate with this email address already exists.".into(),
            ));
        }

        let candidate = tables
            .candidates
            .insert(candidate_from_application(&application));

        let patch = ApplicationPatch {
            status: Some(ApplicationStatus::Approved),
        };
        let Some(approved) = tables.applications.update(id, patch) else {
            tables.candidates.remove(candidate.id);
            return Err(Error::Internal(format!(
                "application {} vanished during approval",
                id
            )));
        };

        tracing::info!(
            application_id = approved.id,
            candidate_id = candidate.id,
            "application approved"
        );
        Ok((approved, candidate))
    }

    pub fn reject(&self, id: i64) -> Result<Application> {
        let mut tables = self.store.write()?;
        let application = tables
            .applications
            .get(id)
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        ensure_transition(application.status, ApplicationStatus::Rejected)?;

        let rejected = tables
            .applications
            .update(
                id,
                ApplicationPatch {
                    status: Some(ApplicationStatus::Rejected),
                },
            )
            .ok_or_else(|| Error::NotFound("Application not found".into()))?;
        tracing::info!(application_id = id, "application rejected");
        Ok(rejected)
    }

    /// Status update through the transition table. Moving to `approved` runs
    /// the full approval so a candidate is always created.
    pub fn update_status(&self, id: i64, status: ApplicationStatus) -> Result<Application> {
        match status {
            ApplicationStatus::Approved => self.approve(id).map(|(application, _)| application),
            ApplicationStatus::Rejected => self.reject(id),
            ApplicationStatus::Pending => {
                let current = self.get(id)?;
                ensure_transition(current.status, status)?;
                Ok(current)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (ApplicationService, Arc<Store>) {
        let store = Arc::new(Store::new());
        (ApplicationService::new(store.clone()), store)
    }

    fn sarah() -> CreateApplicationPayload {
        CreateApplicationPayload {
            first_name: "Sarah".into(),
            last_name: "Johnson".into(),
            email: "s@x.com".into(),
            skills: vec!["Go".into()],
            ..Default::default()
        }
    }

    #[test]
    fn approve_creates_active_candidate_from_application() {
        let (service, _) = service();
        let application = service.submit(sarah()).unwrap();
        assert_eq!(application.status, ApplicationStatus::Pending);

        let (approved, candidate) = service.approve(application.id).unwrap();
        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert_eq!(candidate.status, CandidateStatus::Active);
        assert_eq!(candidate.email, "s@x.com");
        assert_eq!(candidate.skills, vec!["Go".to_string()]);
        assert_eq!(candidate.notes.as_deref(), Some(""));
        assert_eq!(candidate.resume_path.as_deref(), Some(""));
        assert_eq!(candidate.location.as_deref(), Some(""));
    }

    #[test]
    fn approve_copies_cover_letter_and_resume() {
        let (service, _) = service();
        let application = service
            .submit(CreateApplicationPayload {
                cover_letter: Some("Keen to join.".into()),
                resume_path: Some("uploads/cv/sarah.pdf".into()),
                ..sarah()
            })
            .unwrap();

        let (_, candidate) = service.approve(application.id).unwrap();
        assert_eq!(candidate.notes.as_deref(), Some("Keen to join."));
        assert_eq!(candidate.resume_path.as_deref(), Some("uploads/cv/sarah.pdf"));
    }

    #[test]
    fn second_approval_conflicts_without_duplicate_candidate() {
        let (service, store) = service();
        let application = service.submit(sarah()).unwrap();
        service.approve(application.id).unwrap();

        let err = service.approve(application.id).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(store.read().unwrap().candidates.len(), 1);
    }

    #[test]
    fn rejected_application_cannot_be_approved() {
        let (service, store) = service();
        let application = service.submit(sarah()).unwrap();
        service.reject(application.id).unwrap();

        assert!(matches!(
            service.approve(application.id),
            Err(Error::Conflict(_))
        ));
        assert!(matches!(
            service.reject(application.id),
            Err(Error::Conflict(_))
        ));
        assert!(store.read().unwrap().candidates.is_empty());
        assert_eq!(
            service.get(application.id).unwrap().status,
            ApplicationStatus::Rejected
        );
    }

    #[test]
    fn approval_blocked_by_existing_candidate_leaves_application_pending() {
        let (service, store) = service();
        store.write().unwrap().candidates.insert(CreateCandidatePayload {
            first_name: "Sarah".into(),
            last_name: "J".into(),
            email: "S@X.com".into(),
            ..Default::default()
        });
        let application = service.submit(sarah()).unwrap();

        assert!(matches!(
            service.approve(application.id),
            Err(Error::Conflict(_))
        ));
        assert_eq!(
            service.get(application.id).unwrap().status,
            ApplicationStatus::Pending
        );
        assert_eq!(store.read().unwrap().candidates.len(), 1);
    }

    #[test]
    fn approving_missing_application_is_not_found() {
        let (service, _) = service();
        assert!(matches!(service.approve(99), Err(Error::NotFound(_))));
    }

    #[test]
    fn status_update_follows_transition_table() {
        let (service, store) = service();
        let application = service.submit(sarah()).unwrap();

        assert!(matches!(
            service.update_status(application.id, ApplicationStatus::Pending),
            Err(Error::Conflict(_))
        ));

        let approved = service
            .update_status(application.id, ApplicationStatus::Approved)
            .unwrap();
        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert_eq!(store.read().unwrap().candidates.len(), 1);

        assert!(matches!(
            service.update_status(application.id, ApplicationStatus::Pending),
            Err(Error::Conflict(_))
        ));
    }

    #[test]
    fn later_application_edits_do_not_reach_candidate() {
        let (service, store) = service();
        let application = service.submit(sarah()).unwrap();
        let (_, candidate) = service.approve(application.id).unwrap();

        service.delete(application.id).unwrap();
        let stored = store.read().unwrap().candidates.get(candidate.id).unwrap();
        assert_eq!(stored.skills, vec!["Go".to_string()]);
    }
}
