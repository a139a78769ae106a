//! Candidate application lifecycle.
//!
//! [`ApplicationService`] wraps the application store with the rules a
//! candidate is held to: applications need a resume and a cover letter, start
//! as `submitted`, and can only be withdrawn by the candidate who filed them.

use super::rules::not_blank;
use crate::domain::error::Result;
use crate::domain::{Application, ApplicationStatus, CandidateId, EntityId, Job};
use crate::store::{Patch, SharedRepository};
use chrono::Utc;
use tracing::Instrument;
use validator::Validate;

/// The candidate-supplied part of an application.
#[derive(Debug, Clone, Validate)]
pub struct ApplicationForm {
    #[validate(custom(function = "not_blank"))]
    pub resume: String,
    #[validate(custom(function = "not_blank"))]
    pub cover_letter: String,
}

/// Applies to and withdraws from jobs on behalf of a candidate.
#[derive(Clone)]
pub struct ApplicationService {
    repo: SharedRepository<Application>,
}

impl ApplicationService {
    pub fn new(repo: SharedRepository<Application>) -> Self {
        Self { repo }
    }

    /// Files an application for `job`.
    ///
    /// The new record starts as [`ApplicationStatus::Submitted`] with both
    /// timestamps set to now, and copies the job title and company name for
    /// display.
    ///
    /// # Errors
    ///
    /// - [`JobBoardError::Validation`](crate::JobBoardError::Validation)
    ///   naming `resume` and/or `coverLetter` when either is blank; nothing
    ///   is stored.
    /// - Any repository failure.
    pub async fn apply(
        &self,
        job: &Job,
        candidate: &CandidateId,
        resume: &str,
        cover_letter: &str,
    ) -> Result<Application> {
        let span = tracing::debug_span!("apply", job_id = job.id, candidate = %candidate);

        let form = ApplicationForm {
            resume: resume.to_string(),
            cover_letter: cover_letter.to_string(),
        };
        form.validate()?;

        let now = Utc::now();
        let draft = Application {
            id: 0,
            job_id: job.id,
            candidate_id: candidate.clone(),
            resume: form.resume,
            cover_letter: form.cover_letter,
            status: ApplicationStatus::Submitted,
            applied_date: now,
            last_updated: now,
            job_title: Some(job.title.clone()),
            company_name: Some(job.company.name.clone()),
        };

        let created = self.repo.create(draft).instrument(span).await?;
        tracing::info!(application_id = created.id, job_id = job.id, "application submitted");
        Ok(created)
    }

    /// Withdraws one of `candidate`'s applications, returning the removed record.
    ///
    /// # Errors
    ///
    /// [`JobBoardError::NotFound`](crate::JobBoardError::NotFound) when no application has that id or it
    /// belongs to another candidate. The two cases are indistinguishable.
    pub async fn withdraw(&self, candidate: &CandidateId, id: EntityId) -> Result<Application> {
        let owned_by_candidate = |app: &Application| app.belongs_to(candidate);
        match self.repo.delete_if(id, &owned_by_candidate).await {
            Ok(removed) => {
                tracing::info!(application_id = id, "application withdrawn");
                Ok(removed)
            }
            Err(err) => {
                if err.is_not_found() {
                    tracing::warn!(application_id = id, candidate = %candidate, "withdraw refused, missing or not the owner");
                }
                Err(err)
            }
        }
    }

    /// Every application filed by `candidate`, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn applications_for(&self, candidate: &CandidateId) -> Result<Vec<Application>> {
        let all = self.repo.get_all().await?;
        Ok(all.into_iter().filter(|a| a.belongs_to(candidate)).collect())
    }

    /// Moves an application to `status` on the employer side.
    ///
    /// # Errors
    ///
    /// [`JobBoardError::NotFound`](crate::JobBoardError::NotFound) for an
    /// unknown id, or any repository failure.
    pub async fn update_status(&self, id: EntityId, status: ApplicationStatus) -> Result<Application> {
        let patch = Patch::new().set("status", serde_json::to_value(status)?);
        let updated = self.repo.update(id, patch).await?;
        tracing::info!(application_id = id, status = ?status, "application status changed");
        Ok(updated)
    }
}

impl std::fmt::Debug for ApplicationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::JobBoardError;
    use crate::infrastructure::Latency;
    use crate::storage::Fixtures;
    use crate::store::{InMemoryRepository, Repository};
    use std::sync::Arc;

    fn service() -> (ApplicationService, Arc<InMemoryRepository<Application>>, Job) {
        let fixtures = Fixtures::embedded().unwrap();
        let repo = Arc::new(
            InMemoryRepository::seeded(fixtures.applications, Latency::none()).unwrap(),
        );
        let job = fixtures.jobs.into_iter().next().unwrap();
        (ApplicationService::new(repo.clone()), repo, job)
    }

    #[tokio::test]
    async fn apply_creates_submitted_application() {
        let (service, repo, job) = service();
        let user = CandidateId::new("user-9");

        let created = service
            .apply(&job, &user, "http://resume", "I would love to join.")
            .await
            .unwrap();

        assert_eq!(created.status, ApplicationStatus::Submitted);
        assert_eq!(created.job_id, job.id);
        assert_eq!(created.applied_date, created.last_updated);
        assert_eq!(created.job_title.as_deref(), Some(job.title.as_str()));
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn empty_cover_letter_is_rejected_without_writing() {
        let (service, repo, job) = service();
        let before = repo.len().await;

        let err = service
            .apply(&job, &CandidateId::new("user-1"), "http://resume", "")
            .await
            .unwrap_err();

        assert_eq!(err.fields(), ["coverLetter"]);
        assert_eq!(repo.len().await, before);
    }

    #[tokio::test]
    async fn both_blank_fields_are_named() {
        let (service, _repo, job) = service();
        let err = service
            .apply(&job, &CandidateId::new("user-1"), "  ", "")
            .await
            .unwrap_err();
        assert_eq!(err.fields(), ["coverLetter", "resume"]);
    }

    #[tokio::test]
    async fn withdraw_checks_ownership() {
        let (service, repo, job) = service();
        let owner = CandidateId::new("user-1");
        let stranger = CandidateId::new("user-2");
        let created = service.apply(&job, &owner, "r", "c").await.unwrap();

        let err = service.withdraw(&stranger, created.id).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(repo.get_by_id(created.id).await.is_ok());

        let removed = service.withdraw(&owner, created.id).await.unwrap();
        assert_eq!(removed.id, created.id);
        assert!(repo.get_by_id(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test(start_paused = true)]
    async fn withdraw_sees_ownership_change_committed_during_its_wait() {
        let fixtures = Fixtures::embedded().unwrap();
        let repo = Arc::new(
            InMemoryRepository::seeded(fixtures.applications, Latency::simulated()).unwrap(),
        );
        let service = ApplicationService::new(repo.clone());
        let original_owner = CandidateId::new("user-1");

        // The reassignment commits at 300ms, while the withdraw started at
        // 100ms is still waiting out its 250ms latency.
        let (reassigned, withdrawn) = tokio::join!(
            repo.update(1, Patch::new().set("candidateId", serde_json::json!("user-2"))),
            async {
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                service.withdraw(&original_owner, 1).await
            }
        );

        assert_eq!(reassigned.unwrap().candidate_id, CandidateId::new("user-2"));
        assert!(withdrawn.unwrap_err().is_not_found());
        let kept = repo.get_by_id(1).await.unwrap();
        assert!(kept.belongs_to(&CandidateId::new("user-2")));
    }

    #[tokio::test]
    async fn withdraw_unknown_id_is_not_found() {
        let (service, _repo, _job) = service();
        let err = service.withdraw(&CandidateId::new("user-1"), 999).await.unwrap_err();
        assert!(matches!(err, JobBoardError::NotFound { entity: "application", id: 999 }));
    }

    #[tokio::test]
    async fn applications_are_listed_per_candidate() {
        let (service, _repo, _job) = service();
        let mine = service.applications_for(&CandidateId::new("user-1")).await.unwrap();
        let ids: Vec<EntityId> = mine.iter().map(|a| a.id).collect();
        assert_eq!(ids, [1, 2, 4]);
    }

    #[tokio::test]
    async fn status_update_refreshes_timestamp() {
        let (service, repo, _job) = service();
        let before = repo.get_by_id(1).await.unwrap();

        let updated = service.update_status(1, ApplicationStatus::Accepted).await.unwrap();
        assert_eq!(updated.status, ApplicationStatus::Accepted);
        assert!(updated.last_updated >= before.last_updated);
        assert_eq!(updated.cover_letter, before.cover_letter);
    }
}
