//! CV upload stub and general CV submissions.
//!
//! Uploads are checked and echoed back after a delay; no bytes are stored.
//! Submissions go through the entity store like any other record.

use super::rules::not_blank;
use crate::domain::error::{JobBoardError, Result};
use crate::domain::{ApplicationStatus, CvSubmission, CvUpload, EntityId, UploadedFile};
use crate::infrastructure::latency::pause;
use crate::store::{Patch, SharedRepository};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use validator::Validate;

/// Largest accepted upload, 5 MB.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted for CVs: PDF, DOC and DOCX.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Simulated upload time.
pub const UPLOAD_LATENCY: Duration = Duration::from_millis(1500);

/// Contact details sent with a CV.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CvSubmissionForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    /// URL returned by [`CvService::upload`].
    pub cv_url: Option<String>,
}

/// Accepts CV uploads and manages the submissions that reference them.
pub struct CvService {
    repo: SharedRepository<CvSubmission>,
    upload_latency: Duration,
    next_upload: AtomicU64,
}

impl CvService {
    pub fn new(repo: SharedRepository<CvSubmission>, upload_latency: Duration) -> Self {
        Self {
            repo,
            upload_latency,
            next_upload: AtomicU64::new(1),
        }
    }

    /// Checks `file` and echoes it back as an upload receipt.
    ///
    /// # Errors
    ///
    /// [`JobBoardError::Validation`] naming `size` when the file is empty or
    /// larger than [`MAX_UPLOAD_BYTES`], and `type` when its MIME type is not
    /// one of [`ACCEPTED_MIME_TYPES`].
    pub async fn upload(&self, file: UploadedFile) -> Result<CvUpload> {
        let mut rejected = Vec::new();
        if file.size == 0 || file.size > MAX_UPLOAD_BYTES {
            rejected.push("size");
        }
        if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
            rejected.push("type");
        }
        if !rejected.is_empty() {
            tracing::debug!(name = %file.name, size = file.size, mime = %file.mime_type, "upload rejected");
            return Err(JobBoardError::validation(rejected));
        }

        pause(self.upload_latency).await;

        let id = self.next_upload.fetch_add(1, Ordering::Relaxed);
        let upload = CvUpload {
            id,
            url: format!("/uploads/cv/{id}/{}", file.name),
            name: file.name,
            size: file.size,
            mime_type: file.mime_type,
            uploaded_at: Utc::now(),
        };
        tracing::info!(upload_id = id, name = %upload.name, "cv uploaded");
        Ok(upload)
    }

    /// Stores a new submission with status `submitted`.
    ///
    /// # Errors
    ///
    /// [`JobBoardError::Validation`] naming `name` or `email`, or any
    /// repository failure.
    pub async fn submit(&self, form: CvSubmissionForm) -> Result<CvSubmission> {
        form.validate()?;

        let now = Utc::now();
        let draft = CvSubmission {
            id: 0,
            name: form.name.trim().to_string(),
            email: form.email,
            phone: form.phone,
            position: form.position,
            cv_url: form.cv_url,
            status: ApplicationStatus::Submitted,
            submitted_at: now,
            updated_at: None,
        };
        let created = self.repo.create(draft).await?;
        tracing::info!(submission_id = created.id, "cv submitted");
        Ok(created)
    }

    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn get_all(&self) -> Result<Vec<CvSubmission>> {
        self.repo.get_all().await
    }

    /// # Errors
    ///
    /// [`JobBoardError::NotFound`] for an unknown id.
    pub async fn get_by_id(&self, id: EntityId) -> Result<CvSubmission> {
        self.repo.get_by_id(id).await
    }

    /// Moves a submission to `status` and stamps `updatedAt`.
    ///
    /// # Errors
    ///
    /// [`JobBoardError::NotFound`] for an unknown id.
    pub async fn update_status(&self, id: EntityId, status: ApplicationStatus) -> Result<CvSubmission> {
        let patch = Patch::new().set("status", serde_json::to_value(status)?);
        self.repo.update(id, patch).await
    }

    /// Removes a submission, returning it.
    ///
    /// # Errors
    ///
    /// [`JobBoardError::NotFound`] for an unknown id.
    pub async fn delete(&self, id: EntityId) -> Result<CvSubmission> {
        self.repo.delete(id).await
    }
}

impl std::fmt::Debug for CvService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CvService")
            .field("upload_latency", &self.upload_latency)
            .finish_non_exhaustive()
    }
}
