//! CV upload and submission records.
//!
//! Uploads are echoed back rather than stored; there is no file storage
//! behind this crate.

use super::application::ApplicationStatus;
use super::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A file handed to the upload stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    /// MIME type reported by the client.
    pub mime_type: String,
}

/// Echo of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvUpload {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub url: String,
}

/// A general CV submission from the upload page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvSubmission {
    #[serde(rename = "Id", default)]
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default = "Utc::now")]
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
