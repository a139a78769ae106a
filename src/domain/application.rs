//! Job application domain model and candidate identity.

use super::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the candidate acting on the board.
///
/// Passed explicitly into every lifecycle operation instead of being assumed,
/// so ownership can be checked where records are mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review state of an application.
///
/// New applications start as `Submitted`. Every later transition is made by
/// the employer side; withdrawal deletes the record instead of adding a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Submitted,
    Viewed,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [Self; 5] = [
        Self::Submitted,
        Self::Viewed,
        Self::Interview,
        Self::Accepted,
        Self::Rejected,
    ];

    /// True for `Accepted` and `Rejected`.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

/// A candidate's application to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "Id", default)]
    pub id: EntityId,
    pub job_id: EntityId,
    pub candidate_id: CandidateId,
    /// Link to the uploaded resume.
    pub resume: String,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    #[serde(default = "Utc::now")]
    pub applied_date: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
    /// Display copies of the job title and company, carried by some fixtures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl Application {
    #[must_use]
    pub fn belongs_to(&self, candidate: &CandidateId) -> bool {
        &self.candidate_id == candidate
    }
}
