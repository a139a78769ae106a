//! Dashboard figures derived from entity lists.

use crate::domain::{Application, ApplicationStatus, Job};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Application counts for a candidate dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: usize,
    pub submitted: usize,
    pub viewed: usize,
    pub interview: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl ApplicationStats {
    #[must_use]
    pub fn from_applications(applications: &[Application]) -> Self {
        applications.iter().fold(Self::default(), |mut stats, app| {
            stats.total += 1;
            match app.status {
                ApplicationStatus::Submitted => stats.submitted += 1,
                ApplicationStatus::Viewed => stats.viewed += 1,
                ApplicationStatus::Interview => stats.interview += 1,
                ApplicationStatus::Accepted => stats.accepted += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
            }
            stats
        })
    }

    /// Applications still awaiting a final decision.
    #[must_use]
    pub const fn in_progress(&self) -> usize {
        self.submitted + self.viewed + self.interview
    }

    #[must_use]
    pub const fn count(&self, status: ApplicationStatus) -> usize {
        match status {
            ApplicationStatus::Submitted => self.submitted,
            ApplicationStatus::Viewed => self.viewed,
            ApplicationStatus::Interview => self.interview,
            ApplicationStatus::Accepted => self.accepted,
            ApplicationStatus::Rejected => self.rejected,
        }
    }
}

/// Posting counts for the employer dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerStats {
    pub total_jobs: usize,
    /// Jobs whose deadline is still ahead, or that have none.
    pub active_jobs: usize,
    pub remote_jobs: usize,
}

impl EmployerStats {
    #[must_use]
    pub fn from_jobs(jobs: &[Job], now: DateTime<Utc>) -> Self {
        Self {
            total_jobs: jobs.len(),
            active_jobs: jobs.iter().filter(|job| job.is_open(now)).count(),
            remote_jobs: jobs.iter().filter(|job| job.remote).count(),
        }
    }
}
