//! Saved-items registry: the candidate's favorited jobs.

pub mod registry;

pub use registry::{SavedJobs, SAVED_JOBS_KEY};
