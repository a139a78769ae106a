//! Domain layer for the job board.
//!
//! Entity types, their enums and the crate error type. Nothing here knows
//! about storage, latency or search.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`job`]: Job postings, salary and the type/experience vocabularies
//! - [`company`]: Company profiles
//! - [`application`]: Applications, their status and candidate identity
//! - [`content`]: Partners and testimonials
//! - [`cv`]: CV upload echoes and submissions

pub mod application;
pub mod company;
pub mod content;
pub mod cv;
pub mod error;
pub mod job;

/// Identifier shared by every stored entity. Positive once assigned.
pub type EntityId = u64;

pub use application::{Application, ApplicationStatus, CandidateId};
pub use company::Company;
pub use content::{Partner, Testimonial};
pub use cv::{CvSubmission, CvUpload, UploadedFile};
pub use error::{JobBoardError, Result};
pub use job::{format_salary, CompanyRef, ExperienceLevel, Job, JobType, Salary};
