//! Candidate and employer workflows built on the entity stores.
//!
//! # Modules
//!
//! - `applications`: apply, withdraw and list applications
//! - `posting`: employer job posting form
//! - `cv`: CV upload stub and CV submissions
//! - `contact`: contact form

pub mod applications;
pub mod contact;
pub mod cv;
pub mod posting;
mod rules;

pub use applications::{ApplicationForm, ApplicationService};
pub use contact::{ContactForm, ContactReceipt, ContactService};
pub use cv::{CvService, CvSubmissionForm, MAX_UPLOAD_BYTES};
pub use posting::{post_job, JobPostForm};
