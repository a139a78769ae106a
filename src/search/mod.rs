//! Query/filter engine.
//!
//! Pure functions mapping `(list, criteria)` to the matching subset, plus the
//! curated partner and testimonial lists.
//!
//! # Modules
//!
//! - `jobs`: multi-criteria job search
//! - `companies`: company text search and company job lookup
//! - `salary`: salary ranges, presets and the overlap test
//! - `curated`: featured partners and approved testimonials

pub mod companies;
pub mod curated;
pub mod jobs;
pub mod salary;

pub use companies::{filter_companies, jobs_for_company, CompanyFilter};
pub use curated::{approved_testimonials, featured_partners};
pub use jobs::{filter_jobs, JobFilter};
pub use salary::{SalaryRange, SALARY_PRESETS};
