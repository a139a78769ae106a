//! Seed data for the entity stores.
//!
//! Each entity type is seeded from a JSON array document. The crate embeds a
//! default set; deployments can point [`Fixtures::from_dir`] at their own
//! directory with the same file names.

use crate::domain::error::{JobBoardError, Result};
use crate::domain::{Application, Company, Job, Partner, Testimonial};
use serde::de::DeserializeOwned;
use std::path::Path;

const JOBS_FILE: &str = "jobs.json";
const COMPANIES_FILE: &str = "companies.json";
const APPLICATIONS_FILE: &str = "applications.json";
const PARTNERS_FILE: &str = "partners.json";
const TESTIMONIALS_FILE: &str = "testimonials.json";

/// Every seeded collection, in fixture order.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub jobs: Vec<Job>,
    pub companies: Vec<Company>,
    pub applications: Vec<Application>,
    pub partners: Vec<Partner>,
    pub testimonials: Vec<Testimonial>,
}

impl Fixtures {
    /// The fixture set compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns a storage error if an embedded document fails to parse.
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            jobs: parse(JOBS_FILE, include_str!("../../fixtures/jobs.json"))?,
            companies: parse(COMPANIES_FILE, include_str!("../../fixtures/companies.json"))?,
            applications: parse(
                APPLICATIONS_FILE,
                include_str!("../../fixtures/applications.json"),
            )?,
            partners: parse(PARTNERS_FILE, include_str!("../../fixtures/partners.json"))?,
            testimonials: parse(
                TESTIMONIALS_FILE,
                include_str!("../../fixtures/testimonials.json"),
            )?,
        })
    }

    /// Loads fixtures from `dir`.
    ///
    /// A missing file seeds an empty collection; a file that exists but does
    /// not parse is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or does not hold a JSON array
    /// of the expected entity shape.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let _span = tracing::debug_span!("load_fixtures", dir = ?dir).entered();

        let fixtures = Self {
            jobs: load(dir, JOBS_FILE)?,
            companies: load(dir, COMPANIES_FILE)?,
            applications: load(dir, APPLICATIONS_FILE)?,
            partners: load(dir, PARTNERS_FILE)?,
            testimonials: load(dir, TESTIMONIALS_FILE)?,
        };

        tracing::debug!(
            jobs = fixtures.jobs.len(),
            companies = fixtures.companies.len(),
            applications = fixtures.applications.len(),
            partners = fixtures.partners.len(),
            testimonials = fixtures.testimonials.len(),
            "fixtures loaded"
        );
        Ok(fixtures)
    }
}

fn load<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>> {
    let path = dir.join(file);
    if !path.exists() {
        tracing::debug!(path = ?path, "fixture file missing, seeding empty collection");
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(&path)?;
    parse(file, &contents)
}

fn parse<T: DeserializeOwned>(file: &str, contents: &str) -> Result<Vec<T>> {
    serde_json::from_str(contents)
        .map_err(|e| JobBoardError::Storage(format!("invalid fixture {file}: {e}")))
}
