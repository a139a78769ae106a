//! Jobboard: the core of a job board.
//!
//! Jobboard provides the non-UI logic behind a job listing site:
//! - Per-entity stores for jobs, companies, applications, partners and testimonials
//! - Multi-criteria job search and company search
//! - A persisted set of saved jobs
//! - The candidate application lifecycle with ownership checks
//! - CV uploads, contact messages and dashboard statistics

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Composition root (lib.rs: JobBoard, Config)        │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Lifecycle     │   │ Search        │   │ Saved jobs    │
//! │ (lifecycle/)  │   │ (search/)     │   │ (saved/)      │
//! │ - Apply       │   │ - Job filter  │   │ - Toggle      │
//! │ - Withdraw    │   │ - Companies   │   │ - Persist     │
//! │ - CV, contact │   │ - Salary      │   │ - Degrade     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                                        │
//! ┌───────────────────────────┐   ┌─────────────────────────┐
//! │ Entity store (store/)     │   │ Storage (storage/)      │
//! │ - Repository trait        │   │ - Key-value port        │
//! │ - In-memory, one writer   │   │ - JSON file, memory     │
//! │ - Shallow-merge patches   │   │ - Seed fixtures         │
//! └───────────────────────────┘   └─────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Latency, cancellation, paths (infrastructure/)   │
//! │  - Entities and errors (domain/)                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Entity types and the crate error
//! - [`store`]: Async entity repositories
//! - [`search`]: Pure filter functions over entity lists
//! - [`saved`]: Saved-jobs registry
//! - [`lifecycle`]: Applications, job posting, CVs and contact messages
//! - [`insights`]: Dashboard statistics
//! - [`storage`]: Key-value persistence and fixtures
//! - [`infrastructure`]: Latency, cancellation and paths
//! - [`observability`]: Tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use jobboard::search::JobFilter;
//! use jobboard::{Config, JobBoard};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> jobboard::Result<()> {
//! let dir = tempfile::tempdir()?;
//! let config = Config {
//!     data_dir: dir.path().to_path_buf(),
//!     simulate_latency: false,
//!     ..Config::default()
//! };
//!
//! let mut board = JobBoard::initialize(&config)?;
//! let remote = board.search_jobs(&JobFilter::default().with_location("remote")).await?;
//! for job in &remote {
//!     board.saved_jobs.toggle(job.id);
//! }
//! assert_eq!(board.saved_jobs.len(), remote.len());
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod insights;
pub mod lifecycle;
pub mod observability;
pub mod saved;
pub mod search;
pub mod storage;
pub mod store;

pub use domain::{JobBoardError, Result};

use domain::{
    Application, CandidateId, Company, CvSubmission, EntityId, Job, Partner, Testimonial,
};
use infrastructure::{expand_tilde, Latency};
use insights::{ApplicationStats, EmployerStats};
use lifecycle::{ApplicationService, ContactService, CvService, JobPostForm};
use saved::SavedJobs;
use search::{CompanyFilter, JobFilter};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::{Fixtures, JsonFileStore, KeyValueStore, MemoryStore};
use store::{InMemoryRepository, Repository, SharedRepository};

/// Default file name of the saved-jobs store inside the data directory.
const DEFAULT_SAVED_JOBS_FILE: &str = "saved-jobs.json";

/// Simulated time to store a CV submission.
const CV_SUBMIT_LATENCY: Duration = Duration::from_millis(800);

/// Runtime configuration.
///
/// Values come from a string map (an embedding application's settings) via
/// [`Config::from_map`], or from a TOML file via [`Config::from_file`].
///
/// # Example
///
/// ```toml
/// fixtures_dir = "/srv/jobboard/fixtures"
/// data_dir = "~/.local/share/jobboard"
/// saved_jobs_file = "saved-jobs.json"
/// simulate_latency = false
/// trace_level = "debug"
/// log_file = "/var/log/jobboard.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `jobs.json`, `companies.json` and the other seed
    /// documents. `None` uses the fixtures compiled into the crate.
    pub fixtures_dir: Option<PathBuf>,

    /// Directory for durable client-local state.
    ///
    /// Default: `$HOME/.local/share/jobboard`
    pub data_dir: PathBuf,

    /// File name of the saved-jobs store inside `data_dir`.
    ///
    /// Default: `"saved-jobs.json"`
    pub saved_jobs_file: String,

    /// Whether stores wait out the simulated network delays. Default: `true`
    pub simulate_latency: bool,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixtures_dir: None,
            data_dir: infrastructure::default_data_dir(),
            saved_jobs_file: DEFAULT_SAVED_JOBS_FILE.to_string(),
            simulate_latency: true,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `fixtures_dir`, `data_dir`, `log_file`: paths, `~` expanded
    /// - `saved_jobs_file`: String (blank keeps the default)
    /// - `simulate_latency`: `true`/`false`/`1`/`0` (anything else keeps the default)
    /// - `trace_level`: String
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use jobboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/tmp/jobboard".to_string());
    /// map.insert("simulate_latency".to_string(), "false".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.data_dir, std::path::PathBuf::from("/tmp/jobboard"));
    /// assert!(!config.simulate_latency);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str| {
            map.get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(expand_tilde)
        };

        let simulate_latency = map
            .get("simulate_latency")
            .and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            })
            .unwrap_or(defaults.simulate_latency);

        let saved_jobs_file = map
            .get("saved_jobs_file")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.saved_jobs_file);

        Self {
            fixtures_dir: path("fixtures_dir"),
            data_dir: path("data_dir").unwrap_or(defaults.data_dir),
            saved_jobs_file,
            simulate_latency,
            trace_level: map.get("trace_level").cloned(),
            log_file: path("log_file"),
        }
    }

    /// Reads a TOML configuration file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::Config`] if the file cannot be read or is not
    /// valid TOML for this shape.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| JobBoardError::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut config: Self = toml::from_str(&contents)
            .map_err(|e| JobBoardError::Config(format!("invalid config {}: {e}", path.display())))?;

        config.data_dir = expand_path(&config.data_dir);
        config.fixtures_dir = config.fixtures_dir.as_deref().map(expand_path);
        config.log_file = config.log_file.as_deref().map(expand_path);
        Ok(config)
    }

    /// Location of the saved-jobs store.
    #[must_use]
    pub fn saved_jobs_path(&self) -> PathBuf {
        self.data_dir.join(&self.saved_jobs_file)
    }

    fn latency(&self) -> Latency {
        if self.simulate_latency {
            Latency::simulated()
        } else {
            Latency::none()
        }
    }
}

fn expand_path(path: &Path) -> PathBuf {
    path.to_str().map_or_else(|| path.to_path_buf(), expand_tilde)
}

/// Every store and service of one running board.
///
/// Repositories are shared handles; clone them freely into tasks. The saved
/// jobs registry is owned here and mutated through `&mut self`.
pub struct JobBoard {
    pub jobs: SharedRepository<Job>,
    pub companies: SharedRepository<Company>,
    pub applications: SharedRepository<Application>,
    pub partners: SharedRepository<Partner>,
    pub testimonials: SharedRepository<Testimonial>,
    pub cv_submissions: SharedRepository<CvSubmission>,
    pub lifecycle: ApplicationService,
    pub cv: CvService,
    pub contact: ContactService,
    pub saved_jobs: SavedJobs,
}

impl JobBoard {
    /// Seeds every store from fixtures and opens the saved-jobs store.
    ///
    /// If the saved-jobs file cannot be opened, saved jobs are kept in
    /// memory for this session and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns an error if fixtures cannot be loaded or hold duplicate ids.
    pub fn initialize(config: &Config) -> Result<Self> {
        let _span = tracing::info_span!("initialize", data_dir = ?config.data_dir).entered();

        let fixtures = match &config.fixtures_dir {
            Some(dir) => Fixtures::from_dir(dir)?,
            None => Fixtures::embedded()?,
        };
        let latency = config.latency();

        let cv_latency = if config.simulate_latency {
            Latency {
                create: CV_SUBMIT_LATENCY,
                ..latency
            }
        } else {
            latency
        };
        let upload_latency = if config.simulate_latency {
            lifecycle::cv::UPLOAD_LATENCY
        } else {
            Duration::ZERO
        };
        let contact_latency = if config.simulate_latency {
            lifecycle::contact::SEND_LATENCY
        } else {
            Duration::ZERO
        };

        let applications: SharedRepository<Application> =
            Arc::new(InMemoryRepository::seeded(fixtures.applications, latency)?);
        let cv_submissions: SharedRepository<CvSubmission> =
            Arc::new(InMemoryRepository::<CvSubmission>::new(cv_latency));

        let board = Self {
            jobs: Arc::new(InMemoryRepository::seeded(fixtures.jobs, latency)?),
            companies: Arc::new(InMemoryRepository::seeded(fixtures.companies, latency)?),
            partners: Arc::new(InMemoryRepository::seeded(fixtures.partners, latency)?),
            testimonials: Arc::new(InMemoryRepository::seeded(fixtures.testimonials, latency)?),
            lifecycle: ApplicationService::new(Arc::clone(&applications)),
            cv: CvService::new(Arc::clone(&cv_submissions), upload_latency),
            contact: ContactService::new(contact_latency),
            saved_jobs: SavedJobs::load(open_saved_store(config)),
            applications,
            cv_submissions,
        };

        tracing::info!(
            simulate_latency = config.simulate_latency,
            saved_jobs = board.saved_jobs.len(),
            "job board initialized"
        );
        Ok(board)
    }

    /// All jobs matching `filter`.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn search_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let jobs = self.jobs.get_all().await?;
        Ok(search::filter_jobs(&jobs, filter))
    }

    /// All companies matching `filter`.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn search_companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>> {
        let companies = self.companies.get_all().await?;
        Ok(search::filter_companies(&companies, filter))
    }

    /// A company profile with its open postings.
    ///
    /// # Errors
    ///
    /// [`JobBoardError::NotFound`] for an unknown company id.
    pub async fn company_with_jobs(&self, company_id: EntityId) -> Result<(Company, Vec<Job>)> {
        let company = self.companies.get_by_id(company_id).await?;
        let jobs = self.jobs.get_all().await?;
        let postings = search::jobs_for_company(&jobs, &company);
        Ok((company, postings))
    }

    /// Details of every saved job that still exists, in save order.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn saved_job_details(&self) -> Result<Vec<Job>> {
        let jobs = self.jobs.get_all().await?;
        Ok(self.saved_jobs.resolve(&jobs))
    }

    /// Posts a job from the employer form.
    ///
    /// # Errors
    ///
    /// See [`lifecycle::post_job`].
    pub async fn post_job(&self, form: JobPostForm) -> Result<Job> {
        lifecycle::post_job(self.jobs.as_ref(), form).await
    }

    /// Candidate dashboard counts.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn candidate_stats(&self, candidate: &CandidateId) -> Result<ApplicationStats> {
        let mine = self.lifecycle.applications_for(candidate).await?;
        Ok(ApplicationStats::from_applications(&mine))
    }

    /// Employer dashboard counts at the current time.
    ///
    /// # Errors
    ///
    /// Propagates any repository failure.
    pub async fn employer_stats(&self) -> Result<EmployerStats> {
        let jobs = self.jobs.get_all().await?;
        Ok(EmployerStats::from_jobs(&jobs, chrono::Utc::now()))
    }
}

impl std::fmt::Debug for JobBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobBoard")
            .field("saved_jobs", &self.saved_jobs)
            .finish_non_exhaustive()
    }
}

/// Opens the JSON saved-jobs store, or a memory store if that fails.
fn open_saved_store(config: &Config) -> Box<dyn KeyValueStore> {
    let path = config.saved_jobs_path();
    match JsonFileStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "saved jobs store unavailable, using memory");
            Box::new(MemoryStore::default())
        }
    }
}
