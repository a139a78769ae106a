//! Job search.
//!
//! [`filter_jobs`] composes every active criterion with logical AND and keeps
//! the input order. A criterion left empty is skipped, so the default filter
//! returns every job.

use super::salary::SalaryRange;
use crate::domain::{ExperienceLevel, Job, JobType};
use serde::{Deserialize, Serialize};

/// Criteria for [`filter_jobs`].
///
/// # Example
///
/// ```rust
/// use jobboard::domain::JobType;
/// use jobboard::search::{JobFilter, SalaryRange};
///
/// let filter = JobFilter::default()
///     .with_text("engineer")
///     .with_job_types([JobType::FullTime])
///     .with_salary_range(SalaryRange::new(60_000, 90_000)?);
/// assert!(!filter.is_empty());
/// # Ok::<(), jobboard::JobBoardError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobFilter {
    /// Case-insensitive substring of title, company name, location or description.
    pub text: String,
    /// Any one skill matching qualifies a job.
    pub skills: Vec<String>,
    /// Case-insensitive substring of the job location.
    pub location: String,
    pub job_types: Vec<JobType>,
    pub experience_levels: Vec<ExperienceLevel>,
    pub salary_range: Option<SalaryRange>,
}

impl JobFilter {
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn with_job_types(mut self, job_types: impl IntoIterator<Item = JobType>) -> Self {
        self.job_types = job_types.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_experience_levels(
        mut self,
        levels: impl IntoIterator<Item = ExperienceLevel>,
    ) -> Self {
        self.experience_levels = levels.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_salary_range(mut self, range: SalaryRange) -> Self {
        self.salary_range = Some(range);
        self
    }

    /// True when no criterion is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Criteria::compile(self).is_inert()
    }
}

/// Lowercased needles computed once per search instead of once per job.
struct Criteria<'a> {
    text: Option<String>,
    skills: Vec<String>,
    location: Option<String>,
    job_types: &'a [JobType],
    experience_levels: &'a [ExperienceLevel],
    salary_range: Option<SalaryRange>,
}

impl<'a> Criteria<'a> {
    fn compile(filter: &'a JobFilter) -> Self {
        Self {
            text: needle(&filter.text),
            skills: filter.skills.iter().filter_map(|s| needle(s)).collect(),
            location: needle(&filter.location),
            job_types: &filter.job_types,
            experience_levels: &filter.experience_levels,
            salary_range: filter.salary_range,
        }
    }

    fn is_inert(&self) -> bool {
        self.text.is_none()
            && self.skills.is_empty()
            && self.location.is_none()
            && self.job_types.is_empty()
            && self.experience_levels.is_empty()
            && self.salary_range.is_none()
    }

    fn matches(&self, job: &Job) -> bool {
        self.text.as_deref().map_or(true, |term| matches_text(job, term))
            && (self.skills.is_empty() || matches_skills(job, &self.skills))
            && self
                .location
                .as_deref()
                .map_or(true, |loc| job.location.to_lowercase().contains(loc))
            && (self.job_types.is_empty() || self.job_types.contains(&job.job_type))
            && (self.experience_levels.is_empty()
                || self.experience_levels.contains(&job.experience))
            && self
                .salary_range
                .map_or(true, |range| range.admits(job.salary.as_ref()))
    }
}

/// Trimmed, lowercased search term; `None` when blank.
fn needle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn matches_text(job: &Job, term: &str) -> bool {
    [
        job.title.as_str(),
        job.company.name.as_str(),
        job.location.as_str(),
        job.description.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term))
}

/// Any skill found in the combined skills, requirements, title and description.
fn matches_skills(job: &Job, skills: &[String]) -> bool {
    let haystack = job
        .skills
        .iter()
        .chain(job.requirements.iter())
        .map(String::as_str)
        .chain([job.title.as_str(), job.description.as_str()])
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    skills.iter().any(|skill| haystack.contains(skill.as_str()))
}

/// Returns the jobs matching every active criterion of `filter`, in input order.
///
/// Pure: the same arguments always give the same result, and the output only
/// ever contains clones of input jobs.
#[must_use]
pub fn filter_jobs(jobs: &[Job], filter: &JobFilter) -> Vec<Job> {
    let _span = tracing::debug_span!("filter_jobs",
        total_jobs = jobs.len(),
        skills = filter.skills.len(),
        job_types = filter.job_types.len(),
        salary = filter.salary_range.is_some()
    )
    .entered();

    let criteria = Criteria::compile(filter);
    let filtered: Vec<Job> = if criteria.is_inert() {
        jobs.to_vec()
    } else {
        jobs.iter().filter(|job| criteria.matches(job)).cloned().collect()
    };

    tracing::debug!(filtered_count = filtered.len(), "job filter applied");
    filtered
}
