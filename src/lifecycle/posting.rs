//! Employer job posting.

use super::rules::not_blank;
use crate::domain::error::Result;
use crate::domain::{CompanyRef, EntityId, ExperienceLevel, Job, JobType, Salary};
use crate::store::Repository;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// What an employer fills in to post a job.
///
/// Blank requirement lines are dropped before validation, so a form whose
/// requirement list holds only empty lines is rejected as having none.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPostForm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub company_name: String,
    /// Links the posting to a stored company profile.
    pub company_id: Option<EntityId>,
    #[validate(custom(function = "not_blank"))]
    pub location: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(length(min = 1))]
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceLevel>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub remote: bool,
    pub application_deadline: Option<DateTime<Utc>>,
}

impl JobPostForm {
    fn tidy(mut self) -> Self {
        self.requirements = self
            .requirements
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        self.skills = self
            .skills
            .into_iter()
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect();
        self
    }

    /// Keeps whichever bounds were given; `None` when neither was.
    fn salary(&self) -> Option<Salary> {
        if self.salary_min.is_none() && self.salary_max.is_none() {
            return None;
        }
        Some(Salary {
            min: self.salary_min,
            max: self.salary_max,
            amount: None,
        })
    }

    /// Builds the unsaved job. Type and experience default to full-time, mid level.
    fn into_job(self) -> Job {
        let salary = self.salary();
        let company = match self.company_id {
            Some(id) => CompanyRef::linked(self.company_name.trim(), id),
            None => CompanyRef::named(self.company_name.trim()),
        };
        Job {
            id: 0,
            title: self.title.trim().to_string(),
            company,
            location: self.location.trim().to_string(),
            job_type: self.job_type.unwrap_or(JobType::FullTime),
            experience: self.experience.unwrap_or(ExperienceLevel::Mid),
            salary,
            remote: self.remote,
            posted_date: Utc::now(),
            application_deadline: self.application_deadline,
            description: self.description.trim().to_string(),
            requirements: self.requirements,
            skills: self.skills,
        }
    }
}

/// Validates `form` and stores the resulting job.
///
/// # Errors
///
/// - [`JobBoardError::Validation`](crate::JobBoardError::Validation) naming
///   the blank fields, `requirements` when none are given, or `salary` when the
///   minimum exceeds the maximum.
/// - Any repository failure.
pub async fn post_job(repo: &dyn Repository<Job>, form: JobPostForm) -> Result<Job> {
    let form = form.tidy();
    form.validate()?;

    let job = repo.create(form.into_job()).await?;
    tracing::info!(job_id = job.id, title = %job.title, "job posted");
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::Latency;
    use crate::store::InMemoryRepository;

    fn form() -> JobPostForm {
        JobPostForm {
            title: "Backend Engineer".into(),
            company_name: "TechCorp".into(),
            company_id: Some(1),
            location: "Remote".into(),
            description: "Build services".into(),
            requirements: vec!["Rust".into(), "  ".into()],
            salary_min: Some(90_000),
            salary_max: Some(120_000),
            ..JobPostForm::default()
        }
    }

    #[tokio::test]
    async fn posts_job_with_defaults() {
        let repo = InMemoryRepository::<Job>::new(Latency::none());
        let job = post_job(&repo, form()).await.unwrap();

        assert_eq!(job.id, 1);
        assert_eq!(job.job_type, JobType::FullTime);
        assert_eq!(job.experience, ExperienceLevel::Mid);
        assert_eq!(job.requirements, ["Rust"]);
        assert_eq!(job.company, CompanyRef::linked("TechCorp", 1));
        assert_eq!(job.salary, Some(Salary::range(90_000, 120_000)));
    }

    #[tokio::test]
    async fn blank_fields_and_missing_requirements_are_named() {
        let repo = InMemoryRepository::<Job>::new(Latency::none());
        let bad = JobPostForm {
            title: " ".into(),
            requirements: vec!["".into()],
            ..form()
        };

        let err = post_job(&repo, bad).await.unwrap_err();
        assert_eq!(err.fields(), ["requirements", "title"]);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn inverted_salary_is_rejected() {
        let repo = InMemoryRepository::<Job>::new(Latency::none());
        let bad = JobPostForm {
            salary_min: Some(150_000),
            salary_max: Some(100_000),
            ..form()
        };

        let err = post_job(&repo, bad).await.unwrap_err();
        assert_eq!(err.fields(), ["salary"]);
    }

    #[test]
    fn one_sided_salary_keeps_its_bound() {
        let from = JobPostForm {
            salary_max: None,
            ..form()
        };
        let from_salary = from.salary().unwrap();
        assert_eq!((from_salary.min, from_salary.max), (Some(90_000), None));

        let up_to = JobPostForm {
            salary_min: None,
            ..form()
        };
        let up_to_salary = up_to.salary().unwrap();
        assert_eq!((up_to_salary.min, up_to_salary.max), (None, Some(120_000)));
        assert_eq!(up_to_salary.bounds(), Some((0, 120_000)));

        let none = JobPostForm {
            salary_min: None,
            salary_max: None,
            ..form()
        };
        assert_eq!(none.salary(), None);
    }
}
