//! Job posting domain model.
//!
//! A [`Job`] is the central entity of the board: it is listed, searched,
//! saved and applied to. Serialized field names follow the fixture documents
//! (`camelCase`, identifier under `Id`).

use super::error::{JobBoardError, Result};
use super::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A job posting.
///
/// # Fields
///
/// - `id`: unique positive identifier, assigned by the entity store and never changed
/// - `company`: hiring company by name, optionally linked to a `Company` record
/// - `salary`: either a `{min, max}` range or a single `amount`; absent when undisclosed
/// - `requirements`: ordered list shown on the detail page
/// - `skills`: optional tags; searched together with requirements, title and description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "Id", default)]
    pub id: EntityId,
    pub title: String,
    pub company: CompanyRef,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub experience: ExperienceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Salary>,
    #[serde(default)]
    pub remote: bool,
    #[serde(default = "Utc::now")]
    pub posted_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Job {
    /// Returns a human-readable string describing how long ago the job was posted.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - 1 day or more: "Xd ago"
    ///
    /// Postings dated in the future read as "just now".
    #[must_use]
    pub fn posted_ago(&self, now: DateTime<Utc>) -> String {
        let diff = (now - self.posted_date).num_seconds();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }

    /// True while applications are still accepted at `now`.
    ///
    /// Postings without a deadline stay open.
    #[must_use]
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.application_deadline.map_or(true, |deadline| deadline > now)
    }

    /// Checks the invariants the store enforces on every write.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `salary` when `min > max`.
    pub fn validate(&self) -> Result<()> {
        match &self.salary {
            Some(salary) if !salary.is_ordered() => Err(JobBoardError::validation(["salary"])),
            _ => Ok(()),
        }
    }
}

/// Reference from a job to its hiring company.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyRef {
    pub name: String,
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
}

impl CompanyRef {
    /// A company known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }

    /// A company linked to a stored `Company` record.
    pub fn linked(name: impl Into<String>, id: EntityId) -> Self {
        Self {
            name: name.into(),
            id: Some(id),
        }
    }
}

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl JobType {
    pub const ALL: [Self; 5] = [
        Self::FullTime,
        Self::PartTime,
        Self::Contract,
        Self::Freelance,
        Self::Internship,
    ];

    /// Display label, identical to the serialized form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Freelance => "Freelance",
            Self::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobType {
    type Err = JobBoardError;

    /// Case-insensitive; accepts `full-time`, `Full-time`, `FULL-TIME` and so on.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full-time" => Ok(Self::FullTime),
            "part-time" => Ok(Self::PartTime),
            "contract" => Ok(Self::Contract),
            "freelance" => Ok(Self::Freelance),
            "internship" => Ok(Self::Internship),
            _ => Err(JobBoardError::validation(["type"])),
        }
    }
}

/// Seniority a posting targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Entry Level")]
    Entry,
    #[serde(rename = "Mid Level")]
    Mid,
    #[serde(rename = "Senior Level")]
    Senior,
    #[serde(rename = "Executive", alias = "Executive Level")]
    Executive,
}

impl ExperienceLevel {
    pub const ALL: [Self; 4] = [Self::Entry, Self::Mid, Self::Senior, Self::Executive];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entry => "Entry Level",
            Self::Mid => "Mid Level",
            Self::Senior => "Senior Level",
            Self::Executive => "Executive",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExperienceLevel {
    type Err = JobBoardError;

    /// Accepts both the short (`mid`) and the labelled (`Mid Level`) spelling.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let key = lower.strip_suffix(" level").unwrap_or(&lower);
        match key {
            "entry" => Ok(Self::Entry),
            "mid" => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            "executive" => Ok(Self::Executive),
            _ => Err(JobBoardError::validation(["experience"])),
        }
    }
}

/// Compensation attached to a posting.
///
/// Either a range (`min`/`max`) or a single `amount`; every figure is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Salary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
}

impl Salary {
    #[must_use]
    pub const fn range(min: u64, max: u64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            amount: None,
        }
    }

    #[must_use]
    pub const fn amount(amount: u64) -> Self {
        Self {
            min: None,
            max: None,
            amount: Some(amount),
        }
    }

    /// Resolves the salary to an inclusive `[low, high]` interval.
    ///
    /// A single amount is used for both bounds. A missing minimum falls back
    /// to the amount, then to 0; a missing maximum falls back to the amount,
    /// then to the lower bound. So "up to $80k" is `[0, 80000]` and "from
    /// $40k" is `[40000, 40000]`. Returns `None` when no figure is present,
    /// which search treats the same as an undisclosed salary.
    #[must_use]
    pub fn bounds(&self) -> Option<(u64, u64)> {
        if self.min.is_none() && self.max.is_none() && self.amount.is_none() {
            return None;
        }
        let low = self.min.or(self.amount).unwrap_or(0);
        let high = self.max.or(self.amount).unwrap_or(low);
        Some((low, high))
    }

    /// False only when both bounds are present and `min > max`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max, self.amount) {
            (Some(min), Some(max), _) => write!(f, "${} - ${}", dollars(min), dollars(max)),
            (_, _, Some(amount)) => write!(f, "${}", dollars(amount)),
            _ => f.write_str("Competitive salary"),
        }
    }
}

/// Formats an optional salary for listings.
///
/// # Examples
///
/// ```
/// use jobboard::domain::{format_salary, Salary};
///
/// assert_eq!(format_salary(None), "Salary not disclosed");
/// assert_eq!(format_salary(Some(&Salary::range(50_000, 70_000))), "$50,000 - $70,000");
/// assert_eq!(format_salary(Some(&Salary::amount(75_000))), "$75,000");
/// ```
#[must_use]
pub fn format_salary(salary: Option<&Salary>) -> String {
    salary.map_or_else(|| "Salary not disclosed".to_string(), ToString::to_string)
}

/// Renders an integer with thousands separators.
fn dollars(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn job_posted_at(posted_date: DateTime<Utc>) -> Job {
        Job {
            id: 1,
            title: "Engineer".into(),
            company: CompanyRef::named("Acme"),
            location: "Remote".into(),
            job_type: JobType::FullTime,
            experience: ExperienceLevel::Mid,
            salary: None,
            remote: true,
            posted_date,
            application_deadline: None,
            description: String::new(),
            requirements: vec![],
            skills: vec![],
        }
    }

    #[test]
    fn deserializes_fixture_shape() {
        let json = r#"{
            "Id": 7,
            "title": "Data Analyst",
            "company": { "name": "Northwind", "Id": 2 },
            "location": "Austin, TX",
            "type": "Part-time",
            "experience": "Executive Level",
            "salary": { "amount": 75000 },
            "postedDate": "2024-01-15T10:00:00Z",
            "requirements": ["SQL"]
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, 7);
        assert_eq!(job.company, CompanyRef::linked("Northwind", 2));
        assert_eq!(job.job_type, JobType::PartTime);
        assert_eq!(job.experience, ExperienceLevel::Executive);
        assert_eq!(job.salary.unwrap().bounds(), Some((75_000, 75_000)));
        assert!(job.skills.is_empty());
    }

    #[test]
    fn salary_bounds_cover_every_shape() {
        assert_eq!(Salary::range(60_000, 80_000).bounds(), Some((60_000, 80_000)));
        assert_eq!(Salary::amount(75_000).bounds(), Some((75_000, 75_000)));
        let min_only = Salary { min: Some(40_000), ..Salary::default() };
        assert_eq!(min_only.bounds(), Some((40_000, 40_000)));
        let max_only = Salary { max: Some(80_000), ..Salary::default() };
        assert_eq!(max_only.bounds(), Some((0, 80_000)));
        let max_and_amount = Salary { max: Some(90_000), amount: Some(70_000), ..Salary::default() };
        assert_eq!(max_and_amount.bounds(), Some((70_000, 90_000)));
        assert_eq!(Salary::default().bounds(), None);
    }

    #[test]
    fn inverted_salary_fails_validation() {
        let mut job = job_posted_at(Utc::now());
        job.salary = Some(Salary::range(90_000, 10_000));
        let err = job.validate().unwrap_err();
        assert_eq!(err.fields(), ["salary"]);
    }

    #[test]
    fn salary_display() {
        assert_eq!(Salary::range(1_000, 1_250_000).to_string(), "$1,000 - $1,250,000");
        assert_eq!(Salary::amount(999).to_string(), "$999");
        assert_eq!(Salary::default().to_string(), "Competitive salary");
    }

    #[test]
    fn lenient_enum_parsing() {
        assert_eq!("full-time".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("INTERNSHIP".parse::<JobType>().unwrap(), JobType::Internship);
        assert_eq!("mid".parse::<ExperienceLevel>().unwrap(), ExperienceLevel::Mid);
        assert_eq!("Senior Level".parse::<ExperienceLevel>().unwrap(), ExperienceLevel::Senior);
        assert!("weekend".parse::<JobType>().is_err());
    }

    #[test]
    fn posted_ago_buckets() {
        let now = Utc::now();
        assert_eq!(job_posted_at(now).posted_ago(now), "just now");
        assert_eq!(job_posted_at(now - Duration::minutes(5)).posted_ago(now), "5m ago");
        assert_eq!(job_posted_at(now - Duration::hours(3)).posted_ago(now), "3h ago");
        assert_eq!(job_posted_at(now - Duration::days(7)).posted_ago(now), "7d ago");
    }

    #[test]
    fn deadline_controls_openness() {
        let now = Utc::now();
        let mut job = job_posted_at(now);
        assert!(job.is_open(now));
        job.application_deadline = Some(now - Duration::days(1));
        assert!(!job.is_open(now));
    }
}
