//! Company search and company-to-job lookups.

use crate::domain::{Company, Job};
use serde::{Deserialize, Serialize};

/// Criteria for [`filter_companies`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyFilter {
    /// Case-insensitive substring of name, industry or description.
    pub text: String,
}

impl CompanyFilter {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Returns the companies matching `filter`, in input order.
#[must_use]
pub fn filter_companies(companies: &[Company], filter: &CompanyFilter) -> Vec<Company> {
    let term = filter.text.trim().to_lowercase();
    if term.is_empty() {
        return companies.to_vec();
    }

    let filtered: Vec<Company> = companies
        .iter()
        .filter(|company| {
            [&company.name, &company.industry, &company.description]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
        })
        .cloned()
        .collect();

    tracing::debug!(
        total = companies.len(),
        filtered_count = filtered.len(),
        "company filter applied"
    );
    filtered
}

/// Jobs posted by `company`: linked by id, or carrying the same company name.
#[must_use]
pub fn jobs_for_company(jobs: &[Job], company: &Company) -> Vec<Job> {
    jobs.iter()
        .filter(|job| job.company.id == Some(company.id) || job.company.name == company.name)
        .cloned()
        .collect()
}
