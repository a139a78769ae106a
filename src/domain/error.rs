//! Error types for the job board core.
//!
//! This module defines the centralized error type [`JobBoardError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Every repository and service operation returns a typed failure; nothing is
//! swallowed. Presenting the failure (toast, banner, retry button) is the caller's job.

use thiserror::Error;

/// The main error type for job board operations.
///
/// # Examples
///
/// ```
/// use jobboard::JobBoardError;
///
/// let err = JobBoardError::NotFound { entity: "job", id: 42 };
/// assert_eq!(err.to_string(), "job not found: 42");
///
/// let err = JobBoardError::validation(["coverLetter", "resume"]);
/// assert_eq!(err.fields(), ["coverLetter", "resume"]);
/// ```
#[derive(Debug, Error)]
pub enum JobBoardError {
    /// An operation referenced an identifier that no record carries.
    ///
    /// Also returned when a record exists but does not belong to the caller,
    /// so ownership checks never reveal which identifiers exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind, e.g. `"job"` or `"application"`.
        entity: &'static str,
        /// The identifier that was looked up.
        id: u64,
    },

    /// One or more required fields are missing or malformed.
    ///
    /// Field names use their serialized (camelCase) spelling, sorted and
    /// deduplicated.
    #[error("validation failed for: {}", fields.join(", "))]
    Validation {
        /// Names of the offending fields.
        fields: Vec<String>,
    },

    /// Durable storage is unavailable or holds a value that cannot be decoded.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed outside of a field-level validation.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The caller aborted the request before it completed.
    #[error("request cancelled")]
    Cancelled,
}

impl JobBoardError {
    /// Builds a [`JobBoardError::Validation`] from any list of field names.
    ///
    /// Names are sorted and deduplicated so the error is stable regardless of
    /// the order in which checks ran.
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        fields.sort();
        fields.dedup();
        Self::Validation { fields }
    }

    /// Returns the offending field names of a validation failure.
    ///
    /// Empty for every other variant.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        match self {
            Self::Validation { fields } => fields,
            _ => &[],
        }
    }

    /// True when the error is a [`JobBoardError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<validator::ValidationErrors> for JobBoardError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::validation(
            errors
                .field_errors()
                .into_keys()
                .map(|field| camel_case(&field)),
        )
    }
}

/// Converts a Rust field name (`cover_letter`) to its serialized form (`coverLetter`).
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// A specialized `Result` type for job board operations.
pub type Result<T> = std::result::Result<T, JobBoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_fields_are_sorted_and_unique() {
        let err = JobBoardError::validation(["resume", "coverLetter", "resume"]);
        assert_eq!(err.fields(), ["coverLetter", "resume"]);
        assert_eq!(err.to_string(), "validation failed for: coverLetter, resume");
    }

    #[test]
    fn non_validation_errors_have_no_fields() {
        let err = JobBoardError::NotFound { entity: "company", id: 3 };
        assert!(err.fields().is_empty());
        assert!(err.is_not_found());
    }

    #[test]
    fn camel_case_converts_snake_names() {
        assert_eq!(camel_case("cover_letter"), "coverLetter");
        assert_eq!(camel_case("company_name"), "companyName");
        assert_eq!(camel_case("resume"), "resume");
    }
}
