//! Salary-range criteria and the overlap test.

use crate::domain::error::{JobBoardError, Result};
use crate::domain::Salary;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Field name reported when a salary range is rejected.
const FIELD: &str = "salaryRange";

/// Preset ranges offered by the filter panel, as `(label, preset)` pairs.
pub const SALARY_PRESETS: [(&str, &str); 5] = [
    ("Under $50k", "0-50000"),
    ("$50k - $75k", "50000-75000"),
    ("$75k - $100k", "75000-100000"),
    ("$100k - $150k", "100000-150000"),
    ("$150k+", "150000+"),
];

/// Inclusive salary interval a searcher is interested in.
///
/// Serialized as a two-element array, `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(u64, u64)", into = "(u64, u64)")]
pub struct SalaryRange {
    min: u64,
    max: u64,
}

impl SalaryRange {
    /// # Errors
    ///
    /// Returns a validation error naming `salaryRange` when `min > max`.
    pub fn new(min: u64, max: u64) -> Result<Self> {
        if min > max {
            return Err(JobBoardError::validation([FIELD]));
        }
        Ok(Self { min, max })
    }

    /// Everything from `min` upwards.
    #[must_use]
    pub const fn at_least(min: u64) -> Self {
        Self { min, max: u64::MAX }
    }

    #[must_use]
    pub const fn min(&self) -> u64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }

    /// Interval overlap with `[low, high]`: true iff `high >= min && low <= max`.
    ///
    /// A job paying 60k-80k overlaps a 70k-90k search even though neither
    /// range contains the other.
    #[must_use]
    pub const fn overlaps(&self, low: u64, high: u64) -> bool {
        high >= self.min && low <= self.max
    }

    /// Overlap test against a posting's salary.
    ///
    /// Undisclosed salaries, and salary objects with no figures, never match.
    #[must_use]
    pub fn admits(&self, salary: Option<&Salary>) -> bool {
        salary
            .and_then(Salary::bounds)
            .is_some_and(|(low, high)| self.overlaps(low, high))
    }

    /// Parses a filter-panel preset such as `"50000-75000"` or `"150000+"`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming `salaryRange` for anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use jobboard::search::SalaryRange;
    ///
    /// let range = SalaryRange::from_preset("50000-75000")?;
    /// assert_eq!((range.min(), range.max()), (50_000, 75_000));
    /// assert_eq!(SalaryRange::from_preset("150000+")?.max(), u64::MAX);
    /// # Ok::<(), jobboard::JobBoardError>(())
    /// ```
    pub fn from_preset(preset: &str) -> Result<Self> {
        let preset = preset.trim();
        let invalid = || JobBoardError::validation([FIELD]);

        if let Some(min) = preset.strip_suffix('+') {
            let min = min.trim().parse::<u64>().map_err(|_| invalid())?;
            return Ok(Self::at_least(min));
        }

        let (min, max) = preset.split_once('-').ok_or_else(invalid)?;
        let min = min.trim().parse::<u64>().map_err(|_| invalid())?;
        let max = max.trim().parse::<u64>().map_err(|_| invalid())?;
        Self::new(min, max)
    }
}

impl FromStr for SalaryRange {
    type Err = JobBoardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_preset(s)
    }
}

impl TryFrom<(u64, u64)> for SalaryRange {
    type Error = JobBoardError;

    fn try_from((min, max): (u64, u64)) -> Result<Self> {
        Self::new(min, max)
    }
}

impl From<SalaryRange> for (u64, u64) {
    fn from(range: SalaryRange) -> Self {
        (range.min, range.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_not_containment() {
        let job = Salary::range(60_000, 80_000);
        assert!(SalaryRange::new(70_000, 90_000).unwrap().admits(Some(&job)));
        assert!(!SalaryRange::new(90_000, 100_000).unwrap().admits(Some(&job)));
        assert!(SalaryRange::new(80_000, 80_000).unwrap().admits(Some(&job)));
    }

    #[test]
    fn single_amount_is_both_bounds() {
        let job = Salary::amount(75_000);
        assert!(SalaryRange::new(70_000, 80_000).unwrap().admits(Some(&job)));
        assert!(!SalaryRange::new(76_000, 80_000).unwrap().admits(Some(&job)));
    }

    #[test]
    fn max_only_salary_spans_from_zero() {
        let up_to = Salary { max: Some(80_000), ..Salary::default() };
        assert!(SalaryRange::from_preset("0-50000").unwrap().admits(Some(&up_to)));
        assert!(SalaryRange::from_preset("75000-100000").unwrap().admits(Some(&up_to)));
        assert!(!SalaryRange::from_preset("100000-150000").unwrap().admits(Some(&up_to)));
    }

    #[test]
    fn missing_salary_never_matches() {
        let range = SalaryRange::new(0, u64::MAX).unwrap();
        assert!(!range.admits(None));
        assert!(!range.admits(Some(&Salary::default())));
    }

    #[test]
    fn every_preset_parses() {
        for (label, preset) in SALARY_PRESETS {
            assert!(SalaryRange::from_preset(preset).is_ok(), "{label}");
        }
    }

    #[test]
    fn malformed_presets_are_rejected() {
        for bad in ["", "abc", "100-50", "10-", "+"] {
            let err = SalaryRange::from_preset(bad).unwrap_err();
            assert_eq!(err.fields(), ["salaryRange"], "{bad}");
        }
    }

    #[test]
    fn serializes_as_pair() {
        let range = SalaryRange::new(60_000, 65_000).unwrap();
        assert_eq!(serde_json::to_string(&range).unwrap(), "[60000,65000]");
        let parsed: SalaryRange = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(parsed, SalaryRange::new(1, 2).unwrap());
        assert!(serde_json::from_str::<SalaryRange>("[5,1]").is_err());
    }
}
