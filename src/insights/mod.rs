//! Candidate and employer dashboard statistics.

pub mod stats;

pub use stats::{ApplicationStats, EmployerStats};
