//! Structured logging setup.
//!
//! Library code only emits `tracing` spans and events; installing a
//! subscriber is left to the embedding application through
//! [`init_tracing`].
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `file_writer`: rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::RotatingFile;
pub use init::init_tracing;
