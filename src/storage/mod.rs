//! Storage layer for durable client-local state and seed fixtures.
//!
//! # Modules
//!
//! - `backend`: the [`KeyValueStore`] port
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-memory implementation
//! - `fixtures`: seed documents for the entity stores

pub mod backend;
pub mod fixtures;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use fixtures::Fixtures;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
