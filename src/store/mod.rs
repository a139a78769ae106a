//! Entity store: per-type CRUD repositories with simulated latency.
//!
//! # Modules
//!
//! - `entity`: the [`Entity`] contract and its implementations
//! - `patch`: shallow-merge [`Patch`] used by `update`
//! - `repository`: the async [`Repository`] trait
//! - `memory`: [`InMemoryRepository`], the single-writer implementation

pub mod entity;
pub mod memory;
pub mod patch;
pub mod repository;

pub use entity::Entity;
pub use memory::InMemoryRepository;
pub use patch::Patch;
pub use repository::{Repository, SharedRepository};
