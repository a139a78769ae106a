//! Repository abstraction over entity collections.
//!
//! Callers depend only on [`Repository`]; the in-memory implementation backs
//! tests and the mock board, and a persistent implementation can be swapped
//! in without touching the services.

use super::entity::Entity;
use super::patch::Patch;
use crate::domain::error::Result;
use crate::domain::EntityId;
use async_trait::async_trait;
use std::sync::Arc;

/// CRUD over one entity type.
///
/// Every method returns owned copies; callers can never reach stored state
/// through a returned value.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All records in insertion order. Never fails for the in-memory store.
    async fn get_all(&self) -> Result<Vec<E>>;

    /// # Errors
    ///
    /// Returns `NotFound` if no record has `id`.
    async fn get_by_id(&self, id: EntityId) -> Result<E>;

    /// Stores `data` under a newly allocated identifier and returns the stored copy.
    ///
    /// Whatever identifier `data` carries is ignored.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the record violates its invariants.
    async fn create(&self, data: E) -> Result<E>;

    /// Shallow-merges `patch` over the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has `id`, or a validation error if the
    /// merged record is invalid. The collection is unchanged on error.
    async fn update(&self, id: EntityId, patch: Patch) -> Result<E>;

    /// Removes the record with `id` and returns it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has `id`.
    async fn delete(&self, id: EntityId) -> Result<E>;

    /// Removes the record with `id` only if `keep_if` accepts it, checking and
    /// removing in one step so no write can land in between.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has `id` or `keep_if` rejects it. The
    /// collection is unchanged on error.
    async fn delete_if(
        &self,
        id: EntityId,
        keep_if: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync),
    ) -> Result<E>;
}

/// Shared handle to any repository implementation.
pub type SharedRepository<E> = Arc<dyn Repository<E>>;
