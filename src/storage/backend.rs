//! Durable key-value port.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over where
//! client-local durable state lives: a JSON file, an in-memory map, or any
//! other backend. Reads and writes are whole-value; callers read the entire
//! value, change it, and write the entire value back.

use crate::domain::error::Result;
use serde_json::Value;

/// Abstraction over durable client-local storage.
///
/// # Implementations
///
/// - [`JsonFileStore`](super::JsonFileStore): JSON file with atomic writes
/// - [`MemoryStore`](super::MemoryStore): process-local map, lost on exit
///
/// # Examples
///
/// ```
/// use jobboard::storage::{KeyValueStore, MemoryStore};
/// use serde_json::json;
///
/// let mut store = MemoryStore::default();
/// store.set("savedJobs", json!([3, 1]))?;
/// assert_eq!(store.get("savedJobs")?, Some(json!([3, 1])));
/// # Ok::<(), jobboard::JobBoardError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the whole value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing was ever written under that key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replaces the whole value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<()>;
}
