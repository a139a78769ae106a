//! Saved-items registry.
//!
//! The registry owns the candidate's set of favorited job identifiers and
//! writes the whole set back to its [`KeyValueStore`] on every toggle. If the
//! store cannot be read or written, the registry logs a warning and keeps
//! working from memory for the rest of the session.

use crate::domain::error::{JobBoardError, Result};
use crate::domain::{EntityId, Job};
use crate::storage::KeyValueStore;
use serde_json::Value;

/// Storage key holding the saved job identifiers.
pub const SAVED_JOBS_KEY: &str = "savedJobs";

/// Persisted set of saved job identifiers, kept in save order.
///
/// # Example
///
/// ```rust
/// use jobboard::saved::SavedJobs;
/// use jobboard::storage::MemoryStore;
///
/// let mut saved = SavedJobs::load(Box::new(MemoryStore::default()));
/// assert_eq!(saved.toggle(3), vec![3]);
/// assert!(saved.is_saved(3));
/// assert!(saved.toggle(3).is_empty());
/// ```
pub struct SavedJobs {
    store: Box<dyn KeyValueStore>,
    ids: Vec<EntityId>,
    degraded: bool,
}

impl SavedJobs {
    /// Reads the saved set from `store`.
    ///
    /// A missing value is an empty set. An unreadable or undecodable value
    /// puts the registry in memory-only mode, starting empty; the stored
    /// value is left untouched.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let mut registry = Self {
            store,
            ids: Vec::new(),
            degraded: false,
        };

        match registry.read() {
            Ok(ids) => {
                tracing::debug!(count = ids.len(), "saved jobs loaded");
                registry.ids = ids;
            }
            Err(e) => {
                tracing::warn!(error = %e, "saved jobs unavailable, keeping them in memory only");
                registry.degraded = true;
            }
        }
        registry
    }

    fn read(&self) -> Result<Vec<EntityId>> {
        let Some(value) = self.store.get(SAVED_JOBS_KEY)? else {
            return Ok(Vec::new());
        };
        let raw: Vec<EntityId> = serde_json::from_value(value).map_err(|e| {
            JobBoardError::Storage(format!("cannot decode {SAVED_JOBS_KEY}: {e}"))
        })?;

        let mut ids = Vec::with_capacity(raw.len());
        for id in raw {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    fn persist(&mut self) {
        if self.degraded {
            return;
        }
        let value = Value::from(self.ids.clone());
        if let Err(e) = self.store.set(SAVED_JOBS_KEY, value) {
            tracing::warn!(error = %e, "failed to persist saved jobs, keeping them in memory only");
            self.degraded = true;
        }
    }

    #[must_use]
    pub fn is_saved(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    /// Flips membership of `id`, persists the whole set and returns it.
    pub fn toggle(&mut self, id: EntityId) -> Vec<EntityId> {
        let _span = tracing::debug_span!("saved_jobs_toggle", id).entered();

        if let Some(index) = self.ids.iter().position(|&saved| saved == id) {
            self.ids.remove(index);
            tracing::debug!("job unsaved");
        } else {
            self.ids.push(id);
            tracing::debug!("job saved");
        }
        self.persist();
        self.ids.clone()
    }

    /// Unsaves `id` if present. Returns whether anything changed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&saved| saved != id);
        let changed = self.ids.len() != before;
        if changed {
            self.persist();
        }
        changed
    }

    /// Current saved identifiers in the order they were saved.
    #[must_use]
    pub fn list(&self) -> Vec<EntityId> {
        self.ids.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Saved jobs looked up in `jobs`, in save order.
    ///
    /// Identifiers with no matching job (the posting was removed) are skipped.
    #[must_use]
    pub fn resolve(&self, jobs: &[Job]) -> Vec<Job> {
        self.ids
            .iter()
            .filter_map(|id| jobs.iter().find(|job| job.id == *id))
            .cloned()
            .collect()
    }

    /// True once the registry has fallen back to memory-only mode.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }
}

impl std::fmt::Debug for SavedJobs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedJobs")
            .field("ids", &self.ids)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}
