//! The contract every stored record type satisfies.
//!
//! An [`Entity`] knows its identifier and how to stamp its own timestamps;
//! the store decides when to call those hooks. Hooks default to no-ops so a
//! plain record (a company profile) needs only the identifier methods.

use crate::domain::error::Result;
use crate::domain::{
    Application, Company, CvSubmission, EntityId, Job, Partner, Testimonial,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialized name of the identifier field on every entity.
pub const ID_FIELD: &str = "Id";

/// A record type the entity store can own.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Entity kind used in errors and log fields, e.g. `"job"`.
    const KIND: &'static str;

    fn id(&self) -> EntityId;

    /// Overwrites the identifier. Only the store calls this, on create.
    fn assign_id(&mut self, id: EntityId);

    /// Sets creation-time fields before the record is first stored.
    fn stamp_created(&mut self, _now: DateTime<Utc>) {}

    /// Refreshes last-updated fields after a patch is merged.
    fn stamp_updated(&mut self, _now: DateTime<Utc>) {}

    /// Checks record invariants before any write is committed.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending fields.
    fn check(&self) -> Result<()> {
        Ok(())
    }
}

impl Entity for Job {
    const KIND: &'static str = "job";

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.posted_date = now;
    }

    fn check(&self) -> Result<()> {
        self.validate()
    }
}

impl Entity for Company {
    const KIND: &'static str = "company";

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl Entity for Application {
    const KIND: &'static str = "application";

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.applied_date = now;
        self.last_updated = now;
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
    }
}

impl Entity for Partner {
    const KIND: &'static str = "partner";

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
    }
}

impl Entity for Testimonial {
    const KIND: &'static str = "testimonial";

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    /// New testimonials wait for moderation regardless of what was submitted.
    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.date = Some(now);
        self.approved = false;
    }
}

impl Entity for CvSubmission {
    const KIND: &'static str = "cv";

    fn id(&self) -> EntityId {
        self.id
    }

    fn assign_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.submitted_at = now;
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}
