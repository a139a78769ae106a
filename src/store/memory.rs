//! In-memory entity store with a single writer.
//!
//! Records live in a `Vec` behind a `tokio::sync::RwLock`: reads share the
//! lock, every mutation (id allocation, merge, removal) runs under the write
//! lock as one critical section. The simulated latency is awaited before the
//! lock is taken, so a request aborted during its delay changes nothing.

use super::entity::Entity;
use super::patch::Patch;
use super::repository::Repository;
use crate::domain::error::{JobBoardError, Result};
use crate::domain::EntityId;
use crate::infrastructure::latency::{Latency, Operation};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::Instrument;

/// Records plus the highest identifier ever handed out.
#[derive(Debug)]
struct Collection<E> {
    records: Vec<E>,
    high_water: EntityId,
}

impl<E: Entity> Collection<E> {
    fn position(&self, id: EntityId) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(JobBoardError::NotFound { entity: E::KIND, id })
    }

    /// `max(high-water, max existing) + 1`, so deleted ids are never reused.
    fn next_id(&self) -> Result<EntityId> {
        let max_existing = self.records.iter().map(Entity::id).max().unwrap_or(0);
        self.high_water
            .max(max_existing)
            .checked_add(1)
            .ok_or_else(|| JobBoardError::Storage(format!("{} id space exhausted", E::KIND)))
    }
}

/// Entity store backed by process memory.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    collection: RwLock<Collection<E>>,
    latency: Latency,
}

impl<E: Entity> InMemoryRepository<E> {
    /// An empty store.
    #[must_use]
    pub fn new(latency: Latency) -> Self {
        Self {
            collection: RwLock::new(Collection {
                records: Vec::new(),
                high_water: 0,
            }),
            latency,
        }
    }

    /// A store seeded with fixture records, kept in the given order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a record has identifier 0 or two records
    /// share an identifier, and a validation error if a record violates its
    /// invariants.
    pub fn seeded(records: Vec<E>, latency: Latency) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            let id = record.id();
            if id == 0 || !seen.insert(id) {
                return Err(JobBoardError::Storage(format!(
                    "invalid or duplicate {} id in seed data: {id}",
                    E::KIND
                )));
            }
            record.check()?;
        }

        let high_water = seen.into_iter().max().unwrap_or(0);
        tracing::debug!(entity = E::KIND, count = records.len(), high_water, "store seeded");

        Ok(Self {
            collection: RwLock::new(Collection {
                records,
                high_water,
            }),
            latency,
        })
    }

    /// Number of stored records, without simulated latency.
    pub async fn len(&self) -> usize {
        self.collection.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>> {
        async move {
            self.latency.simulate(Operation::GetAll).await;
            let records = self.collection.read().await.records.clone();
            tracing::debug!(count = records.len(), "retrieved records");
            Ok(records)
        }
        .instrument(tracing::debug_span!("repo_get_all", entity = E::KIND))
        .await
    }

    async fn get_by_id(&self, id: EntityId) -> Result<E> {
        async move {
            self.latency.simulate(Operation::GetById).await;
            let collection = self.collection.read().await;
            let index = collection.position(id)?;
            Ok(collection.records[index].clone())
        }
        .instrument(tracing::debug_span!("repo_get_by_id", entity = E::KIND, id))
        .await
    }

    async fn create(&self, mut data: E) -> Result<E> {
        async move {
            self.latency.simulate(Operation::Create).await;

            let mut collection = self.collection.write().await;
            data.stamp_created(Utc::now());
            data.check()?;

            let id = collection.next_id()?;
            data.assign_id(id);
            collection.high_water = id;
            collection.records.push(data.clone());

            tracing::debug!(id, "record created");
            Ok(data)
        }
        .instrument(tracing::debug_span!("repo_create", entity = E::KIND))
        .await
    }

    async fn update(&self, id: EntityId, patch: Patch) -> Result<E> {
        async move {
            self.latency.simulate(Operation::Update).await;

            let mut collection = self.collection.write().await;
            let index = collection.position(id)?;

            let mut updated = patch.apply(&collection.records[index])?;
            updated.assign_id(id);
            updated.stamp_updated(Utc::now());
            updated.check()?;

            collection.records[index] = updated.clone();
            tracing::debug!(fields = patch.len(), "record updated");
            Ok(updated)
        }
        .instrument(tracing::debug_span!("repo_update", entity = E::KIND, id))
        .await
    }

    async fn delete(&self, id: EntityId) -> Result<E> {
        async move {
            self.latency.simulate(Operation::Delete).await;

            let mut collection = self.collection.write().await;
            let index = collection.position(id)?;
            let removed = collection.records.remove(index);

            tracing::debug!(remaining = collection.records.len(), "record deleted");
            Ok(removed)
        }
        .instrument(tracing::debug_span!("repo_delete", entity = E::KIND, id))
        .await
    }

    async fn delete_if(
        &self,
        id: EntityId,
        keep_if: &(dyn for<'a> Fn(&'a E) -> bool + Send + Sync),
    ) -> Result<E> {
        async move {
            self.latency.simulate(Operation::Delete).await;

            let mut collection = self.collection.write().await;
            let index = collection.position(id)?;
            if !keep_if(&collection.records[index]) {
                tracing::debug!("delete condition rejected record");
                return Err(JobBoardError::NotFound { entity: E::KIND, id });
            }
            let removed = collection.records.remove(index);

            tracing::debug!(remaining = collection.records.len(), "record deleted");
            Ok(removed)
        }
        .instrument(tracing::debug_span!("repo_delete_if", entity = E::KIND, id))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Application, ApplicationStatus, CandidateId, CompanyRef, ExperienceLevel, Job, JobType,
        Salary, Testimonial,
    };
    use crate::infrastructure::abort_pair;
    use serde_json::json;
    use std::time::Duration;

    fn job(id: EntityId, title: &str) -> Job {
        Job {
            id,
            title: title.into(),
            company: CompanyRef::named("Acme"),
            location: "Remote".into(),
            job_type: JobType::FullTime,
            experience: ExperienceLevel::Mid,
            salary: Some(Salary::range(50_000, 70_000)),
            remote: true,
            posted_date: Utc::now(),
            application_deadline: None,
            description: String::new(),
            requirements: vec!["React".into()],
            skills: vec![],
        }
    }

    fn store(jobs: Vec<Job>) -> InMemoryRepository<Job> {
        InMemoryRepository::seeded(jobs, Latency::none()).unwrap()
    }

    #[tokio::test]
    async fn get_all_preserves_insertion_order() {
        let repo = store(vec![job(3, "c"), job(1, "a"), job(2, "b")]);
        let ids: Vec<_> = repo.get_all().await.unwrap().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn returned_copies_do_not_alias_stored_state() {
        let repo = store(vec![job(1, "Engineer")]);
        let mut copy = repo.get_by_id(1).await.unwrap();
        copy.title = "Mutated".into();
        assert_eq!(repo.get_by_id(1).await.unwrap().title, "Engineer");
    }

    #[tokio::test]
    async fn get_by_id_missing_is_not_found() {
        let repo = store(vec![job(1, "Engineer")]);
        let err = repo.get_by_id(42).await.unwrap_err();
        assert!(matches!(err, JobBoardError::NotFound { entity: "job", id: 42 }));
    }

    #[tokio::test]
    async fn create_then_get_returns_created_record() {
        let repo = store(vec![job(1, "Engineer"), job(2, "Designer")]);
        let created = repo.create(job(0, "Analyst")).await.unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(repo.get_by_id(3).await.unwrap(), created);
    }

    #[tokio::test]
    async fn create_on_empty_store_starts_at_one() {
        let repo: InMemoryRepository<Job> = InMemoryRepository::new(Latency::none());
        assert!(repo.is_empty().await);
        let created = repo.create(job(77, "First")).await.unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = store(vec![job(1, "a"), job(2, "b")]);
        let third = repo.create(job(0, "c")).await.unwrap();
        repo.delete(third.id).await.unwrap();

        let fourth = repo.create(job(0, "d")).await.unwrap();
        assert_eq!(fourth.id, 4);
        let ids: Vec<_> = repo.get_all().await.unwrap().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn back_to_back_creates_get_distinct_ids() {
        let repo = std::sync::Arc::new(store(vec![job(1, "a")]));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(job(0, &format!("job {i}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (2..=9).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn create_stamps_posted_date() {
        let repo = store(vec![]);
        let mut draft = job(0, "Fresh");
        draft.posted_date = Utc::now() - chrono::Duration::days(30);
        let before = Utc::now();
        let created = repo.create(draft).await.unwrap();
        assert!(created.posted_date >= before);
    }

    #[tokio::test]
    async fn create_rejects_inverted_salary() {
        let repo = store(vec![]);
        let mut draft = job(0, "Bad");
        draft.salary = Some(Salary::range(90_000, 10_000));
        let err = repo.create(draft).await.unwrap_err();
        assert_eq!(err.fields(), ["salary"]);
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn update_merges_and_returns_copy() {
        let repo = store(vec![job(1, "Engineer")]);
        let updated = repo
            .update(1, Patch::new().set("title", json!("Staff Engineer")))
            .await
            .unwrap();
        assert_eq!(updated.title, "Staff Engineer");
        assert_eq!(updated.location, "Remote");
        assert_eq!(repo.get_by_id(1).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_missing_id_leaves_collection_unchanged() {
        let repo = store(vec![job(1, "Engineer")]);
        let before = repo.get_all().await.unwrap();

        let err = repo
            .update(9, Patch::new().set("title", json!("Ghost")))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(repo.get_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_unchanged() {
        let repo = store(vec![job(1, "Engineer")]);
        let before = repo.get_by_id(1).await.unwrap();

        let err = repo
            .update(1, Patch::new().set("salary", json!({"min": 80000, "max": 20000})))
            .await
            .unwrap_err();

        assert_eq!(err.fields(), ["salary"]);
        assert_eq!(repo.get_by_id(1).await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_returns_removed_record() {
        let repo = store(vec![job(1, "a"), job(2, "b")]);
        let removed = repo.delete(1).await.unwrap();
        assert_eq!(removed.title, "a");
        assert!(repo.delete(1).await.unwrap_err().is_not_found());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn delete_if_removes_only_accepted_records() {
        let repo = store(vec![job(1, "keep"), job(2, "drop")]);

        let err = repo.delete_if(1, &|j: &Job| j.title == "drop").await.unwrap_err();
        assert!(matches!(err, JobBoardError::NotFound { entity: "job", id: 1 }));
        assert_eq!(repo.len().await, 2);

        let removed = repo.delete_if(2, &|j: &Job| j.title == "drop").await.unwrap();
        assert_eq!(removed.id, 2);
        assert!(repo.delete_if(2, &|_: &Job| true).await.unwrap_err().is_not_found());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn seeding_rejects_duplicate_ids() {
        let err = InMemoryRepository::seeded(vec![job(1, "a"), job(1, "b")], Latency::none())
            .unwrap_err();
        assert!(matches!(err, JobBoardError::Storage(_)));
    }

    #[tokio::test]
    async fn seeding_rejects_invalid_records() {
        let mut bad = job(2, "Inverted");
        bad.salary = Some(Salary::range(90_000, 10_000));
        let err = InMemoryRepository::seeded(vec![job(1, "a"), bad], Latency::none()).unwrap_err();
        assert_eq!(err.fields(), ["salary"]);
    }

    #[tokio::test]
    async fn application_update_refreshes_last_updated_only() {
        let applied = Utc::now() - chrono::Duration::days(2);
        let seed = Application {
            id: 1,
            job_id: 1,
            candidate_id: CandidateId::new("user-1"),
            resume: "http://resume".into(),
            cover_letter: "Hello".into(),
            status: ApplicationStatus::Submitted,
            applied_date: applied,
            last_updated: applied,
            job_title: None,
            company_name: None,
        };
        let repo = InMemoryRepository::seeded(vec![seed], Latency::none()).unwrap();

        let updated = repo
            .update(1, Patch::new().set("status", json!("viewed")))
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Viewed);
        assert_eq!(updated.applied_date, applied);
        assert!(updated.last_updated > applied);
    }

    #[tokio::test]
    async fn testimonials_are_created_unapproved() {
        let repo: InMemoryRepository<Testimonial> = InMemoryRepository::new(Latency::none());
        let draft = Testimonial {
            id: 0,
            name: "Ann".into(),
            position: String::new(),
            company: String::new(),
            content: "Great".into(),
            rating: 5,
            avatar: None,
            location: None,
            approved: true,
            date: None,
        };
        let created = repo.create(draft).await.unwrap();
        assert!(!created.approved);
        assert!(created.date.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn operations_wait_for_simulated_latency() {
        let repo = InMemoryRepository::seeded(vec![job(1, "a")], Latency::simulated()).unwrap();
        let start = tokio::time::Instant::now();
        repo.get_by_id(1).await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_create_does_not_mutate() {
        let repo = InMemoryRepository::seeded(vec![job(1, "a")], Latency::simulated()).unwrap();
        let (handle, signal) = abort_pair();

        let (result, ()) = tokio::join!(signal.run(repo.create(job(0, "late"))), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            handle.abort();
        });

        assert!(matches!(result, Err(JobBoardError::Cancelled)));
        assert_eq!(repo.len().await, 1);
    }
}
