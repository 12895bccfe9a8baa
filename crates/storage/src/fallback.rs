//! Primary-plus-fallback composition of two progress repositories.
//!
//! Reads prefer the primary store and mirror successful results into the
//! fallback so it stays warm; when the primary is unavailable the fallback
//! serves (and absorbs) the traffic. Failures are logged, never surfaced,
//! so the screens keep working against whichever store answered.

use std::sync::Arc;

use lingo_core::model::{CourseId, ProgressId, ProgressRecord, UserId};
use tracing::warn;

use crate::repository::{ProgressPatch, ProgressRepository, StorageError};

#[derive(Clone)]
pub struct FallbackProgressStore {
    primary: Arc<dyn ProgressRepository>,
    fallback: Arc<dyn ProgressRepository>,
}

impl FallbackProgressStore {
    #[must_use]
    pub fn new(primary: Arc<dyn ProgressRepository>, fallback: Arc<dyn ProgressRepository>) -> Self {
        Self { primary, fallback }
    }

    async fn mirror(&self, record: &ProgressRecord) {
        let result = match self.fallback.find(record.user_id(), record.course_id()).await {
            Ok(Some(_)) => {
                self.fallback
                    .update(record.id(), &ProgressPatch::from_record(record))
                    .await
            }
            Ok(None) => self.fallback.create(record).await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(error = %e, "failed to mirror progress record into fallback store");
        }
    }
}

#[async_trait::async_trait]
impl ProgressRepository for FallbackProgressStore {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        match self.primary.list_for_user(user_id).await {
            Ok(records) => {
                for record in &records {
                    self.mirror(record).await;
                }
                Ok(records)
            }
            Err(e) => {
                warn!(error = %e, user = %user_id, "primary store unavailable, listing from fallback");
                self.fallback.list_for_user(user_id).await
            }
        }
    }

    async fn find(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        match self.primary.find(user_id, course_id).await {
            Ok(found) => {
                if let Some(record) = &found {
                    self.mirror(record).await;
                }
                Ok(found)
            }
            Err(e) => {
                warn!(error = %e, user = %user_id, "primary store unavailable, reading fallback");
                self.fallback.find(user_id, course_id).await
            }
        }
    }

    async fn create(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        match self.primary.create(record).await {
            Ok(()) => {
                self.mirror(record).await;
                Ok(())
            }
            Err(StorageError::Conflict) => Err(StorageError::Conflict),
            Err(e) => {
                warn!(error = %e, "primary store unavailable, creating in fallback");
                self.fallback.create(record).await
            }
        }
    }

    async fn update(&self, id: &ProgressId, patch: &ProgressPatch) -> Result<(), StorageError> {
        match self.primary.update(id, patch).await {
            Ok(()) => {
                if let Err(e) = self.fallback.update(id, patch).await {
                    // The fallback may simply not know this record yet.
                    warn!(error = %e, "failed to apply progress patch to fallback store");
                }
                Ok(())
            }
            Err(StorageError::NotFound) => Err(StorageError::NotFound),
            Err(e) => {
                warn!(error = %e, "primary store unavailable, updating fallback");
                self.fallback.update(id, patch).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use lingo_core::time::fixed_now;

    struct FailingRepository;

    #[async_trait::async_trait]
    impl ProgressRepository for FailingRepository {
        async fn list_for_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<ProgressRecord>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }

        async fn find(
            &self,
            _user_id: &UserId,
            _course_id: &CourseId,
        ) -> Result<Option<ProgressRecord>, StorageError> {
            Err(StorageError::Connection("down".into()))
        }

        async fn create(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
            Err(StorageError::Connection("down".into()))
        }

        async fn update(
            &self,
            _id: &ProgressId,
            _patch: &ProgressPatch,
        ) -> Result<(), StorageError> {
            Err(StorageError::Connection("down".into()))
        }
    }

    fn build_record(id: &str, user: &str, course: &str) -> ProgressRecord {
        ProgressRecord::first_attempt(
            ProgressId::new(id),
            UserId::new(user),
            CourseId::new(course),
            true,
            10,
            35,
            fixed_now(),
        )
    }

    #[tokio::test]
    async fn reads_degrade_to_fallback_when_primary_is_down() {
        let fallback = Arc::new(InMemoryRepository::new());
        fallback
            .create(&build_record("p-1", "u-1", "sql"))
            .await
            .unwrap();
        let store = FallbackProgressStore::new(Arc::new(FailingRepository), fallback);

        let listed = store.list_for_user(&UserId::new("u-1")).await.unwrap();
        assert_eq!(listed.len(), 1);

        let found = store
            .find(&UserId::new("u-1"), &CourseId::new("sql"))
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn writes_land_in_fallback_when_primary_is_down() {
        let fallback = Arc::new(InMemoryRepository::new());
        let store =
            FallbackProgressStore::new(Arc::new(FailingRepository), Arc::clone(&fallback) as _);

        let record = build_record("p-1", "u-1", "sql");
        store.create(&record).await.unwrap();

        let patch = ProgressPatch {
            xp: Some(30),
            ..ProgressPatch::default()
        };
        store.update(&ProgressId::new("p-1"), &patch).await.unwrap();

        let found = fallback
            .find(&UserId::new("u-1"), &CourseId::new("sql"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.xp(), 30);
    }

    #[tokio::test]
    async fn successful_primary_reads_warm_the_fallback() {
        let primary = Arc::new(InMemoryRepository::new());
        let fallback = Arc::new(InMemoryRepository::new());
        primary
            .create(&build_record("p-1", "u-1", "sql"))
            .await
            .unwrap();
        let store =
            FallbackProgressStore::new(Arc::clone(&primary) as _, Arc::clone(&fallback) as _);

        let listed = store.list_for_user(&UserId::new("u-1")).await.unwrap();
        assert_eq!(listed.len(), 1);

        // Cached copy is now present in the fallback too.
        let cached = fallback.list_for_user(&UserId::new("u-1")).await.unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn conflict_from_primary_is_not_retried_on_fallback() {
        let primary = Arc::new(InMemoryRepository::new());
        let fallback = Arc::new(InMemoryRepository::new());
        let record = build_record("p-1", "u-1", "sql");
        primary.create(&record).await.unwrap();
        let store =
            FallbackProgressStore::new(Arc::clone(&primary) as _, Arc::clone(&fallback) as _);

        let duplicate = build_record("p-2", "u-1", "sql");
        let err = store.create(&duplicate).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }
}
