use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lingo_core::model::{CourseId, ProgressError, ProgressId, ProgressRecord, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for a progress record.
///
/// Mirrors the domain `ProgressRecord` so repositories can store and reload
/// rows without leaking storage concerns into the domain layer. Rehydration
/// re-checks the domain invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRow {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub xp: u32,
    pub streak: u32,
    pub hearts: u8,
    pub level: u32,
    pub lessons_completed: u32,
    pub total_lessons: u32,
    pub last_active: DateTime<Utc>,
}

impl ProgressRow {
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            id: record.id().as_str().to_owned(),
            user_id: record.user_id().as_str().to_owned(),
            course_id: record.course_id().as_str().to_owned(),
            xp: record.xp(),
            streak: record.streak(),
            hearts: record.hearts(),
            level: record.level(),
            lessons_completed: record.lessons_completed(),
            total_lessons: record.total_lessons(),
            last_active: record.last_active(),
        }
    }

    /// Convert the row back into a domain `ProgressRecord`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` when the stored counters violate the domain
    /// invariants (hearts range, completion bound, level floor).
    pub fn into_record(self) -> Result<ProgressRecord, ProgressError> {
        ProgressRecord::from_persisted(
            ProgressId::new(self.id),
            UserId::new(self.user_id),
            CourseId::new(self.course_id),
            self.xp,
            self.streak,
            self.hearts,
            self.level,
            self.lessons_completed,
            self.total_lessons,
            self.last_active,
        )
    }
}

/// Partial update for an existing progress record; `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressPatch {
    pub xp: Option<u32>,
    pub streak: Option<u32>,
    pub hearts: Option<u8>,
    pub level: Option<u32>,
    pub lessons_completed: Option<u32>,
    pub last_active: Option<DateTime<Utc>>,
}

impl ProgressPatch {
    /// Builds the patch that brings a stored row up to date with `record`.
    #[must_use]
    pub fn from_record(record: &ProgressRecord) -> Self {
        Self {
            xp: Some(record.xp()),
            streak: Some(record.streak()),
            hearts: Some(record.hearts()),
            level: Some(record.level()),
            lessons_completed: Some(record.lessons_completed()),
            last_active: Some(record.last_active()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Applies the patch in place to a stored row.
    pub fn apply(&self, row: &mut ProgressRow) {
        if let Some(xp) = self.xp {
            row.xp = xp;
        }
        if let Some(streak) = self.streak {
            row.streak = streak;
        }
        if let Some(hearts) = self.hearts {
            row.hearts = hearts;
        }
        if let Some(level) = self.level {
            row.level = level;
        }
        if let Some(lessons_completed) = self.lessons_completed {
            row.lessons_completed = lessons_completed;
        }
        if let Some(last_active) = self.last_active {
            row.last_active = last_active;
        }
    }
}

/// Repository contract for progress records.
///
/// These are the only operation shapes the application issues against the
/// data store; the hosted backend, the SQLite stand-in, and the local
/// fallback all sit behind this one trait.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// All progress records for a user, ordered by last-active descending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be read.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressRecord>, StorageError>;

    /// The record for a (user, course) pair, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for read failures; a missing record is `Ok(None)`.
    async fn find(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<ProgressRecord>, StorageError>;

    /// Insert a freshly created record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` when a record already exists for the
    /// same id or (user, course) pair.
    async fn create(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Apply a partial update to an existing record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when no record has the given id.
    async fn update(&self, id: &ProgressId, patch: &ProgressPatch) -> Result<(), StorageError>;
}

/// Simple in-memory repository for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    rows: Arc<Mutex<HashMap<String, ProgressRow>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = self
            .rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut rows: Vec<ProgressRow> = guard
            .values()
            .filter(|row| row.user_id == user_id.as_str())
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.last_active.cmp(&a.last_active));

        rows.into_iter()
            .map(|row| {
                row.into_record()
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .collect()
    }

    async fn find(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let row = guard
            .values()
            .find(|row| row.user_id == user_id.as_str() && row.course_id == course_id.as_str())
            .cloned();

        row.map(|row| {
            row.into_record()
                .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn create(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let row = ProgressRow::from_record(record);
        let pair_taken = guard
            .values()
            .any(|existing| existing.user_id == row.user_id && existing.course_id == row.course_id);
        if pair_taken || guard.contains_key(&row.id) {
            return Err(StorageError::Conflict);
        }
        guard.insert(row.id.clone(), row);
        Ok(())
    }

    async fn update(&self, id: &ProgressId, patch: &ProgressPatch) -> Result<(), StorageError> {
        let mut guard = self
            .rows
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let row = guard.get_mut(id.as_str()).ok_or(StorageError::NotFound)?;
        patch.apply(row);
        Ok(())
    }
}

/// Aggregates the progress repository behind a trait object for backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            progress: Arc::new(InMemoryRepository::new()),
        }
    }
}
