//! Namespaced JSON key-value store used as the local fallback backend.
//!
//! Stores one JSON document per key under `<root>/<namespace>/`. The
//! progress adapter keys documents by user id, so fallback data stays
//! per-learner.

use std::fs;
use std::path::PathBuf;

use lingo_core::model::{CourseId, ProgressId, ProgressRecord, UserId};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{ProgressPatch, ProgressRepository, ProgressRow, StorageError};

/// A tiny file-backed key-value store scoped to one namespace.
#[derive(Debug, Clone)]
pub struct JsonKvStore {
    dir: PathBuf,
}

impl JsonKvStore {
    /// Opens (and creates) the namespace directory under `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` when the directory cannot be
    /// created.
    pub fn open(root: impl Into<PathBuf>, namespace: &str) -> Result<Self, StorageError> {
        let dir = root.into().join(namespace);
        fs::create_dir_all(&dir).map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                    ch
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    /// Reads a value; a missing key is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` for I/O failures and
    /// `StorageError::Serialization` for malformed documents.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Connection(e.to_string())),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Writes a value, replacing any existing document for the key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for serialization or I/O failures.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes =
            serde_json::to_vec_pretty(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(self.path_for(key), bytes).map_err(|e| StorageError::Connection(e.to_string()))
    }

    /// All keys with a stored document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` when the namespace cannot be read.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::Connection(e.to_string()))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(key) = name.strip_suffix(".json") {
                keys.push(key.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Progress repository over `JsonKvStore`: one document per user holding all
/// of that user's progress rows.
#[derive(Debug, Clone)]
pub struct KvProgressStore {
    kv: JsonKvStore,
}

impl KvProgressStore {
    /// Opens the `progress` namespace under `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` when the directory cannot be
    /// created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self {
            kv: JsonKvStore::open(root, "progress")?,
        })
    }

    fn load_rows(&self, user_id: &str) -> Result<Vec<ProgressRow>, StorageError> {
        Ok(self.kv.get(user_id)?.unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl ProgressRepository for KvProgressStore {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let mut rows = self.load_rows(user_id.as_str())?;
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
        let rows = self.load_rows(user_id.as_str())?;
        rows.into_iter()
            .find(|row| row.course_id == course_id.as_str())
            .map(|row| {
                row.into_record()
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .transpose()
    }

    async fn create(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let user_key = record.user_id().as_str();
        let mut rows = self.load_rows(user_key)?;
        let row = ProgressRow::from_record(record);
        if rows
            .iter()
            .any(|existing| existing.id == row.id || existing.course_id == row.course_id)
        {
            return Err(StorageError::Conflict);
        }
        rows.push(row);
        self.kv.put(user_key, &rows)
    }

    async fn update(&self, id: &ProgressId, patch: &ProgressPatch) -> Result<(), StorageError> {
        for key in self.kv.keys()? {
            let mut rows: Vec<ProgressRow> = self.kv.get(&key)?.unwrap_or_default();
            if let Some(row) = rows.iter_mut().find(|row| row.id == id.as_str()) {
                patch.apply(row);
                return self.kv.put(&key, &rows);
            }
        }
        Err(StorageError::NotFound)
    }
}
