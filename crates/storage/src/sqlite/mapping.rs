use chrono::{DateTime, Utc};
use lingo_core::model::ProgressRecord;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{ProgressRow, StorageError};

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, StorageError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| StorageError::Serialization(format!("column {name}: {e}")))
}

fn counter_u32(value: i64, name: &str) -> Result<u32, StorageError> {
    u32::try_from(value).map_err(|_| StorageError::Serialization(format!("{name} out of range")))
}

/// Maps one `user_progress` row into a domain record, re-checking invariants.
pub fn map_progress_row(row: &SqliteRow) -> Result<ProgressRecord, StorageError> {
    let id: String = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let course_id: String = column(row, "course_id")?;
    let xp: i64 = column(row, "xp")?;
    let streak: i64 = column(row, "streak")?;
    let hearts: i64 = column(row, "hearts")?;
    let level: i64 = column(row, "level")?;
    let lessons_completed: i64 = column(row, "lessons_completed")?;
    let total_lessons: i64 = column(row, "total_lessons")?;
    let last_active: DateTime<Utc> = column(row, "last_active")?;

    let progress_row = ProgressRow {
        id,
        user_id,
        course_id,
        xp: counter_u32(xp, "xp")?,
        streak: counter_u32(streak, "streak")?,
        hearts: u8::try_from(hearts)
            .map_err(|_| StorageError::Serialization("hearts out of range".into()))?,
        level: counter_u32(level, "level")?,
        lessons_completed: counter_u32(lessons_completed, "lessons_completed")?,
        total_lessons: counter_u32(total_lessons, "total_lessons")?,
        last_active,
    };

    progress_row
        .into_record()
        .map_err(|e| StorageError::Serialization(e.to_string()))
}
