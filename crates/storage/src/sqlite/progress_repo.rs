use lingo_core::model::{CourseId, ProgressId, ProgressRecord, UserId};

use super::{SqliteRepository, mapping::map_progress_row};
use crate::repository::{ProgressPatch, ProgressRepository, ProgressRow, StorageError};

const SELECT_COLUMNS: &str = r"
    SELECT
        id, user_id, course_id, xp, streak, hearts, level,
        lessons_completed, total_lessons, last_active
    FROM user_progress
";

fn connection_error(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let sql = format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY last_active DESC");
        let rows = sqlx::query(&sql)
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(connection_error)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(map_progress_row(&row)?);
        }
        Ok(records)
    }

    async fn find(
        &self,
        user_id: &UserId,
        course_id: &CourseId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let sql = format!("{SELECT_COLUMNS} WHERE user_id = ?1 AND course_id = ?2");
        let row = sqlx::query(&sql)
            .bind(user_id.as_str())
            .bind(course_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(connection_error)?;

        row.map(|row| map_progress_row(&row)).transpose()
    }

    async fn create(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let row = ProgressRow::from_record(record);
        let result = sqlx::query(
            r"
            INSERT INTO user_progress (
                id, user_id, course_id, xp, streak, hearts, level,
                lessons_completed, total_lessons, last_active
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.course_id)
        .bind(i64::from(row.xp))
        .bind(i64::from(row.streak))
        .bind(i64::from(row.hearts))
        .bind(i64::from(row.level))
        .bind(i64::from(row.lessons_completed))
        .bind(i64::from(row.total_lessons))
        .bind(row.last_active)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StorageError::Conflict)
            }
            Err(e) => Err(connection_error(e)),
        }
    }

    async fn update(&self, id: &ProgressId, patch: &ProgressPatch) -> Result<(), StorageError> {
        if patch.is_empty() {
            // Nothing to write, but the caller still expects existence checks.
            let row = sqlx::query("SELECT 1 FROM user_progress WHERE id = ?1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(connection_error)?;
            return row.map(|_| ()).ok_or(StorageError::NotFound);
        }

        let mut sets = Vec::new();
        if patch.xp.is_some() {
            sets.push("xp = ?");
        }
        if patch.streak.is_some() {
            sets.push("streak = ?");
        }
        if patch.hearts.is_some() {
            sets.push("hearts = ?");
        }
        if patch.level.is_some() {
            sets.push("level = ?");
        }
        if patch.lessons_completed.is_some() {
            sets.push("lessons_completed = ?");
        }
        if patch.last_active.is_some() {
            sets.push("last_active = ?");
        }

        let sql = format!("UPDATE user_progress SET {} WHERE id = ?", sets.join(", "));
        let mut query = sqlx::query(&sql);
        if let Some(xp) = patch.xp {
            query = query.bind(i64::from(xp));
        }
        if let Some(streak) = patch.streak {
            query = query.bind(i64::from(streak));
        }
        if let Some(hearts) = patch.hearts {
            query = query.bind(i64::from(hearts));
        }
        if let Some(level) = patch.level {
            query = query.bind(i64::from(level));
        }
        if let Some(lessons_completed) = patch.lessons_completed {
            query = query.bind(i64::from(lessons_completed));
        }
        if let Some(last_active) = patch.last_active {
            query = query.bind(last_active);
        }

        let result = query
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(connection_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
