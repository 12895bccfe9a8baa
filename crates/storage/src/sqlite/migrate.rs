use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs a single, consolidated migration for the current schema.
///
/// Creates the progress table and its indexes. The hearts and completion
/// checks mirror the domain invariants so a foreign writer cannot corrupt
/// the store.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS user_progress (
                    id TEXT PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    course_id TEXT NOT NULL,
                    xp INTEGER NOT NULL CHECK (xp >= 0),
                    streak INTEGER NOT NULL CHECK (streak >= 0),
                    hearts INTEGER NOT NULL CHECK (hearts BETWEEN 0 AND 5),
                    level INTEGER NOT NULL CHECK (level >= 1),
                    lessons_completed INTEGER NOT NULL CHECK (lessons_completed >= 0),
                    total_lessons INTEGER NOT NULL
                        CHECK (total_lessons >= 1 AND lessons_completed <= total_lessons),
                    last_active TEXT NOT NULL,
                    UNIQUE (user_id, course_id)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_user_progress_user_last_active
                    ON user_progress (user_id, last_active DESC);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
