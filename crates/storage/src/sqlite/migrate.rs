use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs the versioned migrations for the preference store.
///
/// Version 1 creates the `preferences` key/value table.
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

    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS preferences (
                    key TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)")
            .bind(1_i64)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(version = 1, "applied preference store migration");
    }

    Ok(())
}
