use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{StorageError, SubscriptionRepository};
use study_core::model::SubscriptionTier;

use super::SqliteRepository;

/// Preference key holding the subscription tier.
pub(crate) const SUBSCRIPTION_TIER_KEY: &str = "subscription_tier";

#[async_trait]
impl SubscriptionRepository for SqliteRepository {
    async fn get_tier(&self) -> Result<Option<SubscriptionTier>, StorageError> {
        let row = sqlx::query("SELECT value FROM preferences WHERE key = ?1")
            .bind(SUBSCRIPTION_TIER_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        raw.parse::<SubscriptionTier>()
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_tier(&self, tier: SubscriptionTier) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(SUBSCRIPTION_TIER_KEY)
        .bind(tier.as_str())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        tracing::debug!(tier = tier.as_str(), "saved subscription tier");
        Ok(())
    }
}
