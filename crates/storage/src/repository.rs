use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use study_core::model::SubscriptionTier;
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

/// Repository contract for the persisted subscription tier.
///
/// This is the only durable state the app keeps; everything else lives in
/// memory for the lifetime of the process.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Fetch the saved tier, if one was ever written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is not a
    /// known tier, or other storage errors.
    async fn get_tier(&self) -> Result<Option<SubscriptionTier>, StorageError>;

    /// Persist the tier, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the tier cannot be stored.
    async fn save_tier(&self, tier: SubscriptionTier) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    tier: Arc<Mutex<Option<SubscriptionTier>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tier: Arc::new(Mutex::new(None)),
        }
    }

    /// Repository pre-seeded with a saved tier.
    #[must_use]
    pub fn with_tier(tier: SubscriptionTier) -> Self {
        Self {
            tier: Arc::new(Mutex::new(Some(tier))),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryRepository {
    async fn get_tier(&self) -> Result<Option<SubscriptionTier>, StorageError> {
        let guard = self
            .tier
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(*guard)
    }

    async fn save_tier(&self, tier: SubscriptionTier) -> Result<(), StorageError> {
        let mut guard = self
            .tier
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(tier);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub subscription: Arc<dyn SubscriptionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let subscription: Arc<dyn SubscriptionRepository> = Arc::new(InMemoryRepository::new());
        Self { subscription }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_repository_has_no_tier() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.get_tier().await.unwrap(), None);
    }

    #[tokio::test]
    async fn round_trips_tier() {
        let repo = InMemoryRepository::new();
        repo.save_tier(SubscriptionTier::Premium).await.unwrap();
        assert_eq!(
            repo.get_tier().await.unwrap(),
            Some(SubscriptionTier::Premium)
        );

        repo.save_tier(SubscriptionTier::Free).await.unwrap();
        assert_eq!(repo.get_tier().await.unwrap(), Some(SubscriptionTier::Free));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let repo = InMemoryRepository::new();
        let storage = Storage {
            subscription: Arc::new(repo.clone()),
        };
        storage
            .subscription
            .save_tier(SubscriptionTier::Premium)
            .await
            .unwrap();
        assert_eq!(
            repo.get_tier().await.unwrap(),
            Some(SubscriptionTier::Premium)
        );
    }
}
