use std::sync::{Arc, Mutex, PoisonError};

use storage::repository::{StorageError, SubscriptionRepository};
use study_core::model::SubscriptionTier;
use tracing::{info, warn};

use crate::error::SubscriptionError;

/// Holds the current subscription tier and writes changes through to storage.
#[derive(Clone)]
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
    tier: Arc<Mutex<SubscriptionTier>>,
}

impl SubscriptionService {
    /// Read the persisted tier once.
    ///
    /// A missing value means `Free`. A stored value that no longer parses is
    /// logged and treated as `Free`.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::Storage` when the repository cannot be read.
    pub async fn load(repo: Arc<dyn SubscriptionRepository>) -> Result<Self, SubscriptionError> {
        let tier = match repo.get_tier().await {
            Ok(tier) => tier.unwrap_or_default(),
            Err(StorageError::Serialization(reason)) => {
                warn!(%reason, "ignoring unreadable subscription tier");
                SubscriptionTier::Free
            }
            Err(err) => return Err(err.into()),
        };
        info!(%tier, "subscription loaded");
        Ok(Self {
            repo,
            tier: Arc::new(Mutex::new(tier)),
        })
    }

    #[must_use]
    pub fn get(&self) -> SubscriptionTier {
        *self.tier.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.get().is_premium()
    }

    /// Change the tier, persisting only when it differs from the current one.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionError::Storage` if the write fails; the in-memory
    /// tier is left unchanged in that case.
    pub async fn set(&self, tier: SubscriptionTier) -> Result<(), SubscriptionError> {
        if self.get() == tier {
            return Ok(());
        }
        self.repo.save_tier(tier).await?;
        *self.tier.lock().unwrap_or_else(PoisonError::into_inner) = tier;
        info!(%tier, "subscription changed");
        Ok(())
    }

    /// # Errors
    ///
    /// See [`SubscriptionService::set`].
    pub async fn upgrade_to_premium(&self) -> Result<(), SubscriptionError> {
        self.set(SubscriptionTier::Premium).await
    }

    /// # Errors
    ///
    /// See [`SubscriptionService::set`].
    pub async fn cancel(&self) -> Result<(), SubscriptionError> {
        self.set(SubscriptionTier::Free).await
    }
}

impl std::fmt::Debug for SubscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionService")
            .field("tier", &self.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::InMemoryRepository;

    #[derive(Default)]
    struct CountingRepo {
        inner: InMemoryRepository,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl SubscriptionRepository for CountingRepo {
        async fn get_tier(&self) -> Result<Option<SubscriptionTier>, StorageError> {
            self.inner.get_tier().await
        }

        async fn save_tier(&self, tier: SubscriptionTier) -> Result<(), StorageError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.save_tier(tier).await
        }
    }

    /// Fails every read with either an unreadable value or a lost connection.
    struct BrokenRepo {
        unreadable: bool,
    }

    #[async_trait]
    impl SubscriptionRepository for BrokenRepo {
        async fn get_tier(&self) -> Result<Option<SubscriptionTier>, StorageError> {
            if self.unreadable {
                Err(StorageError::Serialization("unknown subscription tier: gold".into()))
            } else {
                Err(StorageError::Connection("database is locked".into()))
            }
        }

        async fn save_tier(&self, _tier: SubscriptionTier) -> Result<(), StorageError> {
            Err(StorageError::Connection("read only".into()))
        }
    }

    #[tokio::test]
    async fn missing_tier_loads_as_free() {
        let service = SubscriptionService::load(Arc::new(InMemoryRepository::new()))
            .await
            .unwrap();
        assert_eq!(service.get(), SubscriptionTier::Free);
        assert!(!service.is_premium());
    }

    #[tokio::test]
    async fn persisted_tier_is_restored() {
        let repo = Arc::new(InMemoryRepository::with_tier(SubscriptionTier::Premium));
        let service = SubscriptionService::load(repo).await.unwrap();
        assert!(service.is_premium());
    }

    #[tokio::test]
    async fn writes_only_when_tier_changes() {
        let repo = Arc::new(CountingRepo::default());
        let service = SubscriptionService::load(repo.clone()).await.unwrap();

        service.cancel().await.unwrap();
        assert_eq!(repo.writes.load(Ordering::SeqCst), 0);

        service.upgrade_to_premium().await.unwrap();
        service.upgrade_to_premium().await.unwrap();
        assert_eq!(repo.writes.load(Ordering::SeqCst), 1);
        assert_eq!(
            repo.inner.get_tier().await.unwrap(),
            Some(SubscriptionTier::Premium)
        );
    }

    #[tokio::test]
    async fn unreadable_tier_falls_back_to_free() {
        let repo = Arc::new(BrokenRepo { unreadable: true });
        let service = SubscriptionService::load(repo).await.unwrap();
        assert_eq!(service.get(), SubscriptionTier::Free);

        let err = service.upgrade_to_premium().await.unwrap_err();
        assert!(matches!(err, SubscriptionError::Storage(_)));
        assert_eq!(service.get(), SubscriptionTier::Free);
    }

    #[tokio::test]
    async fn connection_failure_propagates() {
        let repo = Arc::new(BrokenRepo { unreadable: false });
        let err = SubscriptionService::load(repo).await.unwrap_err();
        assert!(matches!(
            err,
            SubscriptionError::Storage(StorageError::Connection(_))
        ));
    }
}
