use std::sync::Arc;
use std::time::Duration;

use storage::repository::Storage;

use crate::checkout::CheckoutService;
use crate::error::AppServicesError;
use crate::subscription_service::SubscriptionService;

/// Storage-backed services shared by every front end.
#[derive(Clone, Debug)]
pub struct AppServices {
    subscription: SubscriptionService,
    checkout: Arc<CheckoutService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// persisted tier cannot be read.
    pub async fn new_sqlite(db_url: &str, checkout_delay: Duration) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, checkout_delay).await
    }

    /// Build services over in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the tier cannot be read.
    pub async fn in_memory(checkout_delay: Duration) -> Result<Self, AppServicesError> {
        Self::from_storage(&Storage::in_memory(), checkout_delay).await
    }

    async fn from_storage(
        storage: &Storage,
        checkout_delay: Duration,
    ) -> Result<Self, AppServicesError> {
        let subscription = SubscriptionService::load(Arc::clone(&storage.subscription)).await?;
        let checkout = Arc::new(CheckoutService::new(subscription.clone(), checkout_delay));
        Ok(Self {
            subscription,
            checkout,
        })
    }

    #[must_use]
    pub fn subscription(&self) -> &SubscriptionService {
        &self.subscription
    }

    #[must_use]
    pub fn checkout(&self) -> Arc<CheckoutService> {
        Arc::clone(&self.checkout)
    }
}
