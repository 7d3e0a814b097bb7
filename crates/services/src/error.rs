//! Shared error types for the services crate.

use thiserror::Error;

use study_core::model::{FolderError, QuestionError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `FolderList`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FolderListError {
    #[error("folder not found")]
    NotFound,
    #[error("the last remaining folder cannot be deleted")]
    LastFolder,
    #[error(transparent)]
    Folder(#[from] FolderError),
}

/// Errors emitted by `QuestionAuthoring`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthoringError {
    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Errors emitted by question generators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("{0}")]
    Unavailable(&'static str),
}

/// Errors emitted by `SubscriptionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubscriptionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CheckoutService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckoutError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("subscription is already premium")]
    AlreadyPremium,
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}
