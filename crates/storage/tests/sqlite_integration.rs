use storage::Storage;
use storage::StorageError;
use storage::repository::SubscriptionRepository;
use storage::sqlite::SqliteRepository;
use study_core::model::SubscriptionTier;

#[tokio::test]
async fn sqlite_roundtrip_persists_tier() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_tier_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get_tier().await.unwrap(), None);

    repo.save_tier(SubscriptionTier::Premium).await.unwrap();
    assert_eq!(
        repo.get_tier().await.unwrap(),
        Some(SubscriptionTier::Premium)
    );

    repo.save_tier(SubscriptionTier::Free).await.unwrap();
    assert_eq!(repo.get_tier().await.unwrap(), Some(SubscriptionTier::Free));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_tier_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.save_tier(SubscriptionTier::Premium).await.unwrap();
    repo.migrate().await.expect("second migrate");

    assert_eq!(
        repo.get_tier().await.unwrap(),
        Some(SubscriptionTier::Premium)
    );
}

#[tokio::test]
async fn sqlite_rejects_unknown_persisted_tier() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_tier_garbage?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    sqlx::query(
        "INSERT INTO preferences (key, value, updated_at) VALUES ('subscription_tier', 'gold', '2024-01-15T00:00:00Z')",
    )
    .execute(repo.pool())
    .await
    .unwrap();

    let err = repo.get_tier().await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn storage_sqlite_constructor_migrates() {
    let storage = Storage::sqlite("sqlite:file:memdb_tier_storage?mode=memory&cache=shared")
        .await
        .expect("storage");

    storage
        .subscription
        .save_tier(SubscriptionTier::Premium)
        .await
        .unwrap();
    assert_eq!(
        storage.subscription.get_tier().await.unwrap(),
        Some(SubscriptionTier::Premium)
    );
}
