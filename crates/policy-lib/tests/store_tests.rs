//! MemoryStore behavior: ordering, limits, and referential constraints.

use chrono::{Duration, Utc};
use policy_lib::{HistoryStore, MemoryStore, Principal, PrincipalStore, StoreError, UnitOfWork};
use uuid::Uuid;

async fn saved_principal(store: &MemoryStore) -> Principal {
    store.save(Principal::new()).await.unwrap()
}

#[tokio::test]
async fn save_assigns_an_identity_once() {
    let store = MemoryStore::new();
    let saved = saved_principal(&store).await;
    let id = saved.id.expect("save assigns an id");

    // Saving the managed form again keeps the same identity.
    let resaved = store.save(saved).await.unwrap();
    assert_eq!(resaved.id, Some(id));

    let found = store.find_by_id(id).await.unwrap();
    assert_eq!(found, Some(resaved));
}

#[tokio::test]
async fn find_by_id_misses_unknown_principals() {
    let store = MemoryStore::new();
    assert_eq!(store.find_by_id(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn recent_entries_are_most_recent_first_and_capped() {
    let store = MemoryStore::new();
    let id = saved_principal(&store).await.id.unwrap();

    let base = Utc::now() - Duration::hours(1);
    for i in 0..7i64 {
        store
            .append(id, &format!("hash-{i}"), base + Duration::minutes(i))
            .await
            .unwrap();
    }

    let entries = store.recent_entries(id, 3).await.unwrap();
    let hashes: Vec<_> = entries.iter().map(|e| e.credential_hash.as_str()).collect();
    assert_eq!(hashes, ["hash-6", "hash-5", "hash-4"]);

    // A limit larger than the trail returns everything.
    assert_eq!(store.recent_entries(id, 100).await.unwrap().len(), 7);
}

#[tokio::test]
async fn recent_entries_break_timestamp_ties_by_insertion_order() {
    let store = MemoryStore::new();
    let id = saved_principal(&store).await.id.unwrap();

    let now = Utc::now();
    store.append(id, "earlier-insert", now).await.unwrap();
    store.append(id, "later-insert", now).await.unwrap();

    let entries = store.recent_entries(id, 1).await.unwrap();
    assert_eq!(entries[0].credential_hash, "later-insert");
}

#[tokio::test]
async fn append_requires_a_persisted_principal() {
    let store = MemoryStore::new();
    let err = store
        .append(Uuid::new_v4(), "orphan-hash", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Constraint(_)));
}

#[tokio::test]
async fn delete_all_removes_the_trail_and_tolerates_absence() {
    let store = MemoryStore::new();
    let id = saved_principal(&store).await.id.unwrap();
    store.append(id, "h", Utc::now()).await.unwrap();

    store.delete_all(id).await.unwrap();
    assert!(store.recent_entries(id, 10).await.unwrap().is_empty());

    // Unknown principal: no-op, no error.
    store.delete_all(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn commit_creates_a_principal_when_it_has_no_identity() {
    let store = MemoryStore::new();
    let now = Utc::now();

    let managed = store
        .commit_credential_change(&Principal::new(), "first-hash", now, now + Duration::days(90))
        .await
        .unwrap();
    let id = managed.id.expect("commit creates the principal");

    // Both the principal record and the history entry landed together.
    let stored = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.credential_hash.as_deref(), Some("first-hash"));
    assert_eq!(store.recent_entries(id, 10).await.unwrap().len(), 1);
}

#[tokio::test]
async fn history_trails_are_isolated_per_principal() {
    let store = MemoryStore::new();
    let a = saved_principal(&store).await.id.unwrap();
    let b = saved_principal(&store).await.id.unwrap();

    store.append(a, "a-hash", Utc::now()).await.unwrap();
    store.append(b, "b-hash", Utc::now()).await.unwrap();

    store.delete_all(a).await.unwrap();
    assert!(store.recent_entries(a, 10).await.unwrap().is_empty());
    assert_eq!(store.recent_entries(b, 10).await.unwrap().len(), 1);
}
