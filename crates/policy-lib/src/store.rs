// ============================
// policy-lib/src/store.rs
// ============================
//! Persistence ports and the in-memory reference implementation.
//!
//! The engine talks to storage through three narrow traits. `UnitOfWork` is
//! the transaction boundary for a credential change: resolve the managed
//! principal, append the history entry, and persist the new hash plus both
//! timestamps as one atomic step, serialized per principal. A SQL-backed
//! implementation would map this to a transaction with a row lock on the
//! principal; [`MemoryStore`] uses a single write lock.
use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use credpolicy_common::{CredentialHistoryEntry, Principal, PrincipalId};

use crate::error::StoreError;

/// Port to the credential history trail. No business rules live here.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Up to `limit` entries for the principal, most recent first.
    async fn recent_entries(
        &self,
        principal_id: PrincipalId,
        limit: usize,
    ) -> Result<Vec<CredentialHistoryEntry>, StoreError>;

    /// Record a newly accepted credential hash.
    async fn append(
        &self,
        principal_id: PrincipalId,
        credential_hash: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Remove every entry for the principal. No-op if there are none.
    async fn delete_all(&self, principal_id: PrincipalId) -> Result<(), StoreError>;
}

/// Port to principal lookup and persistence.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<Principal>, StoreError>;

    /// Persist the principal, assigning an identity if it has none. Returns
    /// the managed (persisted) form.
    async fn save(&self, principal: Principal) -> Result<Principal, StoreError>;
}

/// Transactional boundary for committing a credential change.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Atomically: resolve the supplied principal to its managed instance
    /// (re-fetch by identity, or create it if it has none), append a history
    /// entry for `new_hash` at `changed_at`, and persist the new hash and
    /// both timestamps. All steps take effect or none do.
    async fn commit_credential_change(
        &self,
        principal: &Principal,
        new_hash: &str,
        changed_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Principal, StoreError>;
}

/// Everything the policy engine needs from storage.
pub trait CredentialStore: PrincipalStore + HistoryStore + UnitOfWork {}

impl<T: PrincipalStore + HistoryStore + UnitOfWork> CredentialStore for T {}

#[derive(Default)]
struct MemoryInner {
    principals: HashMap<PrincipalId, Principal>,
    history: HashMap<PrincipalId, Vec<CredentialHistoryEntry>>,
}

/// In-memory store for tests and embedders without a database.
///
/// A single `RwLock` over both tables makes the write lock the unit-of-work
/// boundary, which also serializes concurrent commits for the same
/// principal.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn recent_entries(
        &self,
        principal_id: PrincipalId,
        limit: usize,
    ) -> Result<Vec<CredentialHistoryEntry>, StoreError> {
        let inner = self.inner.read().await;
        let mut entries = inner
            .history
            .get(&principal_id)
            .cloned()
            .unwrap_or_default();
        // Insertion order breaks created_at ties.
        entries.reverse();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);
        Ok(entries)
    }

    async fn append(
        &self,
        principal_id: PrincipalId,
        credential_hash: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.principals.contains_key(&principal_id) {
            return Err(StoreError::Constraint(format!(
                "no principal {principal_id} for history entry"
            )));
        }
        inner
            .history
            .entry(principal_id)
            .or_default()
            .push(CredentialHistoryEntry {
                id: Uuid::new_v4(),
                principal_id,
                credential_hash: credential_hash.to_string(),
                created_at,
            });
        Ok(())
    }

    async fn delete_all(&self, principal_id: PrincipalId) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.history.remove(&principal_id);
        Ok(())
    }
}

#[async_trait]
impl PrincipalStore for MemoryStore {
    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<Principal>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.principals.get(&id).cloned())
    }

    async fn save(&self, mut principal: Principal) -> Result<Principal, StoreError> {
        let mut inner = self.inner.write().await;
        let id = *principal.id.get_or_insert_with(Uuid::new_v4);
        inner.principals.insert(id, principal.clone());
        Ok(principal)
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn commit_credential_change(
        &self,
        principal: &Principal,
        new_hash: &str,
        changed_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<Principal, StoreError> {
        // Write lock held for the whole commit: this is the transaction.
        let mut inner = self.inner.write().await;

        // Resolve the managed instance; a detached copy must not clobber
        // newer state, so re-fetch by identity when one exists.
        let id = principal.id.unwrap_or_else(Uuid::new_v4);
        let mut managed = inner.principals.get(&id).cloned().unwrap_or_else(|| {
            let mut created = principal.clone();
            created.id = Some(id);
            created
        });

        inner
            .history
            .entry(id)
            .or_default()
            .push(CredentialHistoryEntry {
                id: Uuid::new_v4(),
                principal_id: id,
                credential_hash: new_hash.to_string(),
                created_at: changed_at,
            });

        managed.credential_hash = Some(new_hash.to_string());
        managed.credential_changed_at = Some(changed_at);
        managed.credential_expires_at = Some(expires_at);
        inner.principals.insert(id, managed.clone());

        Ok(managed)
    }
}
