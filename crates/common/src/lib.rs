// ================
// common/src/lib.rs
// ================
//! Common domain types shared between the policy engine and its embedders.
//!
//! The engine governs credentials for a `Principal` (an account record owned
//! by the surrounding application) and keeps an append-only trail of
//! `CredentialHistoryEntry` records per principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a principal (account/user) record.
pub type PrincipalId = Uuid;

/// The account whose credential is governed by the policy engine.
///
/// Only the credential-related fields live here; identity and authorization
/// data belong to the embedding application. `id == None` marks a record
/// that has not been persisted yet — the store assigns an identifier on
/// first save.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Principal {
    pub id: Option<PrincipalId>,
    /// Current credential, stored only as a one-way hash (PHC string).
    pub credential_hash: Option<String>,
    /// When the credential was last changed. Unset for principals that have
    /// never committed a credential.
    pub credential_changed_at: Option<DateTime<Utc>>,
    /// When the credential expires. Unset means "never expires".
    pub credential_expires_at: Option<DateTime<Utc>>,
}

impl Principal {
    /// A fresh, unpersisted principal with no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this principal has a persisted identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// One previously accepted credential hash for a principal.
///
/// Entries are immutable once created: they are inserted when a credential
/// change is committed and removed only by a bulk purge (account deletion).
/// Never updated in place.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CredentialHistoryEntry {
    pub id: Uuid,
    pub principal_id: PrincipalId,
    pub credential_hash: String,
    pub created_at: DateTime<Utc>,
}
