// ============================
// policy-lib/src/engine.rs
// ============================
//! Policy engine: composes strength, reuse, and expiration checks into the
//! decision surface consumed by the surrounding application layer.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use credpolicy_common::{Principal, PrincipalId};

use crate::config::PolicySettings;
use crate::error::{PolicyError, PolicyViolation};
use crate::expiration;
use crate::reuse;
use crate::store::{CredentialStore, MemoryStore};
use crate::strength::{self, StrengthRules};
use crate::verifier::{CredentialVerifier, ScryptVerifier};

/// Stateless policy decision engine.
///
/// Safe for concurrent use across principals; per-principal serialization of
/// commits is the store's unit-of-work responsibility.
pub struct PolicyEngine<S> {
    store: Arc<S>,
    verifier: Arc<dyn CredentialVerifier>,
    settings: PolicySettings,
}

impl<S> Clone for PolicyEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            verifier: Arc::clone(&self.verifier),
            settings: self.settings.clone(),
        }
    }
}

impl PolicyEngine<MemoryStore> {
    /// Engine wired to an in-memory store and the scrypt verifier.
    pub fn in_memory(settings: PolicySettings) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ScryptVerifier),
            settings,
        )
    }
}

impl<S: CredentialStore> PolicyEngine<S> {
    pub fn new(
        store: Arc<S>,
        verifier: Arc<dyn CredentialVerifier>,
        settings: PolicySettings,
    ) -> Self {
        Self {
            store,
            verifier,
            settings,
        }
    }

    pub fn settings(&self) -> &PolicySettings {
        &self.settings
    }

    /// Decide whether a credential change may proceed. Read-only: callers
    /// hash the accepted candidate and then invoke [`commit_change`].
    ///
    /// Checks, in order:
    /// 1. Strength classification of `new_plain`.
    /// 2. For a persisted principal: the supplied current credential (if
    ///    any) must verify against the stored hash.
    /// 3. For a persisted principal: the candidate must not match a
    ///    recently used credential.
    ///
    /// [`commit_change`]: PolicyEngine::commit_change
    pub async fn validate_change(
        &self,
        principal: Option<&Principal>,
        current_plain: Option<&str>,
        new_plain: &str,
    ) -> Result<(), PolicyError> {
        let rules = StrengthRules {
            min_length: self.settings.min_length,
        };
        if !strength::is_acceptable(Some(new_plain), &rules) {
            warn!("credential change rejected: strength policy");
            return Err(PolicyViolation::WeakCredential.into());
        }

        if let Some(principal) = principal {
            if let Some(id) = principal.id {
                if let Some(current) = current_plain {
                    let verified = principal
                        .credential_hash
                        .as_deref()
                        .map(|stored| self.verifier.matches(current, stored))
                        .unwrap_or(false);
                    if !verified {
                        warn!(principal_id = %id, "credential change rejected: current mismatch");
                        return Err(PolicyViolation::CurrentMismatch.into());
                    }
                }

                if self.was_used_recently(id, new_plain).await? {
                    warn!(principal_id = %id, "credential change rejected: recently used");
                    return Err(PolicyViolation::RecentlyUsed.into());
                }
            }
        }

        Ok(())
    }

    /// Commit an accepted credential change as one unit of work: resolve the
    /// managed principal (creating it if it has no identity yet), append the
    /// history entry, and persist the refreshed change/expiration dates.
    /// Returns the managed principal.
    ///
    /// Retry hazard: retrying after a transient store failure may append a
    /// duplicate history entry; callers that retry should deduplicate by
    /// `(created_at, hash)`.
    pub async fn commit_change(
        &self,
        principal: &Principal,
        new_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Principal, PolicyError> {
        let (changed_at, expires_at) =
            expiration::refresh_dates(now, self.settings.expiration_window());
        let managed = self
            .store
            .commit_credential_change(principal, new_hash, changed_at, expires_at)
            .await?;
        debug!(principal_id = ?managed.id, %expires_at, "credential change committed");
        Ok(managed)
    }

    /// Whether `candidate` matches one of the most recent credentials for
    /// the principal, per the configured history limit.
    pub async fn was_used_recently(
        &self,
        principal_id: PrincipalId,
        candidate: &str,
    ) -> Result<bool, PolicyError> {
        let used = reuse::was_used_recently(
            self.store.as_ref(),
            self.verifier.as_ref(),
            principal_id,
            candidate,
            self.settings.history_limit,
        )
        .await?;
        Ok(used)
    }

    /// Whether the principal's credential has expired. Expiration is
    /// detected lazily at evaluation time; nothing schedules a transition.
    pub fn is_expired(&self, principal: &Principal) -> bool {
        expiration::is_expired(principal, Utc::now())
    }

    /// Delete the principal's entire history trail. Idempotent; used by
    /// account-deletion collaborators.
    pub async fn purge_history(&self, principal_id: PrincipalId) -> Result<(), PolicyError> {
        self.store.delete_all(principal_id).await?;
        debug!(principal_id = %principal_id, "credential history purged");
        Ok(())
    }
}
