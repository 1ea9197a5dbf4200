// ============================
// policy-lib/src/reuse.rs
// ============================
//! Reuse check against the credential history trail.
use credpolicy_common::PrincipalId;

use crate::error::StoreError;
use crate::store::HistoryStore;
use crate::verifier::CredentialVerifier;

/// Whether `candidate` verifies against any of the `limit` most recent
/// history hashes for the principal.
///
/// Comparison always goes through the verifier; stored hashes are salted
/// digests, so there is no plaintext to compare against. Short-circuits on
/// the first match and returns `false` for a principal with no history.
pub async fn was_used_recently(
    history: &dyn HistoryStore,
    verifier: &dyn CredentialVerifier,
    principal_id: PrincipalId,
    candidate: &str,
    limit: usize,
) -> Result<bool, StoreError> {
    let recent = history.recent_entries(principal_id, limit).await?;
    for entry in recent {
        if verifier.matches(candidate, &entry.credential_hash) {
            return Ok(true);
        }
    }
    Ok(false)
}
