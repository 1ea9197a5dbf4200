// ============================
// policy-lib/src/expiration.rs
// ============================
//! Credential age tracking.
use chrono::{DateTime, Duration, Utc};
use credpolicy_common::Principal;

/// Whether the principal's credential has expired at `now`.
///
/// A principal with no expiration date set never expires. Expiry is strict:
/// a credential is still valid at exactly `credential_expires_at`.
pub fn is_expired(principal: &Principal, now: DateTime<Utc>) -> bool {
    match principal.credential_expires_at {
        None => false,
        Some(expires_at) => now > expires_at,
    }
}

/// Compute fresh change/expiration timestamps for a credential committed at
/// `now`. Pure computation; the caller persists the pair.
pub fn refresh_dates(now: DateTime<Utc>, window: Duration) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + window)
}
