// ============================
// policy-lib/src/error.rs
// ============================
//! Error taxonomy for the policy engine.
//!
//! Rejections (`PolicyViolation`) are per-request, user-correctable input
//! errors. Store failures are a separate infrastructure category and are
//! never retried by the engine — the caller's transaction manager governs
//! retry and rollback.
use thiserror::Error;

/// A rejected credential-change attempt, tagged by reason.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("credential does not satisfy the strength policy")]
    WeakCredential,

    #[error("current credential does not match the stored credential")]
    CurrentMismatch,

    #[error("credential matches a recently used credential")]
    RecentlyUsed,
}

impl PolicyViolation {
    /// Uniform message suitable for end users.
    ///
    /// The variant tag tells the caller which check failed; how much of that
    /// to expose is the caller's decision. This message deliberately does
    /// not distinguish the checks.
    pub fn sanitized_message(&self) -> &'static str {
        "credential change rejected by policy"
    }
}

/// Failure in a persistence collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Top-level engine error: a policy rejection or an infrastructure failure.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("policy violation: {0}")]
    Violation(#[from] PolicyViolation),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl PolicyError {
    /// The violation tag, if this error is a policy rejection.
    pub fn violation(&self) -> Option<PolicyViolation> {
        match self {
            PolicyError::Violation(v) => Some(*v),
            PolicyError::Store(_) => None,
        }
    }
}
