// ============================
// policy-lib/src/lib.rs
// ============================
//! Credential policy engine.
//!
//! Pure policy decisions for credential changes — strength classification,
//! reuse-history checking, and expiration tracking — behind narrow
//! persistence and verifier ports. No HTTP, no ORM: the surrounding
//! application layer owns routing, session handling, and user CRUD, and
//! translates [`PolicyViolation`] into its own error responses.

pub mod config;
pub mod engine;
pub mod error;
pub mod expiration;
pub mod reuse;
pub mod store;
pub mod strength;
pub mod verifier;

pub use config::{load_settings, PolicySettings};
pub use engine::PolicyEngine;
pub use error::{PolicyError, PolicyViolation, StoreError};
pub use store::{CredentialStore, HistoryStore, MemoryStore, PrincipalStore, UnitOfWork};
pub use strength::{is_acceptable, StrengthRules, SPECIAL_CHARS};
pub use verifier::{hash_credential, hash_credential_secure, CredentialVerifier, ScryptVerifier};

pub use credpolicy_common::{CredentialHistoryEntry, Principal, PrincipalId};
