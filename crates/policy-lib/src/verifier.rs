// ============================
// policy-lib/src/verifier.rs
// ============================
//! Credential hashing and verification.
use scrypt::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Scrypt,
};
use zeroize::Zeroize;

/// One-way hash comparison port.
///
/// Implementations must never fall back to plaintext comparison; `matches`
/// verifies the candidate against a salted, adaptively hashed digest in
/// constant time.
pub trait CredentialVerifier: Send + Sync {
    fn matches(&self, plain: &str, stored_hash: &str) -> bool;
}

/// Default verifier backed by scrypt PHC-string hashes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScryptVerifier;

impl CredentialVerifier for ScryptVerifier {
    fn matches(&self, plain: &str, stored_hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
    }
}

/// Hash a credential using scrypt with a fresh random salt.
pub fn hash_credential(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt.hash_password(plain.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

/// Hash a credential and zeroize the plaintext buffer.
pub fn hash_credential_secure(plain: &mut String) -> anyhow::Result<String> {
    let hash = hash_credential(plain)?;
    plain.zeroize();
    Ok(hash)
}
