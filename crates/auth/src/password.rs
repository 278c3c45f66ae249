//! Password hashing for the credential verifier.
//!
//! Argon2id in PHC string format with a fresh per-record salt. Verification
//! recomputes the hash and compares in constant time (handled by the
//! `password_hash` machinery), so neither branch timing nor hash content
//! leaks to the caller.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;

use gatehouse_core::{DomainError, DomainResult};

/// Hash a plaintext password into a PHC string suitable for storage.
pub fn hash_password(plain: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| DomainError::storage(format!("password hash: {e}")))
}

/// Verify a candidate password against a stored PHC string.
///
/// A malformed stored hash verifies as false rather than erroring; the
/// caller cannot distinguish it from a wrong password.
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_original_password_only() {
        let phc = hash_password("correct horse battery").unwrap();

        assert!(verify_password(&phc, "correct horse battery"));
        assert!(!verify_password(&phc, "correct horse battery "));
        assert!(!verify_password(&phc, ""));
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();

        assert_ne!(a, b);
        assert!(verify_password(&a, "same-input"));
        assert!(verify_password(&b, "same-input"));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "anything"));
        assert!(!verify_password("", "anything"));
    }
}
