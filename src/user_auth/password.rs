//! One-way salted credential hashing.
//!
//! argon2id with a per-credential random salt, PHC-encoded so the salt and
//! parameters travel with the hash. Deliberately slow; callers run these
//! functions on a blocking pool so request-serving threads stay responsive.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use thiserror::Error;

/// Hashing failures. A wrong password is NOT an error; `verify_password`
/// reports it as `Ok(false)`.
#[derive(Debug, Error)]
pub enum HashError {
    /// Stored hash does not parse as a PHC string. Fatal input error.
    #[error("malformed stored password hash: {0}")]
    Malformed(password_hash::Error),
    /// Hash computation itself failed
    #[error("password hashing failed: {0}")]
    Hashing(password_hash::Error),
}

/// Hash a plaintext password with a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(HashError::Hashing)?
        .to_string();
    Ok(hash)
}

/// Verify a plaintext password against a stored PHC hash.
///
/// The salt is recovered from the stored encoding. Mismatch returns
/// `Ok(false)`; only an unreadable stored hash is an `Err`.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(stored_hash).map_err(HashError::Malformed)?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashError::Hashing(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_correct_password() {
        let hash = hash_password("p1-secret").unwrap();
        assert!(verify_password("p1-secret", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("p1-secret").unwrap();
        assert!(!verify_password("p2-other", &hash).unwrap());
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        // Same password, two hashes: salts differ, so encodings differ,
        // and both still verify.
        let h1 = hash_password("same-password").unwrap();
        let h2 = hash_password("same-password").unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password("same-password", &h1).unwrap());
        assert!(verify_password("same-password", &h2).unwrap());
    }

    #[test]
    fn test_malformed_stored_hash_is_error_not_mismatch() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(HashError::Malformed(_))));
    }

    #[test]
    fn test_hash_embeds_argon2id_params() {
        let hash = hash_password("p").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }
}
