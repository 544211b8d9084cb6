//! # Password Hashing
//!
//! Password hashing and verification using Argon2 (argon2id, default cost
//! parameters, random 16-byte salt per hash). Hashes are stored in PHC string
//! format, so the parameters travel with each hash.
//!
//! Both operations are CPU bound; async callers should run them on a
//! blocking thread.

use crate::error::{Error, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Well-formed hash of a random throwaway password. Verifying against it
/// costs the same as a real verification and never succeeds for user input.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$XdYvHRzfyxYbYZdw2Phcsr4VuDYpYm39nhBGNumzVNg";

/// Hash a password using the Argon2 algorithm.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Hash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against an Argon2 hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is not
/// a parseable PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::HashParse(e.to_string()))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Spend one verification's worth of work without a stored hash.
///
/// Used when no account matches, so an unknown email takes as long to
/// reject as a wrong password.
pub fn verify_password_against_decoy(password: &str) {
    let _ = verify_password(password, DECOY_HASH);
}
