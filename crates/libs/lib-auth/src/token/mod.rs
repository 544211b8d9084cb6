//! # Session Tokens
//!
//! Opaque session identifiers: 32 bytes from the OS RNG, base64url encoded
//! without padding (43 characters). The token carries no data; the session
//! store maps it to an identity.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use lib_utils::{b64u_decode, b64u_encode};

const TOKEN_BYTES: usize = 32;
const TOKEN_LEN: usize = 43;

/// Mint a new random session token.
pub fn new_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    b64u_encode(bytes)
}

/// Cheap shape check before a store lookup.
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == TOKEN_LEN
        && b64u_decode(token)
            .map(|bytes| bytes.len() == TOKEN_BYTES)
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_shape() {
        let token = new_session_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(is_well_formed_token(&token));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(new_session_token(), new_session_token());
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(!is_well_formed_token(""));
        assert!(!is_well_formed_token("short"));
        assert!(!is_well_formed_token(&"a".repeat(42)));
        assert!(!is_well_formed_token(&format!("{}=", "a".repeat(42))));
        assert!(!is_well_formed_token(&format!("{}.", "a".repeat(42))));
    }
}
