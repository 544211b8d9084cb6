//! # Base64 Encoding/Decoding
//!
//! Utilities for base64 encoding and decoding.

use base64::{engine::general_purpose, Engine as _};

/// Encode bytes to base64 URL-safe string (no padding).
pub fn b64u_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(content)
}

/// Decode base64 URL-safe string to bytes.
pub fn b64u_decode(b64u: &str) -> Result<Vec<u8>, Error> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(b64u)
        .map_err(|_| Error::FailToB64uDecode)
}

// region:    --- Error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("value is not valid base64url")]
    FailToB64uDecode,
}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_b64u_is_url_safe_and_unpadded() {
        let encoded = b64u_encode([0xfb, 0xff, 0xfe]);
        assert_eq!(encoded, "-__-");
        assert_eq!(b64u_decode(&encoded).unwrap(), vec![0xfb, 0xff, 0xfe]);
    }

    #[test]
    fn test_b64u_decode_rejects_standard_alphabet() {
        assert!(b64u_decode("+//+").is_err());
    }
}
