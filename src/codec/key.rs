/// Symmetric key handling for the envelope codec.
///
/// Keys are generated on the sender's device and travel only inside the
/// share link's URL fragment; the server never holds one at any point.
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, VaultError};

pub const KEY_LEN: usize = 32;

/// A 256-bit symmetric key, zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_LEN]);

impl SecretKey {
    /// Generate a fresh key from the operating system RNG.
    ///
    /// `OsRng` failure aborts the process; there is no weaker fallback.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut key);
        Self(key)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// URL-safe textual form, as embedded in the share-link fragment.
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.0)
    }

    /// Parse the textual form. Anything that does not decode to exactly
    /// 32 bytes is reported as a decryption failure, without hinting at
    /// what was wrong with the input.
    pub fn decode(s: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(s)
            .map_err(|_| VaultError::Decryption)?;
        if bytes.len() != KEY_LEN {
            return Err(VaultError::Decryption);
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&bytes);
        Ok(Self(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let key = SecretKey::generate();
        let decoded = SecretKey::decode(&key.encode()).unwrap();
        assert_eq!(key.as_bytes(), decoded.as_bytes());
    }

    #[test]
    fn test_encoding_is_url_safe() {
        let key = SecretKey::generate();
        let encoded = key.encode();
        // 32 bytes -> 43 unpadded base64url characters.
        assert_eq!(encoded.len(), 43);
        assert!(encoded
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let short = URL_SAFE_NO_PAD.encode([0u8; 16]);
        assert!(matches!(
            SecretKey::decode(&short),
            Err(VaultError::Decryption)
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_characters() {
        assert!(matches!(
            SecretKey::decode("!!!invalid!!!"),
            Err(VaultError::Decryption)
        ));
    }

    #[test]
    fn test_generate_produces_distinct_keys() {
        let k1 = SecretKey::generate();
        let k2 = SecretKey::generate();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
    }
}
