/// AES-256-GCM sealing for secret payloads.
///
/// Each secret gets its own random key, and every encryption draws a fresh
/// random 12-byte nonce. Keys live for a single secret, so random nonces
/// carry no practical collision risk.
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;

use crate::codec::key::SecretKey;
use crate::error::{Result, VaultError};

pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// Generate a random 12-byte nonce.
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Encrypt plaintext with AES-256-GCM.
///
/// Returns (nonce, ciphertext_with_tag).
pub fn encrypt(key: &SecretKey, plaintext: &[u8]) -> Result<([u8; NONCE_LEN], Vec<u8>)> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| VaultError::Encryption(e.to_string()))?;

    let nonce_bytes = generate_nonce();
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::Encryption(e.to_string()))?;

    Ok((nonce_bytes, ciphertext))
}

/// Decrypt ciphertext with AES-256-GCM.
///
/// Any failure collapses into `Decryption` so callers cannot tell a wrong
/// key from corrupted data or a forged tag.
pub fn decrypt(key: &SecretKey, nonce: &[u8; NONCE_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| VaultError::Decryption)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| VaultError::Decryption)
}
