/// Client-side envelope codec.
///
/// Everything in this module runs on the sender's or reader's device.
/// The server only ever handles the resulting envelope; the key travels
/// in the share link's URL fragment and never reaches it.
pub mod aead;
pub mod envelope;
pub mod key;
pub mod link;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::{Result, VaultError};
use self::envelope::{Envelope, SecretKind};
use self::key::SecretKey;

/// Encrypt a payload into a transport envelope.
///
/// A fresh random nonce is drawn for every call; the pair (key, nonce)
/// is never reused.
pub fn seal(plaintext: &[u8], kind: SecretKind, key: &SecretKey) -> Result<Envelope> {
    let (nonce, ciphertext) = aead::encrypt(key, plaintext)?;
    Ok(Envelope {
        iv: URL_SAFE_NO_PAD.encode(nonce),
        kind,
        ciphertext: URL_SAFE_NO_PAD.encode(&ciphertext),
    })
}

/// Decrypt a transport envelope.
///
/// Wrong key, corrupted fields and failed tag verification all surface as
/// the same `Decryption` error.
pub fn open(envelope: &Envelope, key: &SecretKey) -> Result<Vec<u8>> {
    let iv = URL_SAFE_NO_PAD
        .decode(&envelope.iv)
        .map_err(|_| VaultError::Decryption)?;
    let nonce: [u8; aead::NONCE_LEN] = iv.try_into().map_err(|_| VaultError::Decryption)?;
    let ciphertext = URL_SAFE_NO_PAD
        .decode(&envelope.ciphertext)
        .map_err(|_| VaultError::Decryption)?;
    aead::decrypt(key, &nonce, &ciphertext)
}
