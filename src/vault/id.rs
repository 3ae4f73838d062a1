/// Vault identifier generation.
///
/// 12 random bytes rendered as 16 base64url characters give 96 bits of
/// entropy, making collisions negligible at any realistic scale.
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

pub const ID_LEN: usize = 16;
const ID_BYTES: usize = 12;

/// Generate a fresh identifier.
pub fn generate() -> String {
    let mut bytes = [0u8; ID_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Cheap shape check used before hitting the backing store. Anything that
/// fails it cannot have been issued by `generate`.
pub fn is_valid(id: &str) -> bool {
    id.len() == ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid() {
        for _ in 0..32 {
            let id = generate();
            assert_eq!(id.len(), ID_LEN);
            assert!(is_valid(&id));
        }
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn test_is_valid_rejects_bad_shapes() {
        assert!(!is_valid(""));
        assert!(!is_valid("short"));
        assert!(!is_valid("way-too-long-to-be-an-identifier"));
        assert!(!is_valid("has spaces here!"));
        assert!(!is_valid("semi;colon0000ab"));
    }
}
