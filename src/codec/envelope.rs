/// The transport envelope: the opaque unit stored server-side.
use serde::{Deserialize, Serialize};

/// How the client interprets decrypted bytes.
///
/// The server stores and returns this tag verbatim and never branches on
/// it; only the reader's device looks at it after decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretKind {
    Text,
    File,
}

/// The `{iv, kind, ciphertext}` tuple produced by `codec::seal`.
///
/// `iv` and `ciphertext` are base64url-unpadded. The ciphertext includes
/// the 16-byte GCM authentication tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub iv: String,
    pub kind: SecretKind,
    pub ciphertext: String,
}

/// Payload layout for `kind = file` secrets, serialized to JSON before
/// encryption. The vault never sees these fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    pub file_name: String,
    pub file_type: String,
    /// Raw file bytes, base64url-unpadded.
    pub file_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SecretKind::Text).unwrap(), "\"text\"");
        assert_eq!(serde_json::to_string(&SecretKind::File).unwrap(), "\"file\"");
    }

    #[test]
    fn test_kind_rejects_unknown() {
        assert!(serde_json::from_str::<SecretKind>("\"image\"").is_err());
    }

    #[test]
    fn test_envelope_roundtrips_through_json() {
        let envelope = Envelope {
            iv: "AAAAAAAAAAAAAAAA".into(),
            kind: SecretKind::Text,
            ciphertext: "BBBB".into(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let back: Envelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }

    #[test]
    fn test_file_payload_field_names() {
        let payload = FilePayload {
            file_name: "notes.txt".into(),
            file_type: "text/plain".into(),
            file_data: "aGVsbG8".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("fileName").is_some());
        assert!(json.get("fileType").is_some());
        assert!(json.get("fileData").is_some());
    }
}
