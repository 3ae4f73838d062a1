/// Share-link composition and parsing.
///
/// Links look like `{base}/s/{id}#{key}`. The fragment after `#` is never
/// sent in HTTP requests, so the key stays between sender and reader.
use crate::codec::key::SecretKey;
use crate::error::{Result, VaultError};

/// A parsed share link.
pub struct ShareLink {
    /// Server base URL, recovered from everything before `/s/`.
    pub base: String,
    pub id: String,
    pub key: SecretKey,
}

/// Build the link handed to the reader out-of-band.
pub fn compose(base: &str, id: &str, key: &SecretKey) -> String {
    format!("{}/s/{}#{}", base.trim_end_matches('/'), id, key.encode())
}

/// Parse a link produced by `compose`.
pub fn parse(link: &str) -> Result<ShareLink> {
    let (url, fragment) = link
        .split_once('#')
        .ok_or_else(|| VaultError::Validation("share link is missing its key fragment".into()))?;

    let (base, id) = url
        .rsplit_once("/s/")
        .ok_or_else(|| VaultError::Validation("share link has no /s/{id} path".into()))?;
    if id.is_empty() || id.contains('/') {
        return Err(VaultError::Validation("share link has no /s/{id} path".into()));
    }

    let key = SecretKey::decode(fragment)
        .map_err(|_| VaultError::Validation("share link carries an invalid key".into()))?;

    Ok(ShareLink {
        base: base.to_string(),
        id: id.to_string(),
        key,
    })
}
