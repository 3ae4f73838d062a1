/// HTTP client for the CLI: moves envelopes to and from a running
/// sealbox server. Encryption happens before `store` is called and
/// decryption after `take` returns; nothing here touches plaintext
/// or key material.
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::codec::envelope::Envelope;
use crate::error::{Result, VaultError};

pub struct VaultClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct StoreResponse {
    id: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: String,
}

impl VaultClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST /vault — upload an envelope, returning its identifier.
    pub async fn store(&self, envelope: &Envelope, ttl_seconds: u64) -> Result<String> {
        let body = serde_json::json!({
            "iv": envelope.iv,
            "kind": envelope.kind,
            "ciphertext": envelope.ciphertext,
            "ttlSeconds": ttl_seconds,
        });

        let resp = self
            .client
            .post(format!("{}/vault", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| VaultError::Infrastructure(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let parsed: StoreResponse = resp
            .json()
            .await
            .map_err(|e| VaultError::Serialization(e.to_string()))?;
        Ok(parsed.id)
    }

    /// POST /vault/{id}/take — fetch and destroy an envelope.
    ///
    /// Not idempotent: a retry after a network failure may find the entry
    /// already consumed by the first attempt.
    pub async fn take(&self, id: &str) -> Result<Envelope> {
        let resp = self
            .client
            .post(format!("{}/vault/{}/take", self.base_url, id))
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| VaultError::Infrastructure(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(VaultError::NotFound);
        }
        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| VaultError::Serialization(e.to_string()))
    }
}

async fn api_error(resp: reqwest::Response) -> VaultError {
    let status = resp.status();
    let message = match resp.json::<ApiError>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };

    if status.is_client_error() {
        VaultError::Validation(message)
    } else {
        VaultError::Infrastructure(message)
    }
}
