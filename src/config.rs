/// Environment-driven configuration for the sealbox server.
///
/// Required variables are hard errors at startup; nothing falls back
/// silently to a default backing store.
use std::env;
use std::time::Duration;

use crate::error::{Result, VaultError};

/// Default and upper-bound time-to-live for a stored secret.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Server configuration, read once in `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string. Absent is only acceptable when the
    /// server runs with the in-memory store.
    pub database_url: Option<String>,
    /// Listen address for the API server.
    pub bind_addr: String,
    /// Largest TTL `store` will accept.
    pub max_ttl: Duration,
}

impl ServerConfig {
    /// Load configuration from `SEALBOX_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let max_ttl = match env::var("SEALBOX_MAX_TTL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    VaultError::Config("SEALBOX_MAX_TTL_SECS must be a positive integer".into())
                })?;
                if secs == 0 {
                    return Err(VaultError::Config(
                        "SEALBOX_MAX_TTL_SECS must be a positive integer".into(),
                    ));
                }
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_TTL,
        };

        Ok(Self {
            database_url: env::var("SEALBOX_DATABASE_URL").ok(),
            bind_addr: env::var("SEALBOX_BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            max_ttl,
        })
    }

    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| VaultError::Config("SEALBOX_DATABASE_URL is not set".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_database_url() {
        let cfg = ServerConfig {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_ttl: DEFAULT_TTL,
        };
        assert!(cfg.require_database_url().is_err());

        let cfg = ServerConfig {
            database_url: Some("postgres://localhost/sealbox".into()),
            ..cfg
        };
        assert_eq!(
            cfg.require_database_url().unwrap(),
            "postgres://localhost/sealbox"
        );
    }
}
