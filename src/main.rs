use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sealbox::client::VaultClient;
use sealbox::codec::envelope::{FilePayload, SecretKind};
use sealbox::codec::key::SecretKey;
use sealbox::codec::{self, link};
use sealbox::config::ServerConfig;
use sealbox::error::{Result, VaultError};
use sealbox::server::{self, AppState};
use sealbox::state::Database;
use sealbox::vault::memory::MemoryVaultStore;
use sealbox::vault::postgres::PostgresVaultStore;
use sealbox::vault::store::VaultStore;
use sealbox::vault::Vault;

#[derive(Parser)]
#[command(name = "sealbox")]
#[command(about = "One-time-access encrypted secret sharing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Keep entries in process memory instead of PostgreSQL (local use only)
        #[arg(long)]
        in_memory: bool,
    },
    /// Encrypt a secret locally, upload the envelope, print the share link
    Seal {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: String,
        /// Read the secret from a file (stored as a file secret) instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Time-to-live in seconds
        #[arg(long, default_value_t = 24 * 60 * 60)]
        ttl: u64,
        /// Base URL for the printed share link, when it differs from --server
        #[arg(long)]
        link_base: Option<String>,
    },
    /// Fetch, destroy and decrypt a secret
    Open {
        /// Share link produced by `seal`
        link: Option<String>,
        /// Vault identifier (alternative to a share link)
        #[arg(long, requires = "key")]
        id: Option<String>,
        /// Decryption key (alternative to a share link)
        #[arg(long, requires = "id")]
        key: Option<String>,
        /// Server base URL, used with --id/--key
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: String,
        /// Write the plaintext to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { in_memory } => serve(in_memory).await,
        Commands::Seal {
            server,
            file,
            ttl,
            link_base,
        } => seal(server, file, ttl, link_base).await,
        Commands::Open {
            link,
            id,
            key,
            server,
            output,
        } => open(link, id, key, server, output).await,
    }
}

async fn serve(in_memory: bool) -> Result<()> {
    let cfg = ServerConfig::from_env()?;

    let store: Arc<dyn VaultStore> = if in_memory {
        Arc::new(MemoryVaultStore::new())
    } else {
        let db = Database::connect(cfg.require_database_url()?).await?;
        db.migrate().await?;
        Arc::new(PostgresVaultStore::new(db))
    };

    tracing::info!(store = store.name(), "vault store initialized");

    let vault = Vault::new(store, cfg.max_ttl);
    server::serve(
        AppState {
            vault: Arc::new(vault),
        },
        &cfg.bind_addr,
    )
    .await
}

async fn seal(
    server: String,
    file: Option<PathBuf>,
    ttl: u64,
    link_base: Option<String>,
) -> Result<()> {
    let (plaintext, kind) = match &file {
        Some(path) => {
            // File secrets wrap name and bytes the way the web client does,
            // so a browser reader can reconstruct the download.
            let data = std::fs::read(path)?;
            let payload = FilePayload {
                file_name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "secret".to_string()),
                file_type: "application/octet-stream".to_string(),
                file_data: URL_SAFE_NO_PAD.encode(&data),
            };
            let bytes = serde_json::to_vec(&payload)
                .map_err(|e| VaultError::Serialization(e.to_string()))?;
            (bytes, SecretKind::File)
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            (buf, SecretKind::Text)
        }
    };

    let key = SecretKey::generate();
    let envelope = codec::seal(&plaintext, kind, &key)?;

    let id = VaultClient::new(&server).store(&envelope, ttl).await?;

    let base = link_base.unwrap_or(server);
    println!("{}", link::compose(&base, &id, &key));
    Ok(())
}

async fn open(
    share_link: Option<String>,
    id: Option<String>,
    key: Option<String>,
    server: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let (base, id, key) = match (share_link, id, key) {
        (Some(raw), _, _) => {
            let parsed = link::parse(&raw)?;
            (parsed.base, parsed.id, parsed.key)
        }
        (None, Some(id), Some(key)) => (server, id, SecretKey::decode(&key)?),
        _ => {
            return Err(VaultError::Validation(
                "provide a share link, or --id together with --key".into(),
            ))
        }
    };

    let envelope = VaultClient::new(&base).take(&id).await?;
    let kind = envelope.kind;
    let plaintext = codec::open(&envelope, &key)?;

    let bytes = match kind {
        SecretKind::Text => plaintext,
        SecretKind::File => {
            let payload: FilePayload = serde_json::from_slice(&plaintext)
                .map_err(|e| VaultError::Serialization(e.to_string()))?;
            URL_SAFE_NO_PAD
                .decode(&payload.file_data)
                .map_err(|e| VaultError::Serialization(e.to_string()))?
        }
    };

    match output {
        Some(path) => std::fs::write(path, &bytes)?,
        None => std::io::stdout().write_all(&bytes)?,
    }
    Ok(())
}
