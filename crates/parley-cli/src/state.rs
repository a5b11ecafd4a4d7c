//! Application state wiring the concrete service clients together.
//!
//! `AppState` pins the core orchestration (which is generic over the
//! collaborator traits) to the HTTP implementations from `parley-infra`.

use std::path::PathBuf;

use secrecy::SecretString;

use parley_infra::config::{load_config, resolve_data_dir};
use parley_infra::identity::{HttpCredentialProvider, TokenCache};
use parley_infra::transcript::GraphQlTranscriptStore;
use parley_types::config::AppConfig;

/// Shared application state for all CLI commands.
pub struct AppState {
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub provider: HttpCredentialProvider,
}

impl AppState {
    /// Initialize the application state: resolve the data directory, load
    /// the config, and build the identity client.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let provider = HttpCredentialProvider::new(
            config.identity.clone(),
            TokenCache::new(&data_dir),
        );

        Ok(Self {
            config,
            data_dir,
            provider,
        })
    }

    /// Build a transcript store handle authorized with the cached id token.
    ///
    /// Returns `None` when nobody is signed in -- callers treat that the
    /// same as a missing credential session.
    pub async fn transcript_store(&self) -> Option<GraphQlTranscriptStore> {
        let tokens = TokenCache::new(&self.data_dir).load().await?;
        Some(GraphQlTranscriptStore::new(
            self.config.transcript.endpoint.clone(),
            SecretString::from(tokens.id_token),
        ))
    }
}
