//! Process-wide configuration for Parley.
//!
//! `AppConfig` represents the top-level `config.toml` controlling the three
//! service endpoints and the fixed bot identifiers. Loaded once at startup;
//! every field has a compiled-in default so a missing or partial file never
//! blocks the client. Bot/alias/locale identifiers are configuration, not
//! user input.

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `~/.parley/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

/// Identity service settings: where to reach the provider and which
/// application client / identity pool the tokens belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Endpoint for user-pool operations (sign-up, sign-in, confirmation).
    #[serde(default = "default_identity_endpoint")]
    pub endpoint: String,
    /// Endpoint for the credential exchange (identity id + short-lived keys).
    #[serde(default = "default_credentials_endpoint")]
    pub credentials_endpoint: String,
    /// Application client id registered with the provider.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Identity pool the signed-in user is resolved against.
    #[serde(default = "default_identity_pool_id")]
    pub identity_pool_id: String,
    /// Login provider name used as the key in the credential exchange.
    #[serde(default = "default_provider_name")]
    pub provider_name: String,
}

fn default_identity_endpoint() -> String {
    "https://identity.us-east-1.parley.cloud".to_string()
}

fn default_credentials_endpoint() -> String {
    "https://credentials.us-east-1.parley.cloud".to_string()
}

fn default_client_id() -> String {
    "parley-client".to_string()
}

fn default_identity_pool_id() -> String {
    "us-east-1:parley-pool".to_string()
}

fn default_provider_name() -> String {
    "identity.us-east-1.parley.cloud".to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_identity_endpoint(),
            credentials_endpoint: default_credentials_endpoint(),
            client_id: default_client_id(),
            identity_pool_id: default_identity_pool_id(),
            provider_name: default_provider_name(),
        }
    }
}

/// Bot runtime settings: endpoint plus the fixed bot identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_bot_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_bot_id")]
    pub bot_id: String,
    #[serde(default = "default_bot_alias_id")]
    pub bot_alias_id: String,
    #[serde(default = "default_locale_id")]
    pub locale_id: String,
    /// Display name for the chat banner.
    #[serde(default = "default_bot_name")]
    pub display_name: String,
}

fn default_bot_endpoint() -> String {
    "https://runtime.us-east-1.parley.cloud".to_string()
}

fn default_bot_id() -> String {
    "cloud-assistant".to_string()
}

fn default_bot_alias_id() -> String {
    "live".to_string()
}

fn default_locale_id() -> String {
    "en_US".to_string()
}

fn default_bot_name() -> String {
    "Cloud Assistant".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            endpoint: default_bot_endpoint(),
            bot_id: default_bot_id(),
            bot_alias_id: default_bot_alias_id(),
            locale_id: default_locale_id(),
            display_name: default_bot_name(),
        }
    }
}

/// Transcript store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// GraphQL endpoint for message persistence.
    #[serde(default = "default_transcript_endpoint")]
    pub endpoint: String,
}

fn default_transcript_endpoint() -> String {
    "https://transcript.us-east-1.parley.cloud/graphql".to_string()
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            endpoint: default_transcript_endpoint(),
        }
    }
}
