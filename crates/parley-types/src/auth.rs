//! Credential and identity types for Parley.
//!
//! `AuthSession` is the short-lived credential bundle the chat view runs
//! under. It lives in memory for the lifetime of one chat invocation and is
//! never written to disk. The durable material is the token triple issued at
//! sign-in (`AuthTokens`), which the infra layer caches between invocations.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Short-lived service credentials issued for a signed-in identity.
///
/// Secret fields are wrapped in [`SecretString`] and only exposed when
/// building request headers. The struct intentionally has no `Debug` or
/// serde derives: it must never end up in logs or on disk.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub session_token: SecretString,
}

impl Credentials {
    /// Whether every required credential field is present and non-empty.
    ///
    /// A session with incomplete credentials is treated the same as no
    /// session at all.
    pub fn is_complete(&self) -> bool {
        use secrecy::ExposeSecret;
        !self.access_key_id.is_empty()
            && !self.secret_access_key.expose_secret().is_empty()
            && !self.session_token.expose_secret().is_empty()
    }
}

/// A live credential session: credentials plus the stable identity id.
///
/// The identity id doubles as the bot session id, so conversation state on
/// the bot runtime side follows the signed-in user across turns.
#[derive(Clone)]
pub struct AuthSession {
    pub credentials: Credentials,
    pub identity_id: String,
}

// Manual `Debug` so tests can `unwrap_err()` a `Result<AuthSession, _>` without
// ever formatting the wrapped `Credentials` (which deliberately has no `Debug`).
impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("credentials", &"<redacted>")
            .field("identity_id", &self.identity_id)
            .finish()
    }
}

/// Token triple issued by the identity service at sign-in.
///
/// Cached on disk by the infra layer so a later invocation can exchange the
/// tokens for a fresh [`AuthSession`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Username the tokens were issued for.
    pub username: String,
}

/// Profile of the currently signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub attributes: Vec<UserAttribute>,
}

impl UserProfile {
    /// Look up an attribute value by name (e.g. `"email"`).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// A single name/value attribute on a user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

/// Credentials stashed in memory between the sign-up and confirmation steps.
///
/// Scoped to the interactive signup flow. The password never touches any
/// on-disk store; a fresh process has no stash.
#[derive(Clone)]
pub struct PendingSignup {
    pub username: String,
    pub password: SecretString,
}

impl PendingSignup {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}
