//! Multi-step auth flows: sign-in verification, sign-up + confirmation,
//! and the two-stage password reset.
//!
//! The sign-up flow stashes the pending username/password in memory only,
//! scoped to the flow value itself. A fresh process has no stash, so a
//! standalone confirmation attempt reports the signup session as expired
//! and sends the user back to sign-up.

use parley_types::auth::{AuthSession, PendingSignup};
use parley_types::error::AuthError;
use secrecy::SecretString;
use tracing::info;

use crate::auth::provider::{CredentialProvider, SignUpOutcome};

/// Sign in and verify that a live credential session actually exists.
///
/// Signing in alone is not enough to enter the chat view: the session must
/// resolve to complete short-lived credentials. Returns the verified
/// session so the caller can navigate straight to chat.
pub async fn sign_in_and_verify<P: CredentialProvider>(
    provider: &P,
    username: &str,
    password: &SecretString,
) -> Result<AuthSession, AuthError> {
    provider.sign_in(username, password).await?;

    let session = provider.fetch_session().await?;
    if !session.credentials.is_complete() {
        return Err(AuthError::IncompleteCredentials);
    }

    info!(identity_id = %session.identity_id, "signed in");
    Ok(session)
}

/// The interactive sign-up flow, carrying the pending credentials between
/// the registration and confirmation steps.
#[derive(Default)]
pub struct SignupFlow {
    pending: Option<PendingSignup>,
}

impl SignupFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Username of the stashed pending sign-up, if any.
    pub fn pending_username(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.username.as_str())
    }

    /// Register the user and stash the credentials for the confirm step.
    ///
    /// When the provider reports the account as already confirmed
    /// (automatic sign-in configuration), no stash is kept -- the caller
    /// can sign in directly.
    pub async fn begin<P: CredentialProvider>(
        &mut self,
        provider: &P,
        username: &str,
        password: SecretString,
        email: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let outcome = provider.sign_up(username, &password, email).await?;

        if !outcome.confirmed {
            self.pending = Some(PendingSignup::new(username, password));
        }

        Ok(outcome)
    }

    /// Submit the verification code for the stashed sign-up, then sign the
    /// user in with the stashed password.
    ///
    /// The stash is cleared only on full success, so a mistyped code can be
    /// retried. With no stash present the flow aborts with
    /// [`AuthError::SignupSessionExpired`].
    pub async fn confirm<P: CredentialProvider>(
        &mut self,
        provider: &P,
        code: &str,
    ) -> Result<AuthSession, AuthError> {
        let pending = self
            .pending
            .as_ref()
            .ok_or(AuthError::SignupSessionExpired)?
            .clone();

        provider.confirm_sign_up(&pending.username, code).await?;
        let session = sign_in_and_verify(provider, &pending.username, &pending.password).await?;

        self.pending = None;
        Ok(session)
    }
}

/// Stage of the password-reset flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStage {
    /// Waiting for the user to request a reset code.
    Request,
    /// Code sent; waiting for code + new password.
    Confirm,
}

/// Two-stage password reset: request a code, then submit code + new
/// password. A failure at either stage leaves the flow on its current
/// stage so the caller can re-prompt.
pub struct PasswordResetFlow {
    username: Option<String>,
}

impl PasswordResetFlow {
    pub fn new() -> Self {
        Self { username: None }
    }

    pub fn stage(&self) -> ResetStage {
        if self.username.is_some() {
            ResetStage::Confirm
        } else {
            ResetStage::Request
        }
    }

    /// Stage one: request a reset code for the given username/email.
    pub async fn request_code<P: CredentialProvider>(
        &mut self,
        provider: &P,
        username: &str,
    ) -> Result<(), AuthError> {
        provider.request_password_reset(username).await?;
        self.username = Some(username.to_string());
        Ok(())
    }

    /// Stage two: submit the code and the new password.
    pub async fn confirm<P: CredentialProvider>(
        &self,
        provider: &P,
        code: &str,
        new_password: &SecretString,
    ) -> Result<(), AuthError> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| AuthError::Transport("no reset request in progress".to_string()))?;

        provider
            .confirm_password_reset(username, code, new_password)
            .await
    }
}

impl Default for PasswordResetFlow {
    fn default() -> Self {
        Self::new()
    }
}
