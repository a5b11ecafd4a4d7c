//! CredentialProvider trait definition.
//!
//! The identity service seam: sign-up, confirmation, sign-in/out, password
//! reset, and the credential-session fetch that gates the chat view.
//! The HTTP implementation lives in `parley-infra`; uses native async fn in
//! traits (RPITIT, Rust 2024 edition).

use parley_types::auth::{AuthSession, UserProfile};
use parley_types::error::AuthError;
use secrecy::SecretString;

/// Result of a sign-up request.
#[derive(Debug, Clone, Copy)]
pub struct SignUpOutcome {
    /// True when the provider is configured for automatic confirmation,
    /// in which case the confirmation step can be skipped entirely.
    pub confirmed: bool,
}

/// The managed identity service consumed by Parley.
pub trait CredentialProvider: Send + Sync {
    /// Register a new user with a username, password, and email attribute.
    fn sign_up(
        &self,
        username: &str,
        password: &SecretString,
        email: &str,
    ) -> impl std::future::Future<Output = Result<SignUpOutcome, AuthError>> + Send;

    /// Submit the emailed verification code for a pending sign-up.
    fn confirm_sign_up(
        &self,
        username: &str,
        code: &str,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;

    /// Authenticate and establish a signed-in session.
    fn sign_in(
        &self,
        username: &str,
        password: &SecretString,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;

    /// End the signed-in session.
    fn sign_out(&self) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;

    /// Exchange the signed-in session for short-lived credentials and the
    /// caller's stable identity id.
    ///
    /// Fails with [`AuthError::SessionMissing`] when nobody is signed in.
    fn fetch_session(
        &self,
    ) -> impl std::future::Future<Output = Result<AuthSession, AuthError>> + Send;

    /// Profile of the currently signed-in user.
    fn current_user(
        &self,
    ) -> impl std::future::Future<Output = Result<UserProfile, AuthError>> + Send;

    /// Request a password-reset code for a username or email.
    fn request_password_reset(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;

    /// Complete a password reset with the emailed code.
    fn confirm_password_reset(
        &self,
        username: &str,
        code: &str,
        new_password: &SecretString,
    ) -> impl std::future::Future<Output = Result<(), AuthError>> + Send;
}
