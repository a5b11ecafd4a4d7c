//! HttpCredentialProvider -- concrete [`CredentialProvider`] implementation
//! over the managed identity service.
//!
//! User-pool operations (sign-up, confirmation, sign-in, password reset) go
//! to the identity endpoint; the credential exchange (identity id +
//! short-lived keys) goes to the credentials endpoint. Both speak JSON with
//! an action header naming the operation. Tokens issued at sign-in are kept
//! in the [`TokenCache`] so `fetch_session` works across invocations.

use std::collections::HashMap;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use parley_core::auth::provider::{CredentialProvider, SignUpOutcome};
use parley_types::auth::{AuthSession, AuthTokens, Credentials, UserProfile, UserAttribute};
use parley_types::config::IdentityConfig;
use parley_types::error::AuthError;

use super::token_cache::TokenCache;
use super::types::{
    AttributeType, ConfirmForgotPasswordRequest, ConfirmSignUpRequest, EmptyResponse,
    ForgotPasswordRequest, GetCredentialsForIdentityRequest, GetCredentialsForIdentityResponse,
    GetIdRequest, GetIdResponse, GetUserRequest, GetUserResponse, GlobalSignOutRequest,
    InitiateAuthRequest, InitiateAuthResponse, ServiceError, SignUpRequest, SignUpResponse,
};

/// Action header value prefix for user-pool operations.
const IDENTITY_TARGET: &str = "IdentityService";

/// Action header value prefix for the credential exchange.
const CREDENTIALS_TARGET: &str = "CredentialService";

/// Identity service client.
///
/// No `Debug` derive: requests carry passwords and tokens.
pub struct HttpCredentialProvider {
    client: reqwest::Client,
    config: IdentityConfig,
    token_cache: TokenCache,
}

impl HttpCredentialProvider {
    pub fn new(config: IdentityConfig, token_cache: TokenCache) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            token_cache,
        }
    }

    /// Login map for the credential exchange: provider name -> id token.
    fn logins(&self, id_token: &str) -> HashMap<String, String> {
        let mut logins = HashMap::new();
        logins.insert(self.config.provider_name.clone(), id_token.to_string());
        logins
    }

    async fn post<Req, Resp>(
        &self,
        endpoint: &str,
        target: &str,
        body: &Req,
    ) -> Result<Resp, AuthError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .post(endpoint)
            .header("x-amz-target", target)
            .header("content-type", "application/x-amz-json-1.1")
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_error_body(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AuthError::Deserialization(e.to_string()))
    }

    /// Cached tokens, or [`AuthError::SessionMissing`] when nobody is
    /// signed in on this machine.
    async fn require_tokens(&self) -> Result<AuthTokens, AuthError> {
        self.token_cache.load().await.ok_or(AuthError::SessionMissing)
    }
}

/// Map a non-success response body to an [`AuthError`].
///
/// Service errors carry `__type` + `message`; the message is surfaced
/// verbatim. Anything else degrades to a transport error.
fn map_error_body(status: StatusCode, body: &str) -> AuthError {
    match serde_json::from_str::<ServiceError>(body) {
        Ok(err) if !err.message.is_empty() => AuthError::Service {
            kind: err.error_type,
            message: err.message,
        },
        _ => AuthError::Transport(format!("HTTP {status}: {body}")),
    }
}

/// Convert a credential-exchange response into the domain session.
fn session_from(resp: GetCredentialsForIdentityResponse) -> AuthSession {
    AuthSession {
        credentials: Credentials {
            access_key_id: resp.credentials.access_key_id,
            secret_access_key: SecretString::from(resp.credentials.secret_key),
            session_token: SecretString::from(resp.credentials.session_token),
        },
        identity_id: resp.identity_id,
    }
}

impl CredentialProvider for HttpCredentialProvider {
    async fn sign_up(
        &self,
        username: &str,
        password: &SecretString,
        email: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let request = SignUpRequest {
            client_id: self.config.client_id.clone(),
            username: username.to_string(),
            password: password.expose_secret().to_string(),
            user_attributes: vec![AttributeType {
                name: "email".to_string(),
                value: email.to_string(),
            }],
        };

        let response: SignUpResponse = self
            .post(
                &self.config.endpoint,
                &format!("{IDENTITY_TARGET}.SignUp"),
                &request,
            )
            .await?;

        Ok(SignUpOutcome {
            confirmed: response.user_confirmed,
        })
    }

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), AuthError> {
        let request = ConfirmSignUpRequest {
            client_id: self.config.client_id.clone(),
            username: username.to_string(),
            confirmation_code: code.to_string(),
        };

        let _: EmptyResponse = self
            .post(
                &self.config.endpoint,
                &format!("{IDENTITY_TARGET}.ConfirmSignUp"),
                &request,
            )
            .await?;
        Ok(())
    }

    async fn sign_in(&self, username: &str, password: &SecretString) -> Result<(), AuthError> {
        let request =
            InitiateAuthRequest::user_password(&self.config.client_id, username, password.expose_secret());

        let response: InitiateAuthResponse = self
            .post(
                &self.config.endpoint,
                &format!("{IDENTITY_TARGET}.InitiateAuth"),
                &request,
            )
            .await?;

        let tokens = AuthTokens {
            access_token: response.authentication_result.access_token,
            id_token: response.authentication_result.id_token,
            refresh_token: response.authentication_result.refresh_token,
            username: username.to_string(),
        };

        self.token_cache
            .save(&tokens)
            .await
            .map_err(|e| AuthError::Transport(format!("failed to persist session: {e}")))?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let tokens = self.token_cache.load().await;

        // The local session ends no matter what the service says.
        if let Err(err) = self.token_cache.clear().await {
            warn!(error = %err, "failed to remove session cache");
        }

        if let Some(tokens) = tokens {
            let request = GlobalSignOutRequest {
                access_token: tokens.access_token,
            };
            let _: EmptyResponse = self
                .post(
                    &self.config.endpoint,
                    &format!("{IDENTITY_TARGET}.GlobalSignOut"),
                    &request,
                )
                .await?;
        }
        Ok(())
    }

    async fn fetch_session(&self) -> Result<AuthSession, AuthError> {
        let tokens = self.require_tokens().await?;
        let logins = self.logins(&tokens.id_token);

        let id_response: GetIdResponse = self
            .post(
                &self.config.credentials_endpoint,
                &format!("{CREDENTIALS_TARGET}.GetId"),
                &GetIdRequest {
                    identity_pool_id: self.config.identity_pool_id.clone(),
                    logins: logins.clone(),
                },
            )
            .await?;

        let creds_response: GetCredentialsForIdentityResponse = self
            .post(
                &self.config.credentials_endpoint,
                &format!("{CREDENTIALS_TARGET}.GetCredentialsForIdentity"),
                &GetCredentialsForIdentityRequest {
                    identity_id: id_response.identity_id,
                    logins,
                },
            )
            .await?;

        Ok(session_from(creds_response))
    }

    async fn current_user(&self) -> Result<UserProfile, AuthError> {
        let tokens = self.require_tokens().await?;

        let response: GetUserResponse = self
            .post(
                &self.config.endpoint,
                &format!("{IDENTITY_TARGET}.GetUser"),
                &GetUserRequest {
                    access_token: tokens.access_token,
                },
            )
            .await?;

        Ok(UserProfile {
            username: response.username,
            attributes: response
                .user_attributes
                .into_iter()
                .map(|a| UserAttribute {
                    name: a.name,
                    value: a.value,
                })
                .collect(),
        })
    }

    async fn request_password_reset(&self, username: &str) -> Result<(), AuthError> {
        let request = ForgotPasswordRequest {
            client_id: self.config.client_id.clone(),
            username: username.to_string(),
        };

        let _: EmptyResponse = self
            .post(
                &self.config.endpoint,
                &format!("{IDENTITY_TARGET}.ForgotPassword"),
                &request,
            )
            .await?;
        Ok(())
    }

    async fn confirm_password_reset(
        &self,
        username: &str,
        code: &str,
        new_password: &SecretString,
    ) -> Result<(), AuthError> {
        let request = ConfirmForgotPasswordRequest {
            client_id: self.config.client_id.clone(),
            username: username.to_string(),
            confirmation_code: code.to_string(),
            password: new_password.expose_secret().to_string(),
        };

        let _: EmptyResponse = self
            .post(
                &self.config.endpoint,
                &format!("{IDENTITY_TARGET}.ConfirmForgotPassword"),
                &request,
            )
            .await?;
        Ok(())
    }
}
