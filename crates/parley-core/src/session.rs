//! Session gate for the chat view.
//!
//! Runs exactly once per chat invocation: fetch the current credential
//! session, validate it, and bind a bot-client handle to it. Any failure or
//! absence resolves to a redirect -- no retry, no user-visible error. The
//! bot handle is built through a caller-supplied factory so this crate
//! stays free of infrastructure.

use parley_types::auth::AuthSession;
use tracing::debug;

use crate::auth::provider::CredentialProvider;

/// A live chat session: a bot-client handle bound to the session
/// credentials, plus the identity id used as the bot session id.
pub struct LiveSession<B> {
    pub bot: B,
    pub session_id: String,
}

/// Outcome of the session gate.
pub enum SessionOutcome<B> {
    /// Valid session; the chat view may render.
    Ready(LiveSession<B>),
    /// No valid session; navigate to sign-in without rendering chat.
    RedirectToSignIn,
}

/// Fetch and validate the current credential session, then build the bot
/// handle from it.
///
/// A fetch failure is treated identically to an absent session. Credential
/// expiry within the returned session is not re-checked.
pub async fn open_session<P, B, F>(provider: &P, make_bot: F) -> SessionOutcome<B>
where
    P: CredentialProvider,
    F: FnOnce(&AuthSession) -> B,
{
    let session = match provider.fetch_session().await {
        Ok(session) => session,
        Err(err) => {
            debug!(error = %err, "no credential session, redirecting to sign-in");
            return SessionOutcome::RedirectToSignIn;
        }
    };

    if !session.credentials.is_complete() {
        debug!("credential session incomplete, redirecting to sign-in");
        return SessionOutcome::RedirectToSignIn;
    }

    let bot = make_bot(&session);
    SessionOutcome::Ready(LiveSession {
        bot,
        session_id: session.identity_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::auth::{Credentials, UserProfile};
    use parley_types::error::AuthError;
    use secrecy::SecretString;

    use crate::auth::provider::SignUpOutcome;

    enum SessionScript {
        Valid,
        Incomplete,
        Missing,
    }

    struct GateProvider {
        script: SessionScript,
    }

    impl CredentialProvider for GateProvider {
        async fn sign_up(
            &self,
            _username: &str,
            _password: &SecretString,
            _email: &str,
        ) -> Result<SignUpOutcome, AuthError> {
            unimplemented!("not used by the session gate")
        }

        async fn confirm_sign_up(&self, _username: &str, _code: &str) -> Result<(), AuthError> {
            unimplemented!("not used by the session gate")
        }

        async fn sign_in(
            &self,
            _username: &str,
            _password: &SecretString,
        ) -> Result<(), AuthError> {
            unimplemented!("not used by the session gate")
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            unimplemented!("not used by the session gate")
        }

        async fn fetch_session(&self) -> Result<AuthSession, AuthError> {
            match self.script {
                SessionScript::Missing => Err(AuthError::SessionMissing),
                SessionScript::Incomplete => Ok(AuthSession {
                    credentials: Credentials {
                        access_key_id: String::new(),
                        secret_access_key: SecretString::from(""),
                        session_token: SecretString::from(""),
                    },
                    identity_id: "us-east-1:identity-7".to_string(),
                }),
                SessionScript::Valid => Ok(AuthSession {
                    credentials: Credentials {
                        access_key_id: "AKIDEXAMPLE".to_string(),
                        secret_access_key: SecretString::from("secret"),
                        session_token: SecretString::from("token"),
                    },
                    identity_id: "us-east-1:identity-7".to_string(),
                }),
            }
        }

        async fn current_user(&self) -> Result<UserProfile, AuthError> {
            unimplemented!("not used by the session gate")
        }

        async fn request_password_reset(&self, _username: &str) -> Result<(), AuthError> {
            unimplemented!("not used by the session gate")
        }

        async fn confirm_password_reset(
            &self,
            _username: &str,
            _code: &str,
            _new_password: &SecretString,
        ) -> Result<(), AuthError> {
            unimplemented!("not used by the session gate")
        }
    }

    #[tokio::test]
    async fn valid_session_yields_live_bot_handle() {
        let provider = GateProvider {
            script: SessionScript::Valid,
        };
        let outcome = open_session(&provider, |session| {
            format!("bot-for-{}", session.credentials.access_key_id)
        })
        .await;

        match outcome {
            SessionOutcome::Ready(live) => {
                assert_eq!(live.bot, "bot-for-AKIDEXAMPLE");
                // The identity id becomes the bot session id.
                assert_eq!(live.session_id, "us-east-1:identity-7");
            }
            SessionOutcome::RedirectToSignIn => panic!("expected a live session"),
        }
    }

    #[tokio::test]
    async fn missing_session_redirects_without_building_bot() {
        let provider = GateProvider {
            script: SessionScript::Missing,
        };
        let outcome: SessionOutcome<()> =
            open_session(&provider, |_| panic!("bot must not be built")).await;
        assert!(matches!(outcome, SessionOutcome::RedirectToSignIn));
    }

    #[tokio::test]
    async fn incomplete_credentials_redirect() {
        let provider = GateProvider {
            script: SessionScript::Incomplete,
        };
        let outcome: SessionOutcome<()> =
            open_session(&provider, |_| panic!("bot must not be built")).await;
        assert!(matches!(outcome, SessionOutcome::RedirectToSignIn));
    }
}
