use thiserror::Error;

/// Errors from credential provider operations.
///
/// `Service` carries the provider's own error kind and message; the message
/// is what gets shown to the user, verbatim.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{message}")]
    Service { kind: String, message: String },

    #[error("no signed-in session")]
    SessionMissing,

    #[error("session is missing required credential fields")]
    IncompleteCredentials,

    #[error("signup session expired")]
    SignupSessionExpired,

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response from identity service: {0}")]
    Deserialization(String),
}

/// Errors from the bot runtime.
#[derive(Debug, Error)]
pub enum BotTurnError {
    #[error("bot runtime error: {message}")]
    Runtime { message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response from bot runtime: {0}")]
    Deserialization(String),
}

/// Errors from the transcript store.
///
/// Never surfaced to the transcript; logged only. The visible transcript is
/// authoritative regardless of persistence success.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("store error: {0}")]
    Store(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response from transcript store: {0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_service_error_shows_message_only() {
        let err = AuthError::Service {
            kind: "UsernameExistsException".to_string(),
            message: "User already exists".to_string(),
        };
        // The provider message is surfaced verbatim, without the kind.
        assert_eq!(err.to_string(), "User already exists");
    }

    #[test]
    fn test_bot_error_display() {
        let err = BotTurnError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[test]
    fn test_transcript_error_display() {
        let err = TranscriptError::Store("unauthorized".to_string());
        assert_eq!(err.to_string(), "store error: unauthorized");
    }
}
