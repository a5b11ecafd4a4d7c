//! The turn handler: one user utterance in, one bot reply out.
//!
//! Owns the visible transcript. Every completed turn appends exactly one
//! user message followed by exactly one bot message; a runtime failure is
//! absorbed into the bot reply so the conversation always continues.

use parley_types::bot::BotTurnRequest;
use parley_types::chat::{ChatMessage, Sender};
use parley_types::config::BotConfig;
use tracing::{debug, warn};

use crate::bot::BotTurnClient;
use crate::transcript::TranscriptStore;

/// Reply used when the turn succeeds but the runtime returned no content.
pub const FALLBACK_REPLY: &str = "I didn't understand that. Please try again.";

/// Prefix for the substituted reply when the turn call fails outright.
pub const BOT_ERROR_PREFIX: &str = "Error communicating with bot: ";

/// One completed exchange: the user message and the bot reply, in the
/// order they were appended to the transcript.
pub struct TurnExchange {
    pub user: ChatMessage,
    pub bot: ChatMessage,
}

/// Handles sending turns and maintaining the visible transcript.
pub struct TurnHandler<B, T> {
    bot: Option<B>,
    store: T,
    bot_id: String,
    bot_alias_id: String,
    locale_id: String,
    session_id: String,
    transcript: Vec<ChatMessage>,
}

impl<B: BotTurnClient, T: TranscriptStore> TurnHandler<B, T> {
    pub fn new(
        bot: Option<B>,
        store: T,
        bot_config: &BotConfig,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            bot,
            store,
            bot_id: bot_config.bot_id.clone(),
            bot_alias_id: bot_config.bot_alias_id.clone(),
            locale_id: bot_config.locale_id.clone(),
            session_id: session_id.into(),
            transcript: Vec::new(),
        }
    }

    /// The visible transcript, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Seed the transcript with loaded history (replaces any current
    /// contents).
    pub fn seed(&mut self, history: Vec<ChatMessage>) {
        self.transcript = history;
    }

    /// Send one turn.
    ///
    /// No-op (returns `None`) when the trimmed text is empty or no live bot
    /// handle is present. Otherwise appends the user message, obtains the
    /// bot reply (first returned content, the fixed fallback on an empty
    /// response, or the error text on failure), appends it, and persists
    /// both sides best-effort.
    pub async fn send_turn(&mut self, text: &str) -> Option<TurnExchange> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let bot = self.bot.as_ref()?;

        let user_msg = ChatMessage::new(text, Sender::User);
        self.transcript.push(user_msg.clone());

        let request = BotTurnRequest {
            bot_id: self.bot_id.clone(),
            bot_alias_id: self.bot_alias_id.clone(),
            locale_id: self.locale_id.clone(),
            session_id: self.session_id.clone(),
            text: text.to_string(),
        };

        let reply_text = match bot.recognize_text(&request).await {
            Ok(response) => {
                if let Some(interp) = response.interpretations.first() {
                    debug!(
                        intent = %interp.intent,
                        confidence = ?interp.confidence,
                        "bot interpreted utterance"
                    );
                }
                match response.first_content() {
                    Some(content) if !content.is_empty() => content.to_string(),
                    _ => FALLBACK_REPLY.to_string(),
                }
            }
            Err(err) => format!("{BOT_ERROR_PREFIX}{err}"),
        };

        let bot_msg = ChatMessage::new(reply_text, Sender::Bot);
        self.transcript.push(bot_msg.clone());

        self.persist(&user_msg).await;
        self.persist(&bot_msg).await;

        Some(TurnExchange {
            user: user_msg,
            bot: bot_msg,
        })
    }

    /// Best-effort write to the transcript store. Failures are logged and
    /// never affect the visible transcript.
    async fn persist(&self, message: &ChatMessage) {
        if let Err(err) = self.store.create_message(message).await {
            warn!(
                error = %err,
                sender = %message.sender,
                "failed to persist chat message"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::bot::{BotReply, BotTurnResponse, Interpretation};
    use parley_types::error::{BotTurnError, TranscriptError};
    use std::sync::Mutex;

    struct FakeBot {
        reply: Result<BotTurnResponse, &'static str>,
        requests: Mutex<Vec<BotTurnRequest>>,
    }

    impl FakeBot {
        fn replying(content: &str) -> Self {
            Self {
                reply: Ok(BotTurnResponse {
                    messages: vec![BotReply {
                        content: content.to_string(),
                    }],
                    interpretations: vec![Interpretation {
                        intent: "Greeting".to_string(),
                        confidence: Some(0.98),
                    }],
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn silent() -> Self {
            Self {
                reply: Ok(BotTurnResponse::default()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(detail: &'static str) -> Self {
            Self {
                reply: Err(detail),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl BotTurnClient for FakeBot {
        async fn recognize_text(
            &self,
            request: &BotTurnRequest,
        ) -> Result<BotTurnResponse, BotTurnError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(response) => Ok(response.clone()),
                Err(detail) => Err(BotTurnError::Transport(detail.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct FakeStore {
        written: Mutex<Vec<ChatMessage>>,
        fail_writes: bool,
    }

    impl TranscriptStore for FakeStore {
        async fn create_message(
            &self,
            message: &ChatMessage,
        ) -> Result<ChatMessage, TranscriptError> {
            if self.fail_writes {
                return Err(TranscriptError::Store("unauthorized".to_string()));
            }
            self.written.lock().unwrap().push(message.clone());
            Ok(message.clone())
        }

        async fn list_messages(&self) -> Result<Vec<ChatMessage>, TranscriptError> {
            Ok(self.written.lock().unwrap().clone())
        }
    }

    fn handler(bot: Option<FakeBot>, store: FakeStore) -> TurnHandler<FakeBot, FakeStore> {
        TurnHandler::new(bot, store, &BotConfig::default(), "us-east-1:identity-1")
    }

    #[tokio::test]
    async fn turn_appends_user_then_bot() {
        let mut handler = handler(Some(FakeBot::replying("Hi there!")), FakeStore::default());
        let exchange = handler.send_turn("Hello").await.unwrap();

        assert_eq!(exchange.user.text, "Hello");
        assert_eq!(exchange.bot.text, "Hi there!");

        let transcript = handler.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].sender, Sender::User);
        assert_eq!(transcript[0].text, "Hello");
        assert_eq!(transcript[1].sender, Sender::Bot);
        assert_eq!(transcript[1].text, "Hi there!");
    }

    #[tokio::test]
    async fn request_carries_configured_identifiers_and_session() {
        let bot = FakeBot::replying("ok");
        let mut handler =
            TurnHandler::new(Some(bot), FakeStore::default(), &BotConfig::default(), "sess-9");
        handler.send_turn("  Hello  ").await.unwrap();

        let requests = handler.bot.as_ref().unwrap().requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].bot_id, "cloud-assistant");
        assert_eq!(requests[0].session_id, "sess-9");
        // The utterance is sent trimmed.
        assert_eq!(requests[0].text, "Hello");
    }

    #[tokio::test]
    async fn empty_or_whitespace_text_is_a_noop() {
        let mut handler = handler(Some(FakeBot::replying("Hi")), FakeStore::default());
        assert!(handler.send_turn("").await.is_none());
        assert!(handler.send_turn("   \t  ").await.is_none());
        assert!(handler.transcript().is_empty());
    }

    #[tokio::test]
    async fn missing_bot_handle_is_a_noop() {
        let mut handler = handler(None, FakeStore::default());
        assert!(handler.send_turn("Hello").await.is_none());
        assert!(handler.transcript().is_empty());
    }

    #[tokio::test]
    async fn empty_response_uses_fallback_reply() {
        let mut handler = handler(Some(FakeBot::silent()), FakeStore::default());
        let exchange = handler.send_turn("Hello").await.unwrap();
        assert_eq!(exchange.bot.text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn turn_failure_substitutes_error_reply_and_keeps_user_message() {
        let mut handler = handler(
            Some(FakeBot::failing("connection refused")),
            FakeStore::default(),
        );
        let exchange = handler.send_turn("Hello").await.unwrap();

        assert!(exchange.bot.text.starts_with(BOT_ERROR_PREFIX));
        assert!(exchange.bot.text.contains("connection refused"));

        // The user message still precedes the substituted reply.
        let transcript = handler.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].text, "Hello");
        assert_eq!(transcript[0].sender, Sender::User);
    }

    #[tokio::test]
    async fn both_sides_are_persisted() {
        let mut handler = handler(Some(FakeBot::replying("Hi there!")), FakeStore::default());
        handler.send_turn("Hello").await.unwrap();

        let written = handler.store.written.lock().unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].sender, Sender::User);
        assert_eq!(written[1].sender, Sender::Bot);
    }

    #[tokio::test]
    async fn persistence_failure_does_not_touch_the_transcript() {
        let store = FakeStore {
            fail_writes: true,
            ..FakeStore::default()
        };
        let mut handler = handler(Some(FakeBot::replying("Hi there!")), store);
        let exchange = handler.send_turn("Hello").await;

        assert!(exchange.is_some());
        assert_eq!(handler.transcript().len(), 2);
    }

    #[tokio::test]
    async fn seeded_history_precedes_new_turns() {
        let mut handler = handler(Some(FakeBot::replying("Hi there!")), FakeStore::default());
        handler.seed(vec![ChatMessage::new("earlier", Sender::User)]);
        handler.send_turn("Hello").await.unwrap();

        let texts: Vec<&str> = handler.transcript().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["earlier", "Hello", "Hi there!"]);
    }
}
