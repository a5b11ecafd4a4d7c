//! Bot turn request/response types for Parley.
//!
//! One `BotTurnRequest`/`BotTurnResponse` pair per conversational turn.
//! These are the runtime-agnostic shapes; the HTTP wire structures live in
//! `parley-infra`. No state is retained across turns beyond the externally
//! managed session id.

use serde::{Deserialize, Serialize};

/// A single turn sent to the bot runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotTurnRequest {
    pub bot_id: String,
    pub bot_alias_id: String,
    pub locale_id: String,
    pub session_id: String,
    pub text: String,
}

/// The bot runtime's answer to one turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotTurnResponse {
    /// Reply utterances, in the order the runtime produced them.
    /// May be empty when no intent matched with a fulfillable response.
    #[serde(default)]
    pub messages: Vec<BotReply>,
    /// Inferred intents, highest confidence first.
    #[serde(default)]
    pub interpretations: Vec<Interpretation>,
}

impl BotTurnResponse {
    /// Content of the first reply utterance, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.messages.first().map(|m| m.content.as_str())
    }
}

/// One reply utterance from the bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotReply {
    pub content: String,
}

/// An intent the runtime inferred for the utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    pub intent: String,
    /// NLU confidence in `[0.0, 1.0]`, when the runtime reports one.
    pub confidence: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_content_empty() {
        let resp = BotTurnResponse::default();
        assert_eq!(resp.first_content(), None);
    }

    #[test]
    fn test_first_content_takes_first() {
        let resp = BotTurnResponse {
            messages: vec![
                BotReply {
                    content: "Hi there!".to_string(),
                },
                BotReply {
                    content: "Anything else?".to_string(),
                },
            ],
            interpretations: Vec::new(),
        };
        assert_eq!(resp.first_content(), Some("Hi there!"));
    }

    #[test]
    fn test_response_deserialize_missing_fields() {
        // A runtime may omit both lists entirely.
        let resp: BotTurnResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.messages.is_empty());
        assert!(resp.interpretations.is_empty());
    }

    #[test]
    fn test_interpretation_deserialize() {
        let json = r#"{"intent": "ListInstances", "confidence": 0.93}"#;
        let interp: Interpretation = serde_json::from_str(json).unwrap();
        assert_eq!(interp.intent, "ListInstances");
        assert!((interp.confidence.unwrap() - 0.93).abs() < f64::EPSILON);
    }
}
