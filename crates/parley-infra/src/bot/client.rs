//! HttpBotTurnClient -- concrete [`BotTurnClient`] implementation over the
//! managed bot runtime.
//!
//! One POST per turn to the session-scoped text endpoint, authorized with
//! the session token issued by the credential exchange. The handle is bound
//! to one set of credentials at construction; a new chat invocation builds
//! a new handle.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use parley_core::bot::BotTurnClient;
use parley_types::auth::Credentials;
use parley_types::bot::{BotReply, BotTurnRequest, BotTurnResponse, Interpretation};
use parley_types::error::BotTurnError;

/// Bot runtime client. No `Debug` derive: the handle carries the session
/// token.
pub struct HttpBotTurnClient {
    client: reqwest::Client,
    endpoint: String,
    access_key_id: String,
    session_token: SecretString,
}

impl HttpBotTurnClient {
    pub fn new(endpoint: impl Into<String>, credentials: &Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            access_key_id: credentials.access_key_id.clone(),
            session_token: credentials.session_token.clone(),
        }
    }

    /// Session-scoped recognize-text URL for one turn.
    fn url(&self, request: &BotTurnRequest) -> String {
        format!(
            "{}/bots/{}/aliases/{}/locales/{}/sessions/{}/text",
            self.endpoint,
            request.bot_id,
            request.bot_alias_id,
            request.locale_id,
            request.session_id
        )
    }
}

/// Request body: everything else rides in the URL.
#[derive(Debug, Serialize)]
struct RecognizeTextBody<'a> {
    text: &'a str,
}

/// Wire response from the runtime.
#[derive(Debug, Deserialize)]
struct RecognizeTextResponse {
    #[serde(default)]
    messages: Vec<WireMessage>,
    #[serde(default)]
    interpretations: Vec<WireInterpretation>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireInterpretation {
    intent: WireIntent,
    #[serde(rename = "nluConfidence")]
    nlu_confidence: Option<WireConfidence>,
}

#[derive(Debug, Deserialize)]
struct WireIntent {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireConfidence {
    score: f64,
}

#[derive(Debug, Deserialize)]
struct RuntimeError {
    #[serde(default)]
    message: String,
}

fn to_domain(response: RecognizeTextResponse) -> BotTurnResponse {
    BotTurnResponse {
        messages: response
            .messages
            .into_iter()
            .map(|m| BotReply { content: m.content })
            .collect(),
        interpretations: response
            .interpretations
            .into_iter()
            .map(|i| Interpretation {
                intent: i.intent.name,
                confidence: i.nlu_confidence.map(|c| c.score),
            })
            .collect(),
    }
}

impl BotTurnClient for HttpBotTurnClient {
    async fn recognize_text(
        &self,
        request: &BotTurnRequest,
    ) -> Result<BotTurnResponse, BotTurnError> {
        let response = self
            .client
            .post(self.url(request))
            .header("x-access-key-id", &self.access_key_id)
            .header("x-session-token", self.session_token.expose_secret())
            .json(&RecognizeTextBody {
                text: &request.text,
            })
            .send()
            .await
            .map_err(|e| BotTurnError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<RuntimeError>(&body) {
                Ok(err) if !err.message.is_empty() => BotTurnError::Runtime {
                    message: err.message,
                },
                _ => BotTurnError::Transport(format!("HTTP {status}: {body}")),
            });
        }

        let wire: RecognizeTextResponse = response
            .json()
            .await
            .map_err(|e| BotTurnError::Deserialization(e.to_string()))?;

        Ok(to_domain(wire))
    }
}
