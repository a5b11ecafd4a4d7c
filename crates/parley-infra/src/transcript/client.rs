//! GraphQlTranscriptStore -- concrete [`TranscriptStore`] implementation
//! over the managed GraphQL data API.
//!
//! Two operations: a `createMessage` mutation per persisted message and a
//! `listMessages` query for history. Requests carry the standard
//! `{query, variables}` envelope and are authorized with the id token from
//! the sign-in token triple.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::json;

use parley_core::transcript::TranscriptStore;
use parley_types::chat::{ChatMessage, Sender};
use parley_types::error::TranscriptError;

const CREATE_MESSAGE: &str = "mutation CreateMessage($input: CreateMessageInput!) { \
     createMessage(input: $input) { id content sender createdAt } }";

const LIST_MESSAGES: &str =
    "query ListMessages { listMessages { items { id content sender createdAt } } }";

/// Transcript store client. No `Debug` derive: the handle carries the
/// caller's id token.
pub struct GraphQlTranscriptStore {
    client: reqwest::Client,
    endpoint: String,
    auth_token: SecretString,
}

impl GraphQlTranscriptStore {
    pub fn new(endpoint: impl Into<String>, auth_token: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            auth_token,
        }
    }

    async fn execute<D: serde::de::DeserializeOwned>(
        &self,
        query: &'static str,
        variables: serde_json::Value,
    ) -> Result<D, TranscriptError> {
        let envelope = GraphQlRequest { query, variables };

        let response = self
            .client
            .post(&self.endpoint)
            .header("authorization", self.auth_token.expose_secret())
            .json(&envelope)
            .send()
            .await
            .map_err(|e| TranscriptError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptError::Transport(format!("HTTP {status}: {body}")));
        }

        let envelope: GraphQlResponse<D> = response
            .json()
            .await
            .map_err(|e| TranscriptError::Deserialization(e.to_string()))?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let joined = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(TranscriptError::Store(joined));
            }
        }

        envelope
            .data
            .ok_or_else(|| TranscriptError::Deserialization("response carried no data".to_string()))
    }
}

#[derive(Debug, Serialize)]
struct GraphQlRequest {
    query: &'static str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<D> {
    data: Option<D>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// A stored message as the API returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageRecord {
    id: String,
    content: String,
    sender: Sender,
    created_at: DateTime<Utc>,
}

impl From<MessageRecord> for ChatMessage {
    fn from(record: MessageRecord) -> Self {
        ChatMessage {
            id: record.id,
            text: record.content,
            sender: record.sender,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateMessageData {
    create_message: MessageRecord,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListMessagesData {
    list_messages: MessageConnection,
}

#[derive(Debug, Deserialize)]
struct MessageConnection {
    #[serde(default)]
    items: Vec<MessageRecord>,
}

impl TranscriptStore for GraphQlTranscriptStore {
    async fn create_message(&self, message: &ChatMessage) -> Result<ChatMessage, TranscriptError> {
        let variables = json!({
            "input": {
                "content": message.text,
                "sender": message.sender.to_string(),
            }
        });

        let data: CreateMessageData = self.execute(CREATE_MESSAGE, variables).await?;
        Ok(data.create_message.into())
    }

    async fn list_messages(&self) -> Result<Vec<ChatMessage>, TranscriptError> {
        let data: ListMessagesData = self.execute(LIST_MESSAGES, json!({})).await?;
        Ok(data
            .list_messages
            .items
            .into_iter()
            .map(ChatMessage::from)
            .collect())
    }
}
