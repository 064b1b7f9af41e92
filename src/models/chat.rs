//! LLM chat data models
//!
//! Request payloads, conversation history and the normalized server response

use crate::utils::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message exchanged in a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only conversation history
///
/// Storage is unbounded; only [`ChatHistory::window`] limits what goes on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatHistory {
    turns: Vec<ChatTurn>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Most recent `size` turns, oldest first
    pub fn window(&self, size: usize) -> &[ChatTurn] {
        let start = self.turns.len().saturating_sub(size);
        &self.turns[start..]
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// JSON body POSTed to the LLM routes
///
/// Absent fields are omitted from the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<ChatTurn>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl LlmRequest {
    pub fn prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    pub fn with_places(mut self, origin: impl Into<String>, destination: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self.destination = Some(destination.into());
        self
    }

    pub fn with_span(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    pub fn with_history(mut self, history: &[ChatTurn]) -> Self {
        self.history = Some(history.to_vec());
        self
    }
}

/// Recognized response shapes, in resolution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerResponse {
    /// `{"error": "..."}`, wins over every other field
    Error(String),
    /// `{"choices": [{"message": {"content": "..."}}]}`
    Choices(String),
    /// `{"response": "..."}`
    Response(String),
    /// `{"content": "..."}`
    Content(String),
}

impl ServerResponse {
    /// Classify a response body, first matching shape wins
    pub fn classify(body: &Value) -> Option<Self> {
        let object = body.as_object()?;

        if let Some(message) = object.get("error").and_then(error_message) {
            return Some(ServerResponse::Error(message));
        }

        if let Some(content) = object
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
        {
            return Some(ServerResponse::Choices(content.to_string()));
        }

        if let Some(text) = non_empty_str(object.get("response")) {
            return Some(ServerResponse::Response(text));
        }

        if let Some(text) = non_empty_str(object.get("content")) {
            return Some(ServerResponse::Content(text));
        }

        None
    }

    /// Resolve a body into its content text
    pub fn resolve(body: &Value) -> ClientResult<String> {
        match Self::classify(body) {
            Some(ServerResponse::Error(message)) => Err(ClientError::Remote { message }),
            Some(ServerResponse::Choices(text))
            | Some(ServerResponse::Response(text))
            | Some(ServerResponse::Content(text)) => Ok(text),
            None => Err(ClientError::MalformedResponse),
        }
    }
}

/// Server error message, if the `error` field carries one
pub(crate) fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Reply of the smart chat route
#[derive(Debug, Clone, PartialEq)]
pub enum SmartChatReply {
    /// `content` or `response` text
    Text(String),
    /// Structured `content`/`response`, or the whole body when neither is usable
    Structured(Value),
}

impl SmartChatReply {
    /// First usable of `content`, then `response`, else the whole body
    pub fn from_body(body: Value) -> Self {
        ["content", "response"]
            .iter()
            .find_map(|field| Self::from_field(body.get(*field)))
            .unwrap_or(SmartChatReply::Structured(body))
    }

    fn from_field(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(SmartChatReply::Text(s.clone())),
            other => Some(SmartChatReply::Structured(other.clone())),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SmartChatReply::Text(text) => Some(text),
            SmartChatReply::Structured(_) => None,
        }
    }
}

/// Structured block the assistant is prompted to embed in route suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecommendation {
    pub best_route_index: Option<u32>,
    pub recommended_mode: Option<String>,
    pub estimated_time_minutes: Option<f64>,
    pub estimated_cost: Option<f64>,
    pub explanation: Option<String>,
}
