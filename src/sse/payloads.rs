//! Wire payload shapes for upstream completion fragments.
//!
//! The gateway speaks an OpenAI-compatible stream: each data frame carries
//! a JSON chunk with `choices[0].delta.content`, and failures mid-stream
//! arrive as an embedded `error` member that is either a bare string or an
//! object with a `message`. Every field is optional on the wire, so the
//! structs here default aggressively rather than reject.

use serde::Deserialize;

/// One decoded chunk from a completion stream data frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkPayload {
    #[serde(default)]
    pub choices: Vec<ChoicePayload>,
    #[serde(default)]
    pub error: Option<ErrorPayload>,
}

impl ChunkPayload {
    /// Delta text from the first choice, if the chunk carries any.
    pub fn delta_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
    }

    /// Message from an embedded error member, if present.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message())
    }
}

/// One entry of a chunk's `choices` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChoicePayload {
    #[serde(default)]
    pub delta: DeltaPayload,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental content attached to a choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeltaPayload {
    #[serde(default)]
    pub content: Option<String>,
}

/// Embedded error member. Upstreams send either a plain string or an
/// object carrying at least a `message`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorPayload {
    Text(String),
    Object {
        message: String,
        #[serde(default)]
        code: Option<String>,
    },
}

impl ErrorPayload {
    pub fn message(&self) -> &str {
        match self {
            ErrorPayload::Text(text) => text,
            ErrorPayload::Object { message, .. } => message,
        }
    }
}
