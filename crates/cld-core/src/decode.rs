/// Decoding of response documents into a [`Map`].
///
/// Two entry points exist:
///
/// - [`parse_map`] / [`parse_map_slice`] decode a bare response document in
///   either shape;
/// - [`decode_completion`] first unwraps an OpenAI-style chat-completion body
///   (`choices[0].message.content`) and then decodes the content string.
///
/// Every failure is reported as a [`DecodeError`] before a [`Map`] exists.
/// Once a map is built, nothing downstream of it can fail.
use serde::Deserialize;

use crate::map::{Map, MapDocument, ShapeError};

/// Errors produced while decoding a response into a [`Map`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The document is not valid JSON or does not match either shape
    /// (missing endpoint, unknown polarity symbol, wrong types).
    #[error("invalid map document at line {line}, column {column}: {source}")]
    Json {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The document is well-formed JSON but carries both or neither influence
    /// lists.
    #[error("invalid map document: {0}")]
    Shape(#[from] ShapeError),

    /// The chat-completion envelope could not be parsed.
    #[error("invalid completion response: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The chat-completion envelope has no choices.
    #[error("completion response has no choices")]
    EmptyCompletion,
}

impl DecodeError {
    fn json(source: serde_json::Error) -> Self {
        Self::Json {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}

/// Decodes a response document from a string.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] for malformed or mistyped JSON and
/// [`DecodeError::Shape`] when the document carries both or neither of
/// `relationships` and `causal_chains`.
pub fn parse_map(content: &str) -> Result<Map, DecodeError> {
    let doc: MapDocument = serde_json::from_str(content).map_err(DecodeError::json)?;
    finish(doc)
}

/// Decodes a response document from raw bytes.
///
/// # Errors
///
/// As for [`parse_map`]; invalid UTF-8 is reported as [`DecodeError::Json`].
pub fn parse_map_slice(bytes: &[u8]) -> Result<Map, DecodeError> {
    let doc: MapDocument = serde_json::from_slice(bytes).map_err(DecodeError::json)?;
    finish(doc)
}

fn finish(doc: MapDocument) -> Result<Map, DecodeError> {
    let map = Map::try_from(doc)?;
    tracing::debug!(
        shape = map.shape().key(),
        title = map.title(),
        "decoded map"
    );
    Ok(map)
}

// ---------------------------------------------------------------------------
// Chat-completion envelope
// ---------------------------------------------------------------------------

/// The subset of an OpenAI-compatible chat-completion body needed here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices; only the first is used.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Choice {
    /// The assistant message.
    pub message: ChatMessage,
}

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessage {
    /// Speaker role, usually `"assistant"`.
    #[serde(default)]
    pub role: String,
    /// Message text: the JSON response document.
    #[serde(default)]
    pub content: String,
}

/// Unwraps a chat-completion body and decodes its first choice as a [`Map`].
///
/// # Errors
///
/// Returns [`DecodeError::Envelope`] if `body` is not a completion object,
/// [`DecodeError::EmptyCompletion`] if it has no choices, and any
/// [`parse_map`] error for the content itself.
pub fn decode_completion(body: &[u8]) -> Result<Map, DecodeError> {
    let response: ChatCompletionResponse =
        serde_json::from_slice(body).map_err(DecodeError::Envelope)?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(DecodeError::EmptyCompletion)?;
    parse_map(&choice.message.content)
}
