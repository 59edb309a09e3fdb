use serde::Deserialize;

use crate::types::{Model, Turn};

/// A completed chat response from the API.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatCompletion {
    /// Unique identifier for the completion.
    pub id: String,

    /// The model that generated the completion.
    pub model: Model,

    /// Generated choices, ranked best-first.
    pub choices: Vec<Choice>,

    /// Token accounting for the request, when the service reports it.
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One generated reply candidate.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Choice {
    /// Position of this choice in the ranked list.
    pub index: u32,

    /// The generated assistant message.
    pub message: Turn,

    /// Why generation stopped, when the service reports it.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage reported by the service.
#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
pub struct Usage {
    /// Tokens consumed by the prompt.
    pub prompt_tokens: u64,

    /// Tokens generated in the reply.
    pub completion_tokens: u64,

    /// Sum of prompt and completion tokens.
    pub total_tokens: u64,
}

impl ChatCompletion {
    /// Returns the text content of the top-ranked choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.message.content.as_str())
    }
}
