use serde::Serialize;

use crate::types::{Model, Turn};

/// Parameters for one chat-completion request.
///
/// The request carries the full ordered turn history on every call; the
/// completion service keeps no state between requests.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    /// The model to generate the reply with.
    pub model: Model,

    /// The ordered turn history, system turn first.
    pub messages: Vec<Turn>,

    /// Sampling temperature; 0 leans deterministic, higher is more varied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ChatRequest {
    /// Create a new `ChatRequest` with the given model and turn history.
    pub fn new(model: Model, messages: Vec<Turn>) -> Self {
        Self {
            model,
            messages,
            temperature: None,
        }
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;
    use serde_json::{json, to_value};

    #[test]
    fn request_serialization() {
        let request = ChatRequest::new(
            Model::Known(KnownModel::Gpt35Turbo),
            vec![Turn::system("persona"), Turn::user("hi")],
        )
        .with_temperature(0.2);

        let json = to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 0.2
            })
        );
    }

    #[test]
    fn temperature_omitted_when_unset() {
        let request = ChatRequest::new(
            Model::Known(KnownModel::Gpt4),
            vec![Turn::system("persona")],
        );

        let json = to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
    }
}
