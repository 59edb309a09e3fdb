use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a chat-completion model identifier.
///
/// This can be a predefined model version or a custom string value for
/// models that may be added in the future.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier (for future models or fine-tuned variants)
    Custom(String),
}

/// Known chat-completion model versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// GPT-3.5 Turbo
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,

    /// GPT-4
    #[serde(rename = "gpt-4")]
    Gpt4,

    /// GPT-4 Turbo
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,

    /// GPT-4o
    #[serde(rename = "gpt-4o")]
    Gpt4o,

    /// GPT-4o mini
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::Gpt35Turbo => write!(f, "gpt-3.5-turbo"),
            KnownModel::Gpt4 => write!(f, "gpt-4"),
            KnownModel::Gpt4Turbo => write!(f, "gpt-4-turbo"),
            KnownModel::Gpt4o => write!(f, "gpt-4o"),
            KnownModel::Gpt4oMini => write!(f, "gpt-4o-mini"),
        }
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        match model {
            "gpt-3.5-turbo" => Model::Known(KnownModel::Gpt35Turbo),
            "gpt-4" => Model::Known(KnownModel::Gpt4),
            "gpt-4-turbo" => Model::Known(KnownModel::Gpt4Turbo),
            "gpt-4o" => Model::Known(KnownModel::Gpt4o),
            "gpt-4o-mini" => Model::Known(KnownModel::Gpt4oMini),
            other => Model::Custom(other.to_string()),
        }
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Model::from(model.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_model_serialization() {
        let model = Model::Known(KnownModel::Gpt35Turbo);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""gpt-3.5-turbo""#);

        let model = Model::Known(KnownModel::Gpt4o);
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""gpt-4o""#);
    }

    #[test]
    fn custom_model_serialization() {
        let model = Model::Custom("my-fine-tune".to_string());
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""my-fine-tune""#);
    }

    #[test]
    fn model_deserialization() {
        let json = r#""gpt-3.5-turbo""#;
        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model, Model::Known(KnownModel::Gpt35Turbo));

        let json = r#""my-fine-tune""#;
        let model: Model = serde_json::from_str(json).unwrap();
        assert_eq!(model, Model::Custom("my-fine-tune".to_string()));
    }

    #[test]
    fn known_identifiers_round_trip_through_from_str() {
        let model = Model::from("gpt-4-turbo");
        assert_eq!(model, Model::Known(KnownModel::Gpt4Turbo));
        assert_eq!(model.to_string(), "gpt-4-turbo");

        let model = Model::from("something-else");
        assert_eq!(model, Model::Custom("something-else".to_string()));
    }

    #[test]
    fn display() {
        let model = Model::Known(KnownModel::Gpt4oMini);
        assert_eq!(model.to_string(), "gpt-4o-mini");

        let model = Model::Custom("my-fine-tune".to_string());
        assert_eq!(model.to_string(), "my-fine-tune");
    }
}
