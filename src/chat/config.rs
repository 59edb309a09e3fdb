//! Configuration types for the chat binary.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! configuration the session runs with.

use arrrg_derive::CommandLine;

use crate::persona::Persona;
use crate::types::{KnownModel, Model};

/// Default sampling temperature for persona chat.
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Command-line arguments for the personabot-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: gpt-3.5-turbo)", "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature.
    #[arrrg(optional, "Sampling temperature (default: 0.2)", "TEMP")]
    pub temperature: Option<f32>,

    /// File to load the persona prompt from instead of the built-in persona.
    #[arrrg(optional, "File containing the persona prompt", "PATH")]
    pub persona_file: Option<String>,

    /// Display name for the persona.
    #[arrrg(optional, "Display name for the persona", "NAME")]
    pub persona_name: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

// `arrrg::CommandLine` requires `Eq`, which cannot be derived because of the
// `Option<f32>` field; `Eq` is a marker trait, so a manual impl suffices.
impl Eq for ChatArgs {}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The model to use for generating replies.
    pub model: Model,

    /// Sampling temperature sent on every request.
    pub temperature: f32,

    /// The persona seeding the conversation.
    pub persona: Persona,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Model: gpt-3.5-turbo
    /// - Temperature: 0.2
    /// - Persona: the built-in persona
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            model: Model::Known(KnownModel::Gpt35Turbo),
            temperature: DEFAULT_TEMPERATURE,
            persona: Persona::default(),
            use_color: true,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the persona.
    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        // --persona-file needs I/O, so the binary resolves it separately and
        // overrides the persona after this conversion.
        let defaults = ChatConfig::new();
        let persona = match args.persona_name {
            Some(name) => Persona::new(name, defaults.persona.prompt()),
            None => defaults.persona,
        };
        ChatConfig {
            model: args.model.map(Model::from).unwrap_or(defaults.model),
            temperature: args.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            persona,
            use_color: !args.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.model, Model::Known(KnownModel::Gpt35Turbo));
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.persona.name(), "Pavan");
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Gpt35Turbo));
        assert_eq!(config.temperature, 0.2);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            model: Some("gpt-4o".to_string()),
            temperature: Some(0.7),
            persona_file: None,
            persona_name: Some("Ada".to_string()),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.model, Model::Known(KnownModel::Gpt4o));
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.persona.name(), "Ada");
        assert!(!config.use_color);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_model(Model::Known(KnownModel::Gpt4))
            .with_temperature(0.0)
            .with_persona(Persona::new("Ada", "You are Ada."))
            .without_color();

        assert_eq!(config.model, Model::Known(KnownModel::Gpt4));
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.persona.prompt(), "You are Ada.");
        assert!(!config.use_color);
    }
}
