//! Interactive persona chat for the terminal.
//!
//! This binary runs a blocking conversation loop against a chat-completion
//! service. The persona speaks first; type a reply and press enter; type
//! `exit` (exactly) to leave.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with the built-in persona
//! personabot-chat
//!
//! # Specify a model
//! personabot-chat --model gpt-4o
//!
//! # Use your own persona
//! personabot-chat --persona-file ada.txt --persona-name Ada
//!
//! # Disable colors (useful for piping output)
//! personabot-chat --no-color
//! ```
//!
//! The API key is read from the OPENAI_API_KEY environment variable; the
//! process fails before the first request if it is missing.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use personabot::chat::{ChatArgs, ChatConfig, ChatSession, LineSource, PlainTextRenderer, Renderer};
use personabot::{Error, OpenAi, Persona};

/// Line input backed by rustyline.
///
/// End-of-input (Ctrl+D) and an interrupt at the prompt (Ctrl+C) both read
/// as a closed stream, which the session treats as a clean exit.
struct ReadlineSource {
    editor: DefaultEditor,
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> personabot::Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(&line);
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(Error::io(
                "failed to read input",
                io::Error::other(err.to_string()),
            )),
        }
    }
}

/// Main entry point for the personabot-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("personabot-chat [OPTIONS]");
    let persona_file = args.persona_file.clone();
    let mut config = ChatConfig::from(args);
    if let Some(path) = persona_file {
        let name = config.persona.name().to_string();
        config.persona = Persona::from_file(name, &path)?;
    }
    let use_color = config.use_color;

    // Missing OPENAI_API_KEY fails here, before the loop starts.
    let client = OpenAi::new(None)?;
    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut input = ReadlineSource {
        editor: DefaultEditor::new()?,
    };

    // Ctrl+C mid-request stops the loop at the next suspension point.
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::Relaxed);
    })?;

    renderer.print_info(&format!(
        "Chatting with {} (model: {}). Type \"exit\" to leave.\n",
        session.persona_name(),
        session.config().model
    ));

    if let Err(err) = session.run(&mut input, &mut renderer, shutdown).await {
        renderer.print_error(&err.to_string());
        std::process::exit(1);
    }

    Ok(())
}
