//! Output rendering for the conversation transcript.
//!
//! This module provides a renderer trait and a plain-text implementation.
//! The abstraction exists so the conversation loop can be tested against a
//! capturing renderer instead of stdout.

use std::io::{self, Write};

/// ANSI escape code for cyan text (used for the persona name).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering transcript output.
pub trait Renderer: Send {
    /// Print one assistant reply, prefixed with the persona's display name
    /// and followed by a blank line separator.
    fn print_reply(&mut self, name: &str, text: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print an error message.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// Replies go to stdout; errors go to stderr so a piped transcript stays
/// clean.
pub struct PlainTextRenderer {
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self { use_color: true }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    fn flush(&mut self) {
        let _ = io::stdout().flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_reply(&mut self, name: &str, text: &str) {
        if self.use_color {
            println!("{ANSI_CYAN}{name}:{ANSI_RESET} {text}");
        } else {
            println!("{name}: {text}");
        }
        println!();
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("Error: {error}");
    }
}
