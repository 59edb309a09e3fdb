//! Chat application module for interactive persona conversations.
//!
//! This module provides the terminal conversation loop built on top of the
//! personabot client library:
//!
//! - A fixed persona seeds the conversation's system turn
//! - The assistant speaks first; the user answers; repeat
//! - Typing `exit` (exactly) ends the conversation
//!
//! # Architecture
//!
//! The module is organized into two components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Conversation state and the request/input loop

mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatSession, EXIT_SENTINEL, LineSource};
