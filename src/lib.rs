// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod persona;
pub mod render;
pub mod types;

// Re-exports
pub use client::{CompletionProvider, OpenAi};
pub use error::{Error, Result};
pub use persona::Persona;
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
