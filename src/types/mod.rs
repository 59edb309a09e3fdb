// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod conversation;
pub mod model;
pub mod role;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_response::{ChatCompletion, Choice, Usage};
pub use conversation::Conversation;
pub use model::{KnownModel, Model};
pub use role::{Role, Turn};
