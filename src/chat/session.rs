//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the conversation
//! state and drives the request/response cycle against a completion
//! provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::chat::config::ChatConfig;
use crate::client::CompletionProvider;
use crate::error::Result;
use crate::render::Renderer;
use crate::types::{ChatRequest, Conversation};

/// The exact user input that ends the conversation.
///
/// The match is case-sensitive and untrimmed: `"Exit"` and `"exit "` keep
/// the conversation going. Only user turns are checked; an assistant reply
/// of `"exit"` does not terminate anything.
pub const EXIT_SENTINEL: &str = "exit";

/// Prompt label shown when reading a user turn.
const INPUT_PROMPT: &str = "Me: ";

/// A source of user input lines.
///
/// `Ok(None)` means the stream is closed (for example, piped input is
/// exhausted); the session treats that as an implicit termination signal.
pub trait LineSource {
    /// Blocks for one line of input, displayed behind `prompt`.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// A chat session that owns the conversation and drives the loop.
///
/// The conversation is seeded with the persona's system turn at
/// construction, grows monotonically while the session runs, and is
/// discarded with the session. Nothing here is global; two sessions never
/// share state.
pub struct ChatSession<P: CompletionProvider> {
    provider: P,
    config: ChatConfig,
    conversation: Conversation,
}

impl<P: CompletionProvider> ChatSession<P> {
    /// Creates a new chat session with the given provider and configuration.
    pub fn new(provider: P, config: ChatConfig) -> Self {
        let conversation = Conversation::new(config.persona.prompt());
        Self {
            provider,
            config,
            conversation,
        }
    }

    /// Returns the conversation so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the persona's display name.
    pub fn persona_name(&self) -> &str {
        self.config.persona.name()
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Requests the next reply for the current turn history.
    ///
    /// On success the reply is appended as an assistant turn and returned.
    /// On failure nothing is appended and the error propagates: a failed
    /// completion never produces a printed reply or a phantom turn.
    pub async fn request_reply(&mut self) -> Result<String> {
        let request = ChatRequest::new(
            self.config.model.clone(),
            self.conversation.turns().to_vec(),
        )
        .with_temperature(self.config.temperature);

        let reply = self.provider.complete(request).await?;
        self.conversation.push_assistant(reply.clone());
        Ok(reply)
    }

    /// Appends a user turn with the exact input text.
    ///
    /// Returns true when the input is the exit sentinel and the loop should
    /// terminate. Blank lines are ordinary content.
    pub fn submit_user(&mut self, line: &str) -> bool {
        self.conversation.push_user(line);
        line == EXIT_SENTINEL
    }

    /// Runs the conversation loop to completion.
    ///
    /// The assistant always speaks first: each iteration requests a
    /// completion for the full turn history, renders it, then blocks for a
    /// line of user input. The loop ends when the user types the sentinel,
    /// when the input stream closes, or when the shutdown flag is observed
    /// at a suspension point. A completion failure aborts the run; the
    /// caller decides how to report it.
    pub async fn run(
        &mut self,
        input: &mut dyn LineSource,
        renderer: &mut dyn Renderer,
        shutdown: Arc<AtomicBool>,
    ) -> Result<()> {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                return Ok(());
            }
            let reply = self.request_reply().await?;
            renderer.print_reply(self.persona_name(), &reply);

            if shutdown.load(Ordering::Relaxed) {
                return Ok(());
            }
            let Some(line) = input.read_line(INPUT_PROMPT)? else {
                return Ok(());
            };
            if self.submit_user(&line) {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::error::Error;
    use crate::persona::Persona;
    use crate::types::Role;

    struct ScriptedInput {
        lines: VecDeque<String>,
    }

    impl ScriptedInput {
        fn new(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl LineSource for ScriptedInput {
        fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
            Ok(self.lines.pop_front())
        }
    }

    struct FixedProvider {
        reply: String,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(&self, request: ChatRequest) -> Result<String> {
            assert!(!request.messages.is_empty());
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.reply.clone())
        }
    }

    struct FailingProvider;

    #[async_trait::async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _request: ChatRequest) -> Result<String> {
            Err(Error::connection("no route to completion service", None))
        }
    }

    #[derive(Default)]
    struct CapturingRenderer {
        replies: Vec<(String, String)>,
        errors: Vec<String>,
    }

    impl Renderer for CapturingRenderer {
        fn print_reply(&mut self, name: &str, text: &str) {
            self.replies.push((name.to_string(), text.to_string()));
        }

        fn print_info(&mut self, _info: &str) {}

        fn print_error(&mut self, error: &str) {
            self.errors.push(error.to_string());
        }
    }

    fn test_config() -> ChatConfig {
        ChatConfig::new().with_persona(Persona::new("Pavan", "persona prompt"))
    }

    fn no_shutdown() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[tokio::test]
    async fn scripted_conversation_ends_with_five_turns() {
        let mut session = ChatSession::new(FixedProvider::new("hello"), test_config());
        let mut input = ScriptedInput::new(&["hi", "exit"]);
        let mut renderer = CapturingRenderer::default();

        session
            .run(&mut input, &mut renderer, no_shutdown())
            .await
            .unwrap();

        let turns = session.conversation().turns();
        assert_eq!(turns.len(), 5);
        let roles: Vec<Role> = turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User
            ]
        );
        assert_eq!(turns[0].content, "persona prompt");
        assert_eq!(turns[2].content, "hi");
        assert_eq!(turns[4].content, "exit");
        assert_eq!(
            renderer.replies,
            vec![
                ("Pavan".to_string(), "hello".to_string()),
                ("Pavan".to_string(), "hello".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn near_sentinels_do_not_terminate() {
        let provider = FixedProvider::new("hello");
        let mut session = ChatSession::new(provider, test_config());
        let mut input = ScriptedInput::new(&["Exit", " exit", "exit ", "exit"]);
        let mut renderer = CapturingRenderer::default();

        session
            .run(&mut input, &mut renderer, no_shutdown())
            .await
            .unwrap();

        // One assistant + one user turn per iteration, four iterations.
        assert_eq!(session.conversation().len(), 9);
        assert_eq!(session.provider.calls.load(Ordering::Relaxed), 4);
        assert_eq!(session.conversation().last().content, "exit");
    }

    #[tokio::test]
    async fn assistant_saying_exit_does_not_terminate() {
        let mut session = ChatSession::new(FixedProvider::new("exit"), test_config());
        let mut input = ScriptedInput::new(&["keep going", "exit"]);
        let mut renderer = CapturingRenderer::default();

        session
            .run(&mut input, &mut renderer, no_shutdown())
            .await
            .unwrap();

        // Two full iterations despite every reply being "exit".
        assert_eq!(session.conversation().len(), 5);
    }

    #[tokio::test]
    async fn blank_input_is_a_valid_turn() {
        let mut session = ChatSession::new(FixedProvider::new("hello"), test_config());
        let mut input = ScriptedInput::new(&["", "exit"]);
        let mut renderer = CapturingRenderer::default();

        session
            .run(&mut input, &mut renderer, no_shutdown())
            .await
            .unwrap();

        let turns = session.conversation().turns();
        assert_eq!(turns[2].role, Role::User);
        assert_eq!(turns[2].content, "");
    }

    #[tokio::test]
    async fn provider_failure_leaves_only_system_turn() {
        let mut session = ChatSession::new(FailingProvider, test_config());
        let mut input = ScriptedInput::new(&["hi"]);
        let mut renderer = CapturingRenderer::default();

        let err = session
            .run(&mut input, &mut renderer, no_shutdown())
            .await
            .unwrap_err();

        assert!(err.is_connection());
        assert_eq!(session.conversation().len(), 1);
        assert!(renderer.replies.is_empty());
    }

    #[tokio::test]
    async fn closed_input_terminates_cleanly_after_one_reply() {
        let mut session = ChatSession::new(FixedProvider::new("hello"), test_config());
        let mut input = ScriptedInput::new(&[]);
        let mut renderer = CapturingRenderer::default();

        session
            .run(&mut input, &mut renderer, no_shutdown())
            .await
            .unwrap();

        assert_eq!(session.conversation().len(), 2);
        assert_eq!(renderer.replies.len(), 1);
    }

    #[tokio::test]
    async fn shutdown_flag_stops_before_any_request() {
        let provider = FixedProvider::new("hello");
        let mut session = ChatSession::new(provider, test_config());
        let mut input = ScriptedInput::new(&["hi"]);
        let mut renderer = CapturingRenderer::default();
        let shutdown = Arc::new(AtomicBool::new(true));

        session
            .run(&mut input, &mut renderer, shutdown)
            .await
            .unwrap();

        assert_eq!(session.provider.calls.load(Ordering::Relaxed), 0);
        assert_eq!(session.conversation().len(), 1);
    }

    #[tokio::test]
    async fn conversation_grows_by_two_per_iteration() {
        let mut session = ChatSession::new(FixedProvider::new("hello"), test_config());
        let mut renderer = CapturingRenderer::default();

        for i in 0..5 {
            assert_eq!(session.conversation().len(), 1 + 2 * i);
            let reply = session.request_reply().await.unwrap();
            renderer.print_reply(session.persona_name(), &reply);
            assert!(!session.submit_user("still here"));
        }
        assert_eq!(session.conversation().len(), 11);
    }

    #[tokio::test]
    async fn request_carries_model_and_temperature() {
        struct InspectingProvider;

        #[async_trait::async_trait]
        impl CompletionProvider for InspectingProvider {
            async fn complete(&self, request: ChatRequest) -> Result<String> {
                assert_eq!(request.model.to_string(), "gpt-3.5-turbo");
                assert_eq!(request.temperature, Some(0.2));
                assert_eq!(request.messages[0].role, Role::System);
                Ok("ok".to_string())
            }
        }

        let mut session = ChatSession::new(InspectingProvider, test_config());
        session.request_reply().await.unwrap();
    }
}
