//! The interactive chat session.

use std::sync::Arc;

use tracing::{debug, error};

use synapse_adapters::traits::Generator;
use synapse_primitives::{ChatMessage, EquipmentData};
use synapse_prompts::PromptComposer;

/// Greeting posted once the startup data load succeeds.
pub const READY_GREETING: &str = "Ready! Describe the experiment you want to plan.";

/// One gated conversation over a loaded pair of equipment datasets.
///
/// Constructing a session requires [`EquipmentData`], so a session cannot
/// exist before both datasets are loaded. One request is in flight at a
/// time: [`ChatSession::submit`] is awaited to completion before the next
/// description is accepted.
pub struct ChatSession {
    composer: PromptComposer,
    data: EquipmentData,
    generator: Arc<dyn Generator>,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    /// Creates a session over loaded data and a generation backend.
    #[must_use]
    pub fn new(data: EquipmentData, generator: Arc<dyn Generator>) -> Self {
        Self {
            composer: PromptComposer::new(),
            data,
            generator,
            transcript: Vec::new(),
        }
    }

    /// Replaces the prompt composer.
    #[must_use]
    pub fn with_composer(mut self, composer: PromptComposer) -> Self {
        self.composer = composer;
        self
    }

    /// The greeting entry shown when the session becomes ready.
    #[must_use]
    pub fn greeting() -> ChatMessage {
        ChatMessage::assistant(READY_GREETING)
    }

    /// Returns the conversation so far.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Runs one turn: compose, send, interpret, log.
    ///
    /// Blank descriptions are ignored. Any per-request failure is converted
    /// to a system entry in the transcript; the session stays usable for
    /// the next attempt. Returns the entries this turn appended.
    pub async fn submit(&mut self, description: &str) -> &[ChatMessage] {
        let description = description.trim();
        if description.is_empty() {
            return &[];
        }

        let start = self.transcript.len();
        self.transcript.push(ChatMessage::human(description));

        let reply = match self.composer.compose(&self.data, description) {
            Ok(prompt) => {
                debug!(prompt_len = prompt.len(), "prompt composed");
                match self.generator.generate(&prompt).await {
                    Ok(text) => ChatMessage::assistant(text),
                    Err(err) => {
                        error!(error = %err, "generation request failed");
                        ChatMessage::system(format!("Error: {err}"))
                    }
                }
            }
            Err(err) => ChatMessage::system(format!("Error: {err}")),
        };

        self.transcript.push(reply);
        &self.transcript[start..]
    }
}
