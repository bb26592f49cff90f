//! Shared setup for the agent integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use serde_json::Value;
use std::sync::Arc;
use wayfarer_agent::{Agent, ChatMessage, MockLlmProvider, ToolCall};
use wayfarer_core::ScriptedPrompt;
use wayfarer_geo::{MockGeoBackend, Place};

/// An agent over a scripted model, a mock backend and scripted answers.
pub struct TestHarness {
    /// Scripted model
    pub llm: Arc<MockLlmProvider>,
    /// Mock geo backend
    pub backend: Arc<MockGeoBackend>,
    /// Scripted human
    pub human: Arc<ScriptedPrompt>,
    /// Agent under test
    pub agent: Agent,
}

impl TestHarness {
    /// Harness with the given model turns and human answers.
    pub fn new(turns: Vec<ChatMessage>, answers: &[&str]) -> Self {
        Self::with_backend(turns, answers, MockGeoBackend::new())
    }

    /// Harness with a prepared backend.
    pub fn with_backend(
        turns: Vec<ChatMessage>,
        answers: &[&str],
        backend: MockGeoBackend,
    ) -> Self {
        let llm = Arc::new(MockLlmProvider::new(turns));
        let backend = Arc::new(backend);
        let human = Arc::new(ScriptedPrompt::new(answers.iter().copied()));
        let agent = Agent::new(llm.clone(), backend.clone(), human.clone());
        Self {
            llm,
            backend,
            human,
            agent,
        }
    }

    /// Tool messages sent to the model on the given turn (0-based).
    pub fn tool_outputs(&self, turn: usize) -> Vec<String> {
        self.llm.requests()[turn]
            .messages
            .iter()
            .filter(|m| m.tool_call_id.is_some())
            .filter_map(|m| m.content.clone())
            .collect()
    }
}

/// An assistant turn calling one tool.
pub fn call(id: &str, name: &str, args: Value) -> ChatMessage {
    ChatMessage::tool_calls(vec![ToolCall::new(id, name, &args)])
}

/// Cafés around central Algiers.
pub fn cafes() -> Vec<Place> {
    vec![
        Place::new("Café Tantonville", 36.7755, 3.0597),
        Place::new("Milk Bar", 36.7763, 3.0590),
        Place::new("Café El Bahdja", 36.7700, 3.0550),
        Place::new("Café Malakoff", 36.7860, 3.0630),
    ]
}
