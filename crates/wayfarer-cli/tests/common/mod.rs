//! Agents over scripted models for CLI tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::io::Cursor;
use std::sync::Arc;
use wayfarer_agent::{Agent, ChatMessage, MockLlmProvider};
use wayfarer_core::{HumanPrompt, LinePrompt, ScriptedPrompt};
use wayfarer_geo::MockGeoBackend;

/// Agent whose model replays `turns` and whose questions go to `human`.
pub fn agent_with(turns: Vec<ChatMessage>, human: Arc<dyn HumanPrompt>) -> Agent {
    Agent::new(
        Arc::new(MockLlmProvider::new(turns)),
        Arc::new(MockGeoBackend::new()),
        human,
    )
}

/// Agent that always answers `text`.
pub fn echo_agent(text: &str) -> Agent {
    agent_with(
        vec![ChatMessage::assistant(text)],
        Arc::new(ScriptedPrompt::default()),
    )
}

/// Console reading the given input and discarding prompts.
pub fn console(input: &str) -> Arc<LinePrompt> {
    Arc::new(LinePrompt::new(
        Cursor::new(input.to_string()),
        std::io::sink(),
    ))
}
