//! Scripted provider for tests and offline runs.

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider};
use async_trait::async_trait;
use std::sync::Mutex;
use wayfarer_core::{Error, Result};

/// Replays assistant turns in order, repeating the last one when the
/// script runs out. Every request is recorded.
#[derive(Debug, Default)]
pub struct MockLlmProvider {
    turns: Vec<ChatMessage>,
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    next: usize,
    requests: Vec<ChatRequest>,
}

impl MockLlmProvider {
    /// Provider replaying `turns`.
    pub fn new(turns: Vec<ChatMessage>) -> Self {
        Self {
            turns,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Provider that always answers with `text`.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage::assistant(text)])
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.state
            .lock()
            .map(|s| s.requests.clone())
            .unwrap_or_default()
    }

    /// Number of turns served.
    pub fn call_count(&self) -> usize {
        self.state.lock().map(|s| s.requests.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| Error::llm("mock provider state poisoned"))?;
        state.requests.push(request);

        let index = state.next.min(self.turns.len().saturating_sub(1));
        let turn = self
            .turns
            .get(index)
            .cloned()
            .ok_or_else(|| Error::llm("mock provider has no scripted turns"))?;
        state.next += 1;
        Ok(ChatResponse::new(turn))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
