//! Chat-completion providers.
//!
//! [`LlmProvider`] is the seam between the agent loop and the model.
//! [`OpenAiProvider`] talks to any OpenAI-compatible endpoint,
//! [`MockLlmProvider`] replays scripted turns and [`RetryWrapper`] adds
//! backoff around another provider.

mod mock;
mod openai;
mod retry;
mod types;

pub use mock::MockLlmProvider;
pub use openai::OpenAiProvider;
pub use retry::RetryWrapper;
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, FunctionCall, FunctionSpec, Role, ToolCall, ToolSpec,
    Usage,
};

use async_trait::async_trait;
use wayfarer_core::Result;

/// A chat model that can call tools.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Runs one model turn.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Provider name for diagnostics.
    fn name(&self) -> &str;
}
