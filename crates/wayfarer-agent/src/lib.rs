//! Wayfarer Agent: a tool-calling travel concierge.
//!
//! Depends on `wayfarer-core`, `wayfarer-geo` and `wayfarer-mcp`
//! (dependency level 3).
//!
//! # Modules
//!
//! - [`llm`]: Chat types, the [`LlmProvider`] trait, the OpenAI client, a
//!   scripted mock and a retry wrapper
//! - [`agent`]: The [`Agent`] loop that alternates model turns and tool calls

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agent;
pub mod llm;

pub use agent::{Agent, DEFAULT_MAX_STEPS, FALLBACK_REPLY, SYSTEM_PROMPT, looks_like_question};
pub use llm::{
    ChatMessage, ChatRequest, ChatResponse, LlmProvider, MockLlmProvider, OpenAiProvider,
    RetryWrapper, Role, ToolCall, ToolSpec, Usage,
};
