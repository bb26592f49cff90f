//! The tool-calling loop.
//!
//! Each turn the model either calls tools, whose results are appended to
//! the conversation, or answers in text. A text answer that reads like a
//! question goes to the human and the loop continues with their reply.

use crate::llm::{
    ChatMessage, ChatRequest, LlmProvider, OpenAiProvider, RetryWrapper, ToolCall, ToolSpec,
};
use serde_json::{Value, json};
use std::sync::Arc;
use wayfarer_core::{HumanPrompt, Question, Result, WayfarerConfig};
use wayfarer_geo::{GeoBackend, NearbyResponse, OsmBackend};
use wayfarer_mcp::tools::{ASK_HUMAN_TOOL, GeoTools, HumanTools, TripTools};
use wayfarer_mcp::{CompositeRegistry, ToolRegistry, result_text};

/// Model turns allowed per request.
pub const DEFAULT_MAX_STEPS: usize = 8;

/// Reply when the model runs out of turns.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't complete the request in time. Please try again with a bit more detail.";

/// Instructions for the model.
pub const SYSTEM_PROMPT: &str = "You are Wayfarer, a tool-first travel concierge.\n\
- Prefer tools over guessing: use nominatim_search to find places, \
osrm_walking_time for walking times, nearby_search_with_walk for places near a point \
with travel times, wikipedia_summary for background and plan_trip for multi-day \
itineraries.\n\
- Whenever a detail is missing or the request is ambiguous (place, dates, budget, \
pace), ALWAYS call ask_human with a short question and, when useful, a few options. \
Never ask the user in plain text.\n\
- Keep answers concise, use Markdown lists, and include distances, times and map \
links that tools return.";

const NEARBY_TOOL: &str = "nearby_search_with_walk";

const QUESTION_OPENERS: [&str; 7] = [
    "what ", "which ", "where ", "when ", "how ", "do you ", "are you ",
];

/// Whether a model reply asks the user something.
pub fn looks_like_question(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    lower.contains('?') || QUESTION_OPENERS.iter().any(|w| lower.starts_with(w))
}

fn error_content(message: impl std::fmt::Display) -> String {
    json!({ "error": message.to_string() }).to_string()
}

/// Travel concierge driving a chat model and the Wayfarer tools.
pub struct Agent {
    llm: Arc<dyn LlmProvider>,
    tools: CompositeRegistry,
    specs: Vec<ToolSpec>,
    human: Arc<dyn HumanPrompt>,
    max_steps: usize,
    temperature: f32,
    model: Option<String>,
}

impl Agent {
    /// Agent with `ask_human`, the geo tools and `plan_trip`.
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        backend: Arc<dyn GeoBackend>,
        human: Arc<dyn HumanPrompt>,
    ) -> Self {
        let tools = CompositeRegistry::new()
            .add(HumanTools::named(Arc::clone(&human), ASK_HUMAN_TOOL))
            .add(GeoTools::new(Arc::clone(&backend)))
            .add(TripTools::new(backend));
        let specs = tools.tools().iter().map(ToolSpec::from).collect();
        Self {
            llm,
            tools,
            specs,
            human,
            max_steps: DEFAULT_MAX_STEPS,
            temperature: wayfarer_core::config::DEFAULT_TEMPERATURE,
            model: None,
        }
    }

    /// Agent over the OpenStreetMap services and the configured OpenAI
    /// endpoint, with retries.
    pub fn from_config(config: &WayfarerConfig, human: Arc<dyn HumanPrompt>) -> Result<Self> {
        let provider = OpenAiProvider::from_config(&config.agent)?;
        let llm = RetryWrapper::new(Arc::new(provider)).with_max_retries(config.agent.max_retries);
        let backend = OsmBackend::new(&config.geo)?;
        Ok(Self::new(Arc::new(llm), Arc::new(backend), human)
            .with_max_steps(config.agent.max_steps)
            .with_temperature(config.agent.temperature)
            .with_model(&config.agent.model))
    }

    /// Sets the turn limit.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the model sent with every request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Tools offered to the model.
    pub fn tool_specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    /// Answers one user request.
    pub async fn run(&self, prompt: &str) -> Result<String> {
        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        for step in 1..=self.max_steps {
            let mut request = ChatRequest::new(messages.clone())
                .with_tools(self.specs.clone())
                .with_temperature(self.temperature);
            if let Some(model) = &self.model {
                request = request.with_model(model);
            }

            let reply = self.llm.chat(request).await?.message;
            tracing::debug!(step, tool_calls = reply.tool_calls.len(), "model turn");

            if !reply.tool_calls.is_empty() {
                let calls = reply.tool_calls.clone();
                messages.push(reply);
                let mut outputs = Vec::with_capacity(calls.len());
                for call in &calls {
                    let output = self.run_tool(call).await;
                    messages.push(ChatMessage::tool_result(call, output.clone()));
                    outputs.push(output);
                }
                if let ([call], [output]) = (calls.as_slice(), outputs.as_slice())
                    && call.name() == NEARBY_TOOL
                    && let Ok(nearby) = serde_json::from_str::<NearbyResponse>(output)
                {
                    return Ok(nearby.summary_markdown());
                }
                continue;
            }

            let text = reply.text_content().to_string();
            if looks_like_question(&text) {
                tracing::debug!(step, question = %text, "model asked in plain text");
                let answer = self.human.ask(&Question::new(text.clone())).await?;
                messages.push(ChatMessage::assistant(text));
                messages.push(ChatMessage::user(answer));
                continue;
            }
            return Ok(text);
        }

        tracing::warn!(max_steps = self.max_steps, "agent ran out of steps");
        Ok(FALLBACK_REPLY.to_string())
    }

    /// Runs one tool call; failures become `{"error": ...}` content.
    async fn run_tool(&self, call: &ToolCall) -> String {
        let name = call.name();
        let raw = call.function.arguments.trim();
        let args = if raw.is_empty() {
            Value::Object(Default::default())
        } else {
            match serde_json::from_str::<Value>(raw) {
                Ok(args) => args,
                Err(e) => {
                    tracing::warn!(tool = name, error = %e, "unparseable tool arguments");
                    return error_content(format!("invalid arguments for {name}: {e}"));
                }
            }
        };

        let Some(pending) = self.tools.call(name, args) else {
            tracing::warn!(tool = name, "model called an unknown tool");
            return error_content(format!("unknown tool: {name}"));
        };
        tracing::debug!(tool = name, "tool call");
        match pending.await {
            Ok(result) => result_text(&result),
            Err(e) => {
                tracing::warn!(tool = name, error = %e.message, "tool call failed");
                error_content(e.message)
            }
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("llm", &self.llm.name())
            .field("tools", &self.specs.len())
            .field("max_steps", &self.max_steps)
            .finish_non_exhaustive()
    }
}
