//! OpenAI-compatible chat completions client.

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, ToolSpec, Usage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wayfarer_core::{AgentConfig, Error, Result};

const SERVICE: &str = "openai";
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSpec]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    temperature: f32,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: ChatMessage,
}

/// Client for `POST {base_url}/chat/completions`.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    /// Provider for the public OpenAI API.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::http_with_source("failed to build HTTP client", e))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: AgentConfig::default().base_url,
            model: model.into(),
        })
    }

    /// Provider from agent settings; the API key is required.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::config("OPENAI_API_KEY is not set (env or [agent].api_key)"));
        }
        Ok(Self::new(&config.api_key, &config.model)?.with_base_url(&config.base_url))
    }

    /// Points the client at another compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Default model.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = WireRequest {
            model: request.model.as_deref().unwrap_or(&self.model),
            messages: &request.messages,
            tools: (!request.tools.is_empty()).then_some(request.tools.as_slice()),
            tool_choice: (!request.tools.is_empty()).then_some("auto"),
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout {
                        seconds: REQUEST_TIMEOUT_SECS,
                    }
                } else {
                    Error::llm_with_source("chat completion request failed", e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "chat completion rejected");
            return Err(Error::upstream(SERVICE, status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::llm_with_source("failed to read chat completion", e))?;
        let wire: WireResponse = serde_json::from_str(&text)?;
        let usage = wire.usage.unwrap_or_default();
        let message = wire
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| Error::llm("chat completion had no choices"))?;

        tracing::debug!(
            tokens = usage.total(),
            tool_calls = message.tool_calls.len(),
            "chat completion"
        );
        Ok(ChatResponse { message, usage })
    }

    fn name(&self) -> &str {
        SERVICE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_requires_key() {
        let err = OpenAiProvider::from_config(&AgentConfig::default()).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_endpoint_joins_base() {
        let config = AgentConfig {
            api_key: "sk-test".to_string(),
            base_url: "http://localhost:1234/v1/".to_string(),
            ..AgentConfig::default()
        };
        let provider = OpenAiProvider::from_config(&config).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:1234/v1/chat/completions");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_debug_hides_key() {
        let provider = OpenAiProvider::new("sk-secret", "m").unwrap();
        assert!(!format!("{provider:?}").contains("sk-secret"));
    }

    #[test]
    fn test_wire_request_omits_empty_tools() {
        let messages = [ChatMessage::user("hi")];
        let body = WireRequest {
            model: "m",
            messages: &messages,
            tools: None,
            tool_choice: None,
            temperature: 0.2,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
        assert_eq!(value["messages"][0]["content"], "hi");
    }
}
