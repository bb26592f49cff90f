//! Clarifying questions for the human operator.

use super::support::{make_tool, parse_args, text_result};
use crate::error::McpErrorExt;
use crate::registry::{ToolRegistry, ToolResult};
use rmcp::model::Tool;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use wayfarer_core::{HumanPrompt, Question};

/// Name the MCP server registers the tool under.
pub const ASK_USER_TOOL: &str = "ask_user";

/// Name the agent registers the tool under.
pub const ASK_HUMAN_TOOL: &str = "ask_human";

fn default_required() -> bool {
    true
}

/// Arguments of the question tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AskArgs {
    /// The question to ask the user
    pub question: String,
    /// Optional answer choices; the user may reply with a choice number
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Whether an empty reply should be reported as missing
    #[serde(default = "default_required")]
    pub required: bool,
}

impl From<AskArgs> for Question {
    fn from(args: AskArgs) -> Self {
        Question {
            question: args.question,
            options: args.options,
            required: args.required,
        }
    }
}

/// Registry holding the question tool; replies are plain text.
#[derive(Clone)]
pub struct HumanTools {
    prompt: Arc<dyn HumanPrompt>,
    name: String,
}

impl HumanTools {
    /// Question tool named [`ASK_USER_TOOL`].
    pub fn new(prompt: Arc<dyn HumanPrompt>) -> Self {
        Self::named(prompt, ASK_USER_TOOL)
    }

    /// Question tool under a custom name.
    pub fn named(prompt: Arc<dyn HumanPrompt>, name: impl Into<String>) -> Self {
        Self {
            prompt,
            name: name.into(),
        }
    }
}

impl std::fmt::Debug for HumanTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HumanTools")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ToolRegistry for HumanTools {
    fn tools(&self) -> Vec<Tool> {
        vec![make_tool::<AskArgs>(
            &self.name,
            "Ask the human user a clarifying question and wait for the reply. \
             Use it when the request is ambiguous or a detail (place, date, \
             budget) is missing.",
        )]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        if name != self.name {
            return None;
        }
        let prompt = Arc::clone(&self.prompt);
        let tool = self.name.clone();
        Some(Box::pin(async move {
            let question: Question = parse_args::<AskArgs>(&tool, args)?.into();
            tracing::info!(tool = %tool, question = %question.question, "asking the human");
            let answer = prompt.ask(&question).await.map_err(|e| e.to_mcp_error())?;
            Ok(text_result(answer))
        }))
    }
}
