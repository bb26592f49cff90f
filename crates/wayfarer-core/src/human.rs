//! Asking the human a clarifying question.
//!
//! Both the MCP `ask_user` tool and the agent's `ask_human` tool go through
//! [`HumanPrompt`]. The rendering and answer normalization live here so the
//! two surfaces behave the same way.
//!
//! # Terminals
//!
//! The CLI reads answers from stdin. The stdio MCP server cannot: its stdin
//! and stdout carry JSON-RPC frames, so it talks to the controlling terminal
//! (`/dev/tty`) instead. See [`LinePrompt::stdio`] and [`LinePrompt::tty`].

use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Write};
use std::sync::{Arc, Mutex};

/// Answer returned when a required question gets an empty reply.
pub const NO_ANSWER: &str = "[no answer provided]";

/// Banner printed above questions from the MCP `ask_user` tool.
pub const BANNER: &str = "=== USER CLARIFICATION NEEDED ===";

/// Banner printed above questions from the agent.
pub const AGENT_BANNER: &str = "=== CLARIFICATION NEEDED ===";

/// A clarifying question for the human.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub question: String,
    /// Optional list of choices; the human may answer with a 1-based number.
    #[serde(default)]
    pub options: Option<Vec<String>>,
    /// Whether an empty answer is replaced by [`NO_ANSWER`].
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl Question {
    /// Creates a required free-text question.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            options: None,
            required: true,
        }
    }

    /// Adds choices.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Sets whether an answer is required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Renders a question under [`BANNER`].
pub fn render(question: &Question) -> String {
    render_with_banner(BANNER, question)
}

/// Renders a question as shown on the terminal.
pub fn render_with_banner(banner: &str, question: &Question) -> String {
    let mut out = format!("\n{banner}\n{}\n", question.question);
    if let Some(options) = &question.options {
        for (i, opt) in options.iter().enumerate() {
            out.push_str(&format!("  {}. {opt}\n", i + 1));
        }
    }
    out.push_str("(Type your answer and press Enter)\n> ");
    out
}

/// Normalizes a raw reply: trims it, maps option numbers to option text and
/// substitutes [`NO_ANSWER`] for empty required answers.
pub fn normalize_answer(question: &Question, raw: &str) -> String {
    let mut answer = raw.trim().to_string();

    if let Some(options) = &question.options {
        if let Ok(n) = answer.parse::<usize>() {
            if (1..=options.len()).contains(&n) {
                answer = options[n - 1].clone();
            }
        }
    }

    if question.required && answer.is_empty() {
        return NO_ANSWER.to_string();
    }
    answer
}

/// Something that can put a question to a human and wait for the reply.
#[async_trait]
pub trait HumanPrompt: Send + Sync {
    /// Ask and return the normalized answer.
    async fn ask(&self, question: &Question) -> Result<String>;
}

type SharedReader = Arc<Mutex<Box<dyn BufRead + Send>>>;
type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Line-oriented prompt over a reader/writer pair.
///
/// Reads happen on tokio's blocking pool so a human thinking for minutes
/// never stalls the runtime.
#[derive(Clone)]
pub struct LinePrompt {
    reader: SharedReader,
    writer: SharedWriter,
    banner: String,
}

impl LinePrompt {
    /// Creates a prompt over arbitrary streams.
    pub fn new<R, W>(reader: R, writer: W) -> Self
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            reader: Arc::new(Mutex::new(Box::new(reader))),
            writer: Arc::new(Mutex::new(Box::new(writer))),
            banner: BANNER.to_string(),
        }
    }

    /// Replaces the banner shown above each question.
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Prompt on the process's stdout/stdin.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }

    /// Prompt on the controlling terminal.
    ///
    /// # Errors
    ///
    /// Fails when the process has no controlling terminal.
    pub fn tty() -> Result<Self> {
        let open = || {
            std::fs::OpenOptions::new()
                .read(true)
                .write(true)
                .open("/dev/tty")
        };
        let input = open().map_err(|e| Error::prompt(format!("cannot open /dev/tty: {e}")))?;
        let output = open().map_err(|e| Error::prompt(format!("cannot open /dev/tty: {e}")))?;
        Ok(Self::new(BufReader::new(input), output))
    }
}

impl std::fmt::Debug for LinePrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinePrompt")
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}

impl LinePrompt {
    /// Writes `prompt` and reads one line; `None` at end of input.
    ///
    /// Shares the reader with [`HumanPrompt::ask`], so a REPL and the
    /// question tool can take turns on the same stream.
    pub async fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        let reader = Arc::clone(&self.reader);
        let writer = Arc::clone(&self.writer);
        let prompt = prompt.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<String>> {
            {
                let mut out = writer
                    .lock()
                    .map_err(|_| Error::prompt("prompt writer lock poisoned"))?;
                out.write_all(prompt.as_bytes())?;
                out.flush()?;
            }
            let mut line = String::new();
            let read = reader
                .lock()
                .map_err(|_| Error::prompt("prompt reader lock poisoned"))?
                .read_line(&mut line)?;
            Ok((read > 0).then_some(line))
        })
        .await
        .map_err(|e| Error::prompt(format!("prompt task failed: {e}")))?
    }
}

#[async_trait]
impl HumanPrompt for LinePrompt {
    async fn ask(&self, question: &Question) -> Result<String> {
        let raw = self
            .read_line(&render_with_banner(&self.banner, question))
            .await?
            .unwrap_or_default();
        tracing::debug!(question = %question.question, "human answered");
        Ok(normalize_answer(question, &raw))
    }
}

/// Prompt that replies from a fixed script.
///
/// When the script runs dry every further question gets an empty reply
/// (normalized like any other answer).
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<Question>>,
}

impl ScriptedPrompt {
    /// Creates a scripted prompt.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order.
    pub fn asked(&self) -> Vec<Question> {
        self.asked.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HumanPrompt for ScriptedPrompt {
    async fn ask(&self, question: &Question) -> Result<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(question.clone());
        }
        let raw = self
            .answers
            .lock()
            .map_err(|_| Error::prompt("scripted answers lock poisoned"))?
            .pop_front()
            .unwrap_or_default();
        Ok(normalize_answer(question, &raw))
    }
}
