//! The `chat`, `run` and `save` subcommands.

use std::io::Write;
use std::path::Path;
use wayfarer_agent::Agent;
use wayfarer_core::{LinePrompt, Result};

/// Prompt used by `run` when none is given.
pub const DEFAULT_RUN_PROMPT: &str =
    "Plan a 1-day walk in central Algiers with 3 sights and coffee stops.";

/// Prompt used by `save` when none is given.
pub const DEFAULT_SAVE_PROMPT: &str =
    "Use nearby_search_with_walk to find 3 cafes near 36.7529, 3.0420 and include walking time.";

/// Greeting printed when `chat` starts.
pub const CHAT_BANNER: &str = "Travel Agent chat (type 'exit' to quit).";

/// Joins prompt words, falling back to `default` when there are none.
pub fn prompt_or(words: &[String], default: &str) -> String {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        default.to_string()
    } else {
        joined
    }
}

/// Markdown document for a saved reply.
pub fn results_markdown(reply: &str) -> String {
    format!("# Results\n\n{reply}\n")
}

/// `results_<unix-seconds>.md`
pub fn default_results_file(unix_seconds: i64) -> String {
    format!("results_{unix_seconds}.md")
}

/// Runs one prompt and writes the reply to `out`.
pub async fn run(agent: &Agent, prompt: &str, out: &mut impl Write) -> Result<()> {
    let reply = agent.run(prompt).await?;
    writeln!(out, "{reply}")?;
    Ok(())
}

/// Runs one prompt and saves the reply as Markdown at `path`.
pub async fn save(agent: &Agent, prompt: &str, path: &Path, out: &mut impl Write) -> Result<()> {
    let reply = agent.run(prompt).await?;
    std::fs::write(path, results_markdown(&reply))?;
    tracing::info!(path = %path.display(), "saved results");
    writeln!(out, "Saved: {}", path.display())?;
    Ok(())
}

/// Interactive loop: reads lines from `console` until `exit`, `quit` or
/// end of input. Agent failures are reported and the loop goes on.
pub async fn chat(agent: &Agent, console: &LinePrompt, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{CHAT_BANNER}")?;
    loop {
        out.flush()?;
        let Some(line) = console.read_line("\nYou: ").await? else {
            writeln!(out, "\nBye!")?;
            return Ok(());
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message.to_lowercase().as_str(), "exit" | "quit") {
            writeln!(out, "Bye!")?;
            return Ok(());
        }
        match agent.run(message).await {
            Ok(reply) => writeln!(out, "\nAgent:\n{reply}")?,
            Err(e) => {
                tracing::warn!(error = %e, "agent request failed");
                writeln!(out, "\nError: {e}")?;
            }
        }
    }
}
