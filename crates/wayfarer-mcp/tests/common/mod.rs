//! Line-oriented JSON-RPC client for driving the server in tests.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};
use tokio::task::JoinHandle;
use wayfarer_core::ScriptedPrompt;
use wayfarer_geo::MockGeoBackend;
use wayfarer_mcp::tools::{GeoTools, HealthTools, HumanTools, TripTools};
use wayfarer_mcp::{CompositeRegistry, McpServer, ToolRegistry};

const PIPE_CAPACITY: usize = 256 * 1024;
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Registry like the binary's, over a mock backend and scripted answers.
pub fn registry(backend: MockGeoBackend, prompt: Arc<ScriptedPrompt>) -> CompositeRegistry {
    let backend = Arc::new(backend);
    let tools = CompositeRegistry::new()
        .add(HumanTools::new(prompt))
        .add(GeoTools::new(backend.clone()))
        .add(TripTools::new(backend));
    let total = tools.tool_count() + 1;
    tools.add(HealthTools::new("user-mcp", "0.1.0", total))
}

/// A running server and the client ends of its pipes.
pub struct ServerHarness {
    writer: DuplexStream,
    lines: Lines<BufReader<DuplexStream>>,
    next_id: u64,
    /// The server task.
    pub task: JoinHandle<wayfarer_mcp::Result<()>>,
    /// The prompt behind ask_user.
    pub prompt: Arc<ScriptedPrompt>,
    /// The initialize result.
    pub init: Value,
}

impl ServerHarness {
    /// Starts a server and completes the initialize handshake.
    pub async fn start(backend: MockGeoBackend, answers: &[&str]) -> Self {
        let prompt = Arc::new(ScriptedPrompt::new(answers.iter().copied()));
        let (client_out, server_in) = tokio::io::duplex(PIPE_CAPACITY);
        let (server_out, client_in) = tokio::io::duplex(PIPE_CAPACITY);

        let server = McpServer::new(registry(backend, prompt.clone())).with_name("user-mcp");
        let task = tokio::spawn(server.serve_io(server_in, server_out));

        let mut harness = Self {
            writer: client_out,
            lines: BufReader::new(client_in).lines(),
            next_id: 1,
            task,
            prompt,
            init: Value::Null,
        };
        harness.init = harness
            .request(
                "initialize",
                json!({
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": {"name": "wayfarer-tests", "version": "0.0.0"}
                }),
            )
            .await;
        harness
            .notify("notifications/initialized", json!({}))
            .await;
        harness
    }

    async fn send(&mut self, message: Value) {
        let mut line = serde_json::to_vec(&message).unwrap();
        line.push(b'\n');
        self.writer.write_all(&line).await.unwrap();
        self.writer.flush().await.unwrap();
    }

    /// Sends a notification.
    pub async fn notify(&mut self, method: &str, params: Value) {
        self.send(json!({"jsonrpc": "2.0", "method": method, "params": params}))
            .await;
    }

    /// Sends a request and returns the whole response object.
    pub async fn request(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        self.send(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
            .await;

        loop {
            let line = tokio::time::timeout(REPLY_TIMEOUT, self.lines.next_line())
                .await
                .expect("server reply timed out")
                .unwrap()
                .expect("server closed the pipe");
            let message: Value = serde_json::from_str(&line).unwrap();
            if message.get("id") == Some(&json!(id)) {
                return message;
            }
        }
    }

    /// Calls a tool and returns the response object.
    pub async fn call_tool(&mut self, name: &str, arguments: Value) -> Value {
        self.request("tools/call", json!({"name": name, "arguments": arguments}))
            .await
    }

    /// Calls a tool and decodes its JSON text content.
    pub async fn call_tool_json(&mut self, name: &str, arguments: Value) -> Value {
        let response = self.call_tool(name, arguments).await;
        serde_json::from_str(&tool_text(&response)).unwrap()
    }

    /// Closes the client side and waits for the server to stop.
    pub async fn shutdown(self) -> wayfarer_mcp::Result<()> {
        drop(self.writer);
        drop(self.lines);
        tokio::time::timeout(REPLY_TIMEOUT, self.task)
            .await
            .expect("server did not stop")
            .unwrap()
    }
}

/// Text content of a successful `tools/call` response.
pub fn tool_text(response: &Value) -> String {
    response["result"]["content"][0]["text"]
        .as_str()
        .unwrap_or_else(|| panic!("no text content in {response}"))
        .to_string()
}
