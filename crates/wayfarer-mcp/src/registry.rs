//! Tool registration and dispatch.
//!
//! A [`ToolRegistry`] owns a group of related tools (human prompts, geo
//! lookups, trip planning). [`CompositeRegistry`] stacks several groups
//! behind one surface; both the MCP server and the agent dispatch through
//! it.

use rmcp::model::{CallToolResult, ErrorData, Tool};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by a tool invocation.
pub type ToolResult = Pin<Box<dyn Future<Output = Result<CallToolResult, ErrorData>> + Send>>;

/// A group of tools.
///
/// ```rust,ignore
/// impl ToolRegistry for WeatherTools {
///     fn tools(&self) -> Vec<Tool> {
///         vec![make_tool::<ForecastArgs>("forecast", "Weather forecast")]
///     }
///
///     fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
///         match name {
///             "forecast" => Some(Box::pin(forecast(self.client.clone(), args))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ToolRegistry: Send + Sync {
    /// Definitions of every tool in the group.
    fn tools(&self) -> Vec<Tool>;

    /// Starts a call; `None` when the name is not one of ours.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Number of tools in the group.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Whether `name` belongs to the group.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }

    /// Tool names, in listing order.
    fn tool_names(&self) -> Vec<String> {
        self.tools().into_iter().map(|t| t.name.to_string()).collect()
    }
}

/// Several registries behind one; the first that claims a name handles it.
#[derive(Default)]
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: ToolRegistry + 'static>(mut self, registry: R) -> Self {
        self.registries.push(Box::new(registry));
        self
    }

    /// Appends a group only when `enabled`.
    pub fn add_if<R: ToolRegistry + 'static>(self, enabled: bool, registry: R) -> Self {
        if enabled { self.add(registry) } else { self }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    /// Whether no group was added.
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<Tool> {
        self.registries.iter().flat_map(|r| r.tools()).collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        self.registries
            .iter()
            .find(|r| r.has_tool(name))
            .and_then(|r| r.call(name, args))
    }
}

impl<R: ToolRegistry + ?Sized> ToolRegistry for std::sync::Arc<R> {
    fn tools(&self) -> Vec<Tool> {
        (**self).tools()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        (**self).call(name, args)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tools::support::{NoArgs, make_tool, result_text, text_result};
    use serde_json::json;

    struct Echo {
        names: Vec<&'static str>,
        tag: &'static str,
    }

    impl ToolRegistry for Echo {
        fn tools(&self) -> Vec<Tool> {
            self.names
                .iter()
                .map(|n| make_tool::<NoArgs>(n, "echo"))
                .collect()
        }

        fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
            if !self.has_tool(name) {
                return None;
            }
            let reply = format!("{}:{name}", self.tag);
            Some(Box::pin(async move { Ok(text_result(reply)) }))
        }
    }

    fn echo(tag: &'static str, names: &[&'static str]) -> Echo {
        Echo {
            names: names.to_vec(),
            tag,
        }
    }

    #[test]
    fn test_counts_and_names() {
        let reg = echo("a", &["one", "two"]);
        assert_eq!(reg.tool_count(), 2);
        assert!(reg.has_tool("two"));
        assert!(!reg.has_tool("three"));
        assert_eq!(reg.tool_names(), ["one", "two"]);
    }

    #[test]
    fn test_empty_composite() {
        let composite = CompositeRegistry::new();
        assert!(composite.is_empty());
        assert_eq!(composite.tool_count(), 0);
        assert!(composite.call("anything", json!({})).is_none());
    }

    #[tokio::test]
    async fn test_composite_first_claim_wins() {
        let composite = CompositeRegistry::new()
            .add(echo("first", &["shared", "a"]))
            .add(echo("second", &["shared", "b"]));

        assert_eq!(composite.tool_count(), 4);
        let result = composite.call("shared", json!({})).unwrap().await.unwrap();
        assert_eq!(result_text(&result), "first:shared");

        let result = composite.call("b", json!({})).unwrap().await.unwrap();
        assert_eq!(result_text(&result), "second:b");
    }

    #[test]
    fn test_add_if() {
        let composite = CompositeRegistry::new()
            .add_if(true, echo("x", &["kept"]))
            .add_if(false, echo("y", &["dropped"]));
        assert_eq!(composite.len(), 1);
        assert!(composite.has_tool("kept"));
        assert!(!composite.has_tool("dropped"));
    }

    #[test]
    fn test_shared_registry() {
        let shared = std::sync::Arc::new(echo("s", &["t"]));
        assert!(shared.has_tool("t"));
    }

    #[test]
    fn test_trait_object_safety() {
        fn _assert_object_safe(_: &dyn ToolRegistry) {}
    }
}
