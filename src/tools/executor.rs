//! Tool executor: resolves tool calls against the registered tools.

use std::sync::Arc;

use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use crate::provider::ToolDefinition;
use crate::types::{AgentToolCall, AgentToolResult};

/// The set of tools declared to the model for a conversation.
#[derive(Clone, Default)]
pub struct ToolSet {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolSet {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Definitions sent with every model request.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Execute one tool call. Failures become error results for the model.
    pub async fn execute(&self, call: &AgentToolCall) -> AgentToolResult {
        let Some(tool) = self.get(&call.name) else {
            warn!(tool = %call.name, "Tool not found");
            return AgentToolResult {
                tool_call_id: call.id.clone(),
                result: serde_json::json!({"error": format!("Tool '{}' not found", call.name)}),
                is_error: true,
            };
        };

        let ctx = ToolExecutionContext {
            tool_call_id: call.id.clone(),
        };
        let args = ToolArguments::new(call.arguments.clone());
        debug!(tool = %call.name, call_id = %call.id, "executing tool");
        match tool.execute(&args, &ctx).await {
            Ok(result) => AgentToolResult {
                tool_call_id: call.id.clone(),
                result,
                is_error: false,
            },
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                AgentToolResult {
                    tool_call_id: call.id.clone(),
                    result: serde_json::json!({"error": e.to_string()}),
                    is_error: true,
                }
            }
        }
    }
}

impl std::fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name()))
            .finish()
    }
}
