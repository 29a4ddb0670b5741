//! Progress events emitted while a turn runs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::{AgentToolCall, AgentToolResult, ModelMessage};

/// Something observable happened inside the conversation loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    /// About to call the model; `messages` is the transcript length sent.
    ModelRequest { round: usize, messages: usize },
    ToolCallStarted { call: AgentToolCall },
    ToolResult { result: AgentToolResult },
    AssistantMessage { message: ModelMessage },
    RoundLimitReached { rounds: usize },
}

/// Callback used for observing turn events.
pub type TurnEventSink = Arc<dyn Fn(TurnEvent) + Send + Sync>;
