//! Conversation loop: alternate model and tools until the router terminates.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::DEFAULT_MAX_TOOL_ROUNDS;
use crate::error::ChatError;
use crate::provider::{ModelProvider, ProviderRequest, ToolDefinition};
use crate::tools::ToolSet;
use crate::types::{AgentToolResult, GenerationSettings, ModelMessage, Role, Usage};

use super::events::{TurnEvent, TurnEventSink};
use super::router::{route, Route};

/// Per-loop knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopOptions {
    /// Tool rounds allowed per turn. A model response asking for one more
    /// round past this ends the turn with a notice instead.
    pub max_tool_rounds: usize,
    /// Prepended to every request; never stored in the transcript.
    pub system_prompt: Option<String>,
    pub settings: GenerationSettings,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
            system_prompt: None,
            settings: GenerationSettings::default(),
        }
    }
}

/// What one turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Messages appended by this turn, starting with the user message.
    pub messages: Vec<ModelMessage>,
    /// Number of model calls made.
    pub model_calls: usize,
    /// Number of tool rounds executed.
    pub tool_rounds: usize,
    pub usage: Usage,
    /// Set when the round limit cut the turn short.
    pub truncated: bool,
}

impl TurnOutcome {
    /// The assistant message that ended the turn.
    pub fn final_message(&self) -> Option<&ModelMessage> {
        self.messages.last().filter(|m| m.role == Role::Assistant)
    }

    /// Text of the final assistant message.
    pub fn final_text(&self) -> String {
        self.final_message().map(ModelMessage::text).unwrap_or_default()
    }
}

/// Drives one model provider and one tool set through user turns.
#[derive(Clone)]
pub struct ConversationLoop {
    provider: Arc<dyn ModelProvider>,
    tools: ToolSet,
    options: LoopOptions,
}

impl ConversationLoop {
    pub fn new(provider: Arc<dyn ModelProvider>, tools: ToolSet) -> Self {
        Self {
            provider,
            tools,
            options: LoopOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LoopOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LoopOptions {
        &self.options
    }

    pub fn provider(&self) -> &dyn ModelProvider {
        self.provider.as_ref()
    }

    pub fn tools(&self) -> &ToolSet {
        &self.tools
    }

    /// Run one user turn on top of `history`.
    ///
    /// `history` is never modified; the new messages come back in the
    /// outcome so the caller can commit them only when the turn succeeds.
    pub async fn run_turn(
        &self,
        history: &[ModelMessage],
        user: ModelMessage,
        sink: Option<&TurnEventSink>,
    ) -> Result<TurnOutcome, ChatError> {
        let emit = |event: TurnEvent| {
            if let Some(sink) = sink {
                sink(event);
            }
        };

        let tool_defs: Vec<ToolDefinition> = self.tools.definitions();
        let mut pending = vec![user];
        let mut outcome_usage = Usage::default();
        let mut model_calls = 0usize;
        let mut tool_rounds = 0usize;

        loop {
            let request = ProviderRequest {
                messages: self.request_messages(history, &pending),
                settings: self.options.settings.clone(),
                tools: tool_defs.clone(),
            };
            model_calls += 1;
            debug!(
                round = model_calls,
                messages = request.messages.len(),
                "conversation loop: calling model"
            );
            emit(TurnEvent::ModelRequest {
                round: model_calls,
                messages: request.messages.len(),
            });

            let response = self.provider.generate_text(&request).await?;
            outcome_usage.merge(&response.usage);
            let message = response.into_message();
            pending.push(message.clone());
            emit(TurnEvent::AssistantMessage {
                message: message.clone(),
            });

            if route(&message) == Route::Terminate {
                return Ok(TurnOutcome {
                    messages: pending,
                    model_calls,
                    tool_rounds,
                    usage: outcome_usage,
                    truncated: false,
                });
            }

            if tool_rounds >= self.options.max_tool_rounds {
                warn!(
                    rounds = tool_rounds,
                    "conversation loop: tool round limit reached"
                );
                emit(TurnEvent::RoundLimitReached {
                    rounds: tool_rounds,
                });
                // Every call still gets a result so the transcript stays well-formed.
                for call in message.tool_calls() {
                    pending.push(ModelMessage::from_tool_result(AgentToolResult {
                        tool_call_id: call.id.clone(),
                        result: serde_json::json!({"error": "tool round limit reached; call not executed"}),
                        is_error: true,
                    }));
                }
                let notice = round_limit_notice(tool_rounds, &pending);
                pending.push(notice);
                return Ok(TurnOutcome {
                    messages: pending,
                    model_calls,
                    tool_rounds,
                    usage: outcome_usage,
                    truncated: true,
                });
            }

            for call in message.tool_calls() {
                emit(TurnEvent::ToolCallStarted { call: call.clone() });
                let result = self.tools.execute(call).await;
                emit(TurnEvent::ToolResult {
                    result: result.clone(),
                });
                pending.push(ModelMessage::from_tool_result(result));
            }
            tool_rounds += 1;
        }
    }

    fn request_messages(&self, history: &[ModelMessage], pending: &[ModelMessage]) -> Vec<ModelMessage> {
        let mut messages = Vec::with_capacity(history.len() + pending.len() + 1);
        if let Some(ref prompt) = self.options.system_prompt {
            messages.push(ModelMessage::system(prompt.clone()));
        }
        messages.extend(history.iter().cloned());
        messages.extend(pending.iter().cloned());
        messages
    }
}

/// Assistant message closing a turn that ran out of tool rounds.
fn round_limit_notice(rounds: usize, turn: &[ModelMessage]) -> ModelMessage {
    let partial = turn
        .iter()
        .rev()
        .filter(|m| m.role == Role::Assistant)
        .map(ModelMessage::text)
        .find(|t| !t.trim().is_empty());
    let mut text = format!(
        "I stopped after {rounds} rounds of web searches without reaching a final answer."
    );
    if let Some(partial) = partial {
        text.push_str("\n\nPartial answer so far:\n");
        text.push_str(partial.trim());
    }
    ModelMessage::assistant(text)
}
