//! Turn router: decides whether a turn loops back through the tools.

use crate::types::ModelMessage;

/// Control signal produced after every model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The message requested tools; run them and call the model again.
    ContinueWithTools,
    /// The message is a final answer; the turn is over.
    Terminate,
}

/// Route on the most recently appended message.
///
/// An empty tool-call list is treated exactly like an absent one.
pub fn route(message: &ModelMessage) -> Route {
    if message.has_tool_calls() {
        Route::ContinueWithTools
    } else {
        Route::Terminate
    }
}

/// Route on the last message of a transcript. An empty transcript terminates.
pub fn route_transcript(messages: &[ModelMessage]) -> Route {
    messages.last().map(route).unwrap_or(Route::Terminate)
}
