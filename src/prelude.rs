//! Convenience re-exports for common use.

pub use crate::agent::{ChatAgent, ChatBubble, SessionKey, SessionStore, Transcript};
pub use crate::agent_loop::{route, ConversationLoop, LoopOptions, Route, TurnOutcome};
pub use crate::config::AppConfig;
pub use crate::error::{ChatError, Result};
pub use crate::models::LanguageModel;
pub use crate::provider::ModelProvider;
pub use crate::tools::{AgentToolParameters, Tool, ToolArguments, ToolSet};
pub use crate::types::{AgentToolCall, ModelMessage, Role, Usage};
