//! Tool system for function calling.

pub mod arguments;
pub mod executor;
pub mod tavily;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use executor::ToolSet;
pub use tavily::{TavilyClient, TavilySearchTool};
pub use tool::{Tool, ToolExecutionContext};
pub use types::AgentToolParameters;
