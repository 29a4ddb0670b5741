//! websage: a web-search chat agent.
//!
//! A hosted chat model (Groq by default) is given one tool, Tavily web
//! search. Each user turn runs the conversation loop: call the model,
//! and while the latest message requests tools, run them and call the
//! model again. Transcripts live in memory, one per session key.
//!
//! ```no_run
//! use websage::agent::{ChatAgent, SessionKey};
//! use websage::config::AppConfig;
//!
//! # async fn example() -> websage::error::Result<()> {
//! let config = AppConfig::load(None)?;
//! let agent = ChatAgent::from_config(&config)?;
//! let session = SessionKey::generate();
//! if let Some(reply) = agent.submit(&session, "What's the weather in Paris?").await? {
//!     println!("{}", reply.bubble.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod agent_loop;
pub mod config;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
