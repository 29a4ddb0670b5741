//! CLI entry point for websage.

pub mod repl;
pub mod server;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

/// websage: web-search chat agent
#[derive(Parser, Debug)]
#[command(name = "websage", version, about = "Chat with a model that can search the web")]
pub struct Cli {
    /// Settings file (TOML). Defaults to $WEBSAGE_CONFIG or the platform config dir.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive chat in the terminal
    Chat(ChatArgs),
    /// Serve the browser chat page
    Serve(ServeArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Model to use (format: provider:model, e.g., groq:deepseek-r1-distill-llama-70b)
    #[arg(short, long)]
    pub model: Option<String>,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Max tokens per model response
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Tool rounds allowed per turn
    #[arg(long)]
    pub max_tool_rounds: Option<usize>,

    /// Resume a named session instead of starting a fresh one
    #[arg(long)]
    pub session: Option<String>,
}

impl ChatArgs {
    /// Layer flags over file/env settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(ref model) = self.model {
            settings.model = model.clone();
        }
        if let Some(ref system) = self.system {
            settings.system_prompt = Some(system.clone());
        }
        if let Some(t) = self.temperature {
            settings.temperature = Some(t);
        }
        if let Some(max) = self.max_tokens {
            settings.max_tokens = Some(max);
        }
        if let Some(rounds) = self.max_tool_rounds {
            settings.max_tool_rounds = rounds;
        }
    }
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Listen address
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Model to use (format: provider:model)
    #[arg(short, long)]
    pub model: Option<String>,
}

impl ServeArgs {
    /// Layer flags over file/env settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
        if let Some(ref model) = self.model {
            settings.model = model.clone();
        }
    }
}
