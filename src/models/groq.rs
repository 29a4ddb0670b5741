//! Groq-hosted chat models.

use strum::{Display, EnumString};

/// Known Groq model ids; anything else parses to `Custom`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Display, EnumString)]
pub enum GroqModel {
    /// Reasoning model; answers start with a `<think>` block.
    #[default]
    #[strum(serialize = "deepseek-r1-distill-llama-70b")]
    DeepseekR1DistillLlama70b,
    #[strum(serialize = "llama-3.3-70b-versatile")]
    Llama3370bVersatile,
    #[strum(serialize = "llama-3.1-8b-instant")]
    Llama318bInstant,
    #[strum(default)]
    Custom(String),
}

impl GroqModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::DeepseekR1DistillLlama70b => "deepseek-r1-distill-llama-70b",
            Self::Llama3370bVersatile => "llama-3.3-70b-versatile",
            Self::Llama318bInstant => "llama-3.1-8b-instant",
            Self::Custom(s) => s,
        }
    }
}
