//! Which hosted model answers the chat, and how `provider:model` strings map to it.

pub mod selector;

#[cfg(feature = "groq")]
pub mod groq;
#[cfg(feature = "openai-compatible")]
pub mod openai_compatible;

pub use selector::ModelSelector;

use std::fmt;

/// Model used when neither settings nor flags name one.
pub const DEFAULT_MODEL: &str = "groq:deepseek-r1-distill-llama-70b";

/// A chat model plus the backend that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageModel {
    #[cfg(feature = "groq")]
    Groq(groq::GroqModel),
    #[cfg(feature = "openai-compatible")]
    OpenAiCompatible(openai_compatible::OpenAiCompatibleModel),
    /// Parsed but not servable; `create_provider` rejects it.
    Custom { provider: String, model_id: String },
}

impl LanguageModel {
    /// Id sent as `model` in the request body.
    pub fn model_id(&self) -> &str {
        match self {
            #[cfg(feature = "groq")]
            Self::Groq(m) => m.as_str(),
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(m) => m.model_id.as_str(),
            Self::Custom { model_id, .. } => model_id,
        }
    }

    pub fn provider_name(&self) -> &str {
        match self {
            #[cfg(feature = "groq")]
            Self::Groq(_) => "groq",
            #[cfg(feature = "openai-compatible")]
            Self::OpenAiCompatible(_) => "openai-compatible",
            Self::Custom { provider, .. } => provider,
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider_name(), self.model_id())
    }
}
