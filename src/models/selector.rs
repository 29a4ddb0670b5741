//! Model selection and parsing.

use std::str::FromStr;

use super::LanguageModel;
use crate::error::ChatError;

/// Parses "provider:model" strings into a [`LanguageModel`].
pub struct ModelSelector;

impl ModelSelector {
    /// Parse "provider:model_id" into a LanguageModel.
    ///
    /// A bare model id (no provider prefix) is resolved against Groq.
    ///
    /// Examples: "groq:deepseek-r1-distill-llama-70b", "llama-3.3-70b-versatile"
    pub fn parse(s: &str) -> Result<LanguageModel, ChatError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChatError::InvalidArgument(
                "Invalid model selector: empty string".into(),
            ));
        }

        let (provider, model_id) = match s.split_once(':') {
            Some((provider, model_id)) => (provider, model_id),
            None => ("groq", s),
        };
        if model_id.is_empty() {
            return Err(ChatError::InvalidArgument(format!(
                "Invalid model selector '{s}': missing model id"
            )));
        }

        match provider {
            #[cfg(feature = "groq")]
            "groq" => {
                use super::groq::GroqModel;
                let m = GroqModel::from_str(model_id)
                    .unwrap_or(GroqModel::Custom(model_id.to_string()));
                Ok(LanguageModel::Groq(m))
            }
            #[cfg(feature = "openai-compatible")]
            "openai-compatible" | "openai_compatible" => {
                use super::openai_compatible::OpenAiCompatibleModel;
                Ok(LanguageModel::OpenAiCompatible(OpenAiCompatibleModel::new(
                    model_id, None,
                )))
            }
            _ => Ok(LanguageModel::Custom {
                provider: provider.to_string(),
                model_id: model_id.to_string(),
            }),
        }
    }
}

impl FromStr for LanguageModel {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelSelector::parse(s)
    }
}
