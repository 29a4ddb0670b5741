//! Model provider trait and implementations.

pub mod http;
pub mod openai;

#[cfg(feature = "groq")]
pub mod groq;
#[cfg(feature = "openai-compatible")]
pub mod openai_compatible;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::ChatError;
use crate::models::LanguageModel;
use crate::types::{AgentToolCall, GenerationSettings, ModelMessage, Usage};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Vec<ToolDefinition>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
}

impl ProviderResponse {
    /// Convert into the assistant message appended to the transcript.
    pub fn into_message(self) -> ModelMessage {
        ModelMessage::assistant_with_tool_calls(self.text, self.tool_calls)
    }
}

/// Core trait implemented by all model providers.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "groq").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Produce the next assistant message for the given transcript.
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, ChatError>;
}

/// Create a provider for the given model, using the provided config.
#[allow(unused_variables)]
pub fn create_provider(
    model: &LanguageModel,
    config: &AppConfig,
) -> Result<Box<dyn ModelProvider>, ChatError> {
    match model {
        #[cfg(feature = "groq")]
        LanguageModel::Groq(m) => {
            let api_key = config
                .get_api_key("groq")
                .ok_or_else(|| ChatError::Authentication("Missing GROQ_API_KEY".into()))?;
            Ok(Box::new(groq::GroqProvider::new(
                m.clone(),
                api_key,
                config.get_base_url("groq"),
            )))
        }
        #[cfg(feature = "openai-compatible")]
        LanguageModel::OpenAiCompatible(m) => {
            let api_key = config
                .get_api_key("openai-compatible")
                .ok_or_else(|| ChatError::Authentication("Missing OPENAI_COMPAT_API_KEY".into()))?;
            let base_url = m
                .base_url
                .clone()
                .or_else(|| config.get_base_url("openai-compatible"))
                .ok_or_else(|| ChatError::Configuration("Missing OPENAI_COMPAT_BASE_URL".into()))?;
            Ok(Box::new(openai_compatible::OpenAiCompatibleProvider::new(
                m, api_key, base_url,
            )))
        }
        LanguageModel::Custom { provider, .. } => Err(ChatError::ModelNotFound(format!(
            "No built-in provider for '{provider}'"
        ))),
    }
}
