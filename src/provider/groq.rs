//! Groq provider (OpenAI-compatible).

use async_trait::async_trait;

use crate::error::ChatError;
use crate::models::groq::GroqModel;

use super::openai::ChatCompletionsProvider;
use super::{ModelProvider, ProviderRequest, ProviderResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct GroqProvider {
    inner: ChatCompletionsProvider,
}

impl GroqProvider {
    pub fn new(model: GroqModel, api_key: String, base_url: Option<String>) -> Self {
        Self {
            inner: ChatCompletionsProvider::new(
                "groq",
                model.as_str(),
                api_key,
                base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ),
        }
    }
}

#[async_trait]
impl ModelProvider for GroqProvider {
    fn provider_name(&self) -> &str { self.inner.provider_name() }
    fn model_id(&self) -> &str { self.inner.model_id() }
    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse, ChatError> {
        self.inner.generate_text(request).await
    }
}
