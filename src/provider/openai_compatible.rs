//! Generic OpenAI-compatible provider.

use async_trait::async_trait;

use crate::error::ChatError;
use crate::models::openai_compatible::OpenAiCompatibleModel;

use super::openai::ChatCompletionsProvider;
use super::{ModelProvider, ProviderRequest, ProviderResponse};

/// Generic provider for any OpenAI-compatible API.
pub struct OpenAiCompatibleProvider {
    inner: ChatCompletionsProvider,
}

impl OpenAiCompatibleProvider {
    pub fn new(model: &OpenAiCompatibleModel, api_key: String, base_url: String) -> Self {
        Self {
            inner: ChatCompletionsProvider::new(
                "openai-compatible",
                model.model_id.clone(),
                api_key,
                base_url,
            ),
        }
    }
}

#[async_trait]
impl ModelProvider for OpenAiCompatibleProvider {
    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, ChatError> {
        self.inner.generate_text(request).await
    }
}
