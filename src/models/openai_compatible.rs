//! Models behind any endpoint speaking the Chat Completions protocol.

/// Model id plus an optional per-model endpoint override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiCompatibleModel {
    pub model_id: String,
    /// Falls back to `OPENAI_COMPAT_BASE_URL` when unset.
    pub base_url: Option<String>,
}

impl OpenAiCompatibleModel {
    pub fn new(model_id: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            model_id: model_id.into(),
            base_url,
        }
    }
}
