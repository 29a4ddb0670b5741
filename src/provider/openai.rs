//! OpenAI Chat Completions wire format, shared by Groq and compatible endpoints.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::ChatError;
use crate::types::*;

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{ModelProvider, ProviderRequest, ProviderResponse};

/// Provider speaking `POST {base_url}/chat/completions`.
pub struct ChatCompletionsProvider {
    provider_name: String,
    model_id: String,
    api_key: String,
    base_url: String,
}

impl ChatCompletionsProvider {
    pub fn new(
        provider_name: impl Into<String>,
        model_id: impl Into<String>,
        api_key: String,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            provider_name: provider_name.into(),
            model_id: model_id.into(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_openai)
            .collect::<Vec<_>>();

        let mut body = serde_json::Map::new();
        body.insert("model".into(), self.model_id.clone().into());
        body.insert("messages".into(), messages.into());
        body.insert("stream".into(), false.into());

        let settings = &request.settings;
        if let Some(max) = settings.max_tokens {
            body.insert("max_tokens".into(), max.into());
        }
        if let Some(temp) = settings.temperature {
            body.insert("temperature".into(), temp.into());
        }

        if !request.tools.is_empty() {
            let tool_defs: Vec<serde_json::Value> = request
                .tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            body.insert("tools".into(), tool_defs.into());
            body.insert("tool_choice".into(), "auto".into());
        }

        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl ModelProvider for ChatCompletionsProvider {
    fn provider_name(&self) -> &str {
        &self.provider_name
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse, ChatError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            provider = %self.provider_name,
            model = %self.model_id,
            messages = request.messages.len(),
            "chat completion request"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: ChatCompletionResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::api(status, "No choices in chat completion response"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| AgentToolCall {
                id: tc.id,
                name: tc.function.name,
                // Unparseable arguments are kept verbatim; the tool rejects them.
                arguments: serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(serde_json::Value::String(tc.function.arguments)),
            })
            .collect();

        Ok(ProviderResponse {
            text: choice.message.content.unwrap_or_default(),
            usage: data
                .usage
                .map(|u| Usage {
                    input_tokens: u.prompt_tokens,
                    output_tokens: u.completion_tokens,
                    total_tokens: u.total_tokens,
                })
                .unwrap_or_default(),
            tool_calls,
        })
    }
}

fn role_str(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    }
}

fn message_to_openai(msg: &ModelMessage) -> serde_json::Value {
    if let Some(tr) = msg.tool_result_part() {
        let content = match &tr.result {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return serde_json::json!({
            "role": "tool",
            "tool_call_id": tr.tool_call_id,
            "content": content,
        });
    }

    let role = role_str(msg.role);
    let text = msg.text();
    let tool_calls = msg.tool_calls();
    if tool_calls.is_empty() {
        return serde_json::json!({ "role": role, "content": text });
    }

    let tc_json: Vec<serde_json::Value> = tool_calls
        .iter()
        .map(|tc| {
            serde_json::json!({
                "id": tc.id,
                "type": "function",
                "function": {
                    "name": tc.name,
                    "arguments": match &tc.arguments {
                        serde_json::Value::String(raw) => raw.clone(),
                        other => other.to_string(),
                    },
                }
            })
        })
        .collect();
    serde_json::json!({
        "role": role,
        "content": if text.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(text) },
        "tool_calls": tc_json,
    })
}

// Chat Completions response types (internal)

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunction,
}

#[derive(Deserialize)]
struct ChatFunction {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
