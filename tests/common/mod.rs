//! Shared test helpers: scripted mock provider and a fake search tool.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use websage::error::ChatError;
use websage::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use websage::tools::{AgentToolParameters, Tool, ToolArguments, ToolExecutionContext, ToolSet};
use websage::types::*;

/// A mock provider that replays queued responses and records every request.
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<ProviderResponse, ChatError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
    always_call_tools: bool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            always_call_tools: false,
        }
    }

    /// A model that requests a search every time it runs out of script.
    pub fn always_calling_tools() -> Self {
        Self {
            always_call_tools: true,
            ..Self::new()
        }
    }

    /// Queue a final text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push_back(Ok(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
        }));
    }

    /// Queue a tool call response.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.queue_tool_calls("", vec![(id, name, args)]);
    }

    /// Queue one response carrying several tool calls.
    pub fn queue_tool_calls(&self, text: &str, calls: Vec<(&str, &str, serde_json::Value)>) {
        self.responses.lock().unwrap().push_back(Ok(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: calls
                .into_iter()
                .map(|(id, name, arguments)| AgentToolCall {
                    id: id.to_string(),
                    name: name.to_string(),
                    arguments,
                })
                .collect(),
        }));
    }

    /// Queue a failure.
    pub fn queue_error(&self, error: ChatError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }

    async fn generate_text(&self, request: &ProviderRequest) -> Result<ProviderResponse, ChatError> {
        let call_index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        if let Some(next) = self.responses.lock().unwrap().pop_front() {
            return next;
        }
        if self.always_call_tools {
            return Ok(ProviderResponse {
                text: format!("still looking ({call_index})"),
                tool_calls: vec![AgentToolCall {
                    id: format!("call_{call_index}"),
                    name: SEARCH_TOOL.to_string(),
                    arguments: serde_json::json!({"query": "more"}),
                }],
                ..Default::default()
            });
        }
        Ok(ProviderResponse {
            text: "Mock response".to_string(),
            ..Default::default()
        })
    }
}

pub const SEARCH_TOOL: &str = "tavily_search_results_json";

#[derive(serde::Deserialize)]
struct SearchArgs {
    query: String,
}

/// Fake search tool returning one canned snippet and counting invocations.
pub struct FakeSearch {
    counter: Arc<AtomicUsize>,
    parameters: AgentToolParameters,
}

#[async_trait]
impl Tool for FakeSearch {
    fn name(&self) -> &str {
        SEARCH_TOOL
    }

    fn description(&self) -> &str {
        "Search the web"
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        _ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, ChatError> {
        let SearchArgs { query } = args.deserialize()?;
        self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::json!([
            {"url": "https://weather.example/paris", "content": format!("Result for {query}: sunny, 24C")}
        ]))
    }
}

pub fn fake_search(counter: Arc<AtomicUsize>) -> Arc<dyn Tool> {
    Arc::new(FakeSearch {
        counter,
        parameters: AgentToolParameters::object()
            .string("query", "search query", true)
            .build(),
    })
}

pub fn search_tools() -> (ToolSet, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    (ToolSet::default().with_tool(fake_search(counter.clone())), counter)
}
