//! Tavily web search: HTTP client plus the tool the model calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::types::AgentToolParameters;
use crate::config::{AppConfig, DEFAULT_MAX_RESULTS};
use crate::error::ChatError;
use crate::provider::http::{bearer_headers, shared_client, status_to_error};

/// Name the model uses to call the search tool.
pub const TOOL_NAME: &str = "tavily_search_results_json";

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

const TOOL_DESCRIPTION: &str = "A search engine optimized for comprehensive, accurate, and \
trusted results. Useful for when you need to answer questions about current events. \
Input should be a search query.";

/// One search hit as handed back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSnippet {
    pub url: String,
    pub content: String,
}

/// Minimal client for `POST /search`.
#[derive(Debug, Clone)]
pub struct TavilyClient {
    api_key: String,
    base_url: String,
    max_results: usize,
}

impl TavilyClient {
    pub fn new(api_key: String, base_url: Option<String>, max_results: usize) -> Self {
        Self {
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_results: max_results.max(1),
        }
    }

    /// Build from config; fails if `TAVILY_API_KEY` is missing.
    pub fn from_config(config: &AppConfig) -> Result<Self, ChatError> {
        let api_key = config
            .get_api_key("tavily")
            .ok_or_else(|| ChatError::Authentication("Missing TAVILY_API_KEY".into()))?;
        Ok(Self::new(
            api_key,
            config.get_base_url("tavily"),
            config.settings.max_results,
        ))
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Run a search, returning at most `max_results` snippets.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchSnippet>, ChatError> {
        let url = format!("{}/search", self.base_url);
        let body = SearchRequest {
            query,
            max_results: self.max_results,
            search_depth: "basic",
            include_answer: false,
        };

        debug!(query, max_results = self.max_results, "tavily search");

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: SearchResponse = resp.json().await?;
        Ok(data
            .results
            .into_iter()
            .take(self.max_results)
            .map(|r| SearchSnippet {
                url: r.url,
                content: r.content,
            })
            .collect())
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
    include_answer: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    url: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
}

/// The web search tool registered with the model.
pub struct TavilySearchTool {
    client: TavilyClient,
    parameters: AgentToolParameters,
}

impl TavilySearchTool {
    pub fn new(client: TavilyClient) -> Self {
        Self {
            client,
            parameters: AgentToolParameters::object()
                .string("query", "search query to look up", true)
                .build(),
        }
    }
}

impl Default for TavilySearchTool {
    fn default() -> Self {
        Self::new(TavilyClient::new(String::new(), None, DEFAULT_MAX_RESULTS))
    }
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<serde_json::Value, ChatError> {
        let SearchArgs { query } = args.deserialize()?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ChatError::InvalidArgument("query must not be empty".into()));
        }
        debug!(call_id = %ctx.tool_call_id, "tavily tool call");
        let snippets = self.client.search(query).await?;
        Ok(serde_json::to_value(snippets)?)
    }
}
