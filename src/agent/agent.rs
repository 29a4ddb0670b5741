//! Chat agent: one model, one search tool, many sessions.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::agent_loop::{ConversationLoop, LoopOptions, TurnEventSink, TurnOutcome};
use crate::config::AppConfig;
use crate::error::ChatError;
use crate::models::LanguageModel;
use crate::provider::{self, ModelProvider};
use crate::tools::{TavilyClient, TavilySearchTool, ToolSet};
use crate::types::{GenerationSettings, ModelMessage};

use super::session::{SessionKey, SessionStore};
use super::transcript::{BubbleRole, ChatBubble};

/// Result of a successful user turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// The final assistant answer, as the UI shows it.
    pub bubble: ChatBubble,
    pub outcome: TurnOutcome,
}

/// Processes user turns against per-session transcripts.
#[derive(Clone)]
pub struct ChatAgent {
    conversation: ConversationLoop,
    store: SessionStore,
}

impl ChatAgent {
    /// Create an agent over an explicit provider and tool set.
    pub fn new(provider: Arc<dyn ModelProvider>, tools: ToolSet) -> Self {
        Self {
            conversation: ConversationLoop::new(provider, tools),
            store: SessionStore::new(),
        }
    }

    /// Build the production agent: configured model plus Tavily search.
    pub fn from_config(config: &AppConfig) -> Result<Self, ChatError> {
        let model: LanguageModel = config.settings.model.parse()?;
        let provider: Arc<dyn ModelProvider> = Arc::from(provider::create_provider(&model, config)?);
        let search = TavilySearchTool::new(TavilyClient::from_config(config)?);
        let tools = ToolSet::default().with_tool(Arc::new(search));

        let settings = GenerationSettings::builder()
            .maybe_temperature(config.settings.temperature)
            .maybe_max_tokens(config.settings.max_tokens)
            .build();
        let options = LoopOptions {
            max_tool_rounds: config.settings.max_tool_rounds,
            system_prompt: config.settings.system_prompt.clone(),
            settings,
        };

        info!(
            provider = provider.provider_name(),
            model = provider.model_id(),
            tools = tools.len(),
            "chat agent ready"
        );
        Ok(Self::new(provider, tools).with_options(options))
    }

    pub fn with_options(mut self, options: LoopOptions) -> Self {
        self.conversation = self.conversation.with_options(options);
        self
    }

    /// Open a new, empty session and return its key.
    pub async fn open_session(&self) -> SessionKey {
        let key = self.store.create().await;
        let sessions = self.store.len().await;
        debug!(session = %key, sessions, "session opened");
        key
    }

    /// Whether `key` names a session this agent already holds.
    pub async fn has_session(&self, key: &SessionKey) -> bool {
        self.store.get(key).await.is_some()
    }

    /// Submit one user turn. See [`ChatAgent::submit_with_events`].
    pub async fn submit(&self, key: &SessionKey, text: &str) -> Result<Option<TurnReply>, ChatError> {
        self.submit_with_events(key, text, None).await
    }

    /// Submit one user turn, reporting progress to `sink`.
    ///
    /// Blank input is a no-op and returns `Ok(None)` without calling the
    /// model. On error the session transcript is left exactly as it was.
    pub async fn submit_with_events(
        &self,
        key: &SessionKey,
        text: &str,
        sink: Option<&TurnEventSink>,
    ) -> Result<Option<TurnReply>, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let session = self.store.get_or_create(key).await;
        let mut transcript = session.lock().await;

        let outcome = match self
            .conversation
            .run_turn(transcript.messages(), ModelMessage::user(text), sink)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(session = %key, error = %e, "turn failed; transcript unchanged");
                return Err(e);
            }
        };

        transcript.extend(outcome.messages.iter().cloned());
        let bubble = outcome
            .final_message()
            .and_then(ChatBubble::from_message)
            .unwrap_or(ChatBubble {
                role: BubbleRole::Assistant,
                content: String::new(),
            });
        Ok(Some(TurnReply { bubble, outcome }))
    }

    /// Rendered bubbles for a session; empty for unknown sessions.
    pub async fn bubbles(&self, key: &SessionKey) -> Vec<ChatBubble> {
        match self.store.get(key).await {
            Some(session) => session.lock().await.bubbles(),
            None => Vec::new(),
        }
    }

    /// Snapshot of a session's full transcript.
    pub async fn transcript(&self, key: &SessionKey) -> Vec<ModelMessage> {
        match self.store.get(key).await {
            Some(session) => session.lock().await.messages().to_vec(),
            None => Vec::new(),
        }
    }
}
