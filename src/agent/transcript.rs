//! Append-only conversation transcript and its chat-bubble view.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{ModelMessage, Role};

/// Ordered message history for one session. Messages are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transcript {
    messages: Vec<ModelMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message.
    pub fn push(&mut self, message: ModelMessage) {
        self.messages.push(message);
    }

    /// Append every message of a finished turn, in order.
    pub fn extend(&mut self, messages: impl IntoIterator<Item = ModelMessage>) {
        self.messages.extend(messages);
    }

    /// Get all messages.
    pub fn messages(&self) -> &[ModelMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ModelMessage> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The user-facing view: user prompts and final assistant answers.
    ///
    /// Tool traffic is hidden, as are assistant messages that only requested
    /// tools. Pure; calling it never changes the transcript.
    pub fn bubbles(&self) -> Vec<ChatBubble> {
        self.messages.iter().filter_map(ChatBubble::from_message).collect()
    }
}

/// Who a bubble belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleRole {
    User,
    Assistant,
}

/// One rendered chat bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBubble {
    pub role: BubbleRole,
    pub content: String,
}

impl ChatBubble {
    pub fn from_message(message: &ModelMessage) -> Option<Self> {
        match message.role {
            Role::User => Some(Self {
                role: BubbleRole::User,
                content: message.text(),
            }),
            Role::Assistant if !message.has_tool_calls() => Some(Self {
                role: BubbleRole::Assistant,
                content: strip_reasoning(&message.text()),
            }),
            _ => None,
        }
    }
}

/// Remove `<think>...</think>` blocks emitted by reasoning models.
pub fn strip_reasoning(text: &str) -> String {
    static THINK: OnceLock<Option<Regex>> = OnceLock::new();
    let re = THINK.get_or_init(|| Regex::new(r"(?s)<think>.*?(</think>|$)").ok());
    match re {
        Some(re) => re.replace_all(text, "").trim().to_string(),
        None => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentToolCall;

    fn weather_turn() -> Transcript {
        let mut t = Transcript::new();
        t.push(ModelMessage::user("What's the weather in Paris?"));
        t.push(ModelMessage::assistant_with_tool_calls(
            "",
            vec![AgentToolCall {
                id: "call_1".into(),
                name: "tavily_search_results_json".into(),
                arguments: serde_json::json!({"query": "Paris weather"}),
            }],
        ));
        t.push(ModelMessage::tool_result(
            "call_1",
            serde_json::json!([{"url": "https://weather.example", "content": "Sunny, 24C"}]),
            false,
        ));
        t.push(ModelMessage::assistant("<think>user wants weather</think>\nIt is sunny, 24C."));
        t
    }

    #[test]
    fn bubbles_show_only_user_and_final_answers() {
        let bubbles = weather_turn().bubbles();
        assert_eq!(
            bubbles,
            vec![
                ChatBubble {
                    role: BubbleRole::User,
                    content: "What's the weather in Paris?".into(),
                },
                ChatBubble {
                    role: BubbleRole::Assistant,
                    content: "It is sunny, 24C.".into(),
                },
            ]
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let transcript = weather_turn();
        let before = transcript.clone();
        let first = transcript.bubbles();
        let second = transcript.bubbles();
        assert_eq!(first, second);
        assert_eq!(transcript, before);
        assert_eq!(transcript.len(), 4);
    }

    #[test]
    fn unterminated_think_block_is_dropped() {
        assert_eq!(strip_reasoning("<think>still thinking"), "");
        assert_eq!(strip_reasoning("plain answer "), "plain answer");
        assert_eq!(
            strip_reasoning("<think>a</think>one <think>b</think>two"),
            "one two"
        );
    }
}
