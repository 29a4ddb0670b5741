//! Terminal chat loop.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::agent::{BubbleRole, ChatAgent, ChatBubble, SessionKey};
use crate::agent_loop::{TurnEvent, TurnEventSink};
use crate::error::ChatError;

const HELP: &str = "Commands: /history re-renders the conversation, /session shows the session key, /quit exits.";

/// Progress sink printing tool activity to stderr.
pub fn stderr_progress() -> TurnEventSink {
    Arc::new(|event: TurnEvent| match event {
        TurnEvent::ToolCallStarted { call } => {
            let query = call
                .arguments
                .get("query")
                .and_then(|q| q.as_str())
                .unwrap_or_default()
                .to_string();
            eprintln!("⚡ {} {query}", call.name);
        }
        TurnEvent::ToolResult { result } if result.is_error => {
            eprintln!("  ❌ {}", result.result);
        }
        TurnEvent::RoundLimitReached { rounds } => {
            eprintln!("  ⚠ stopped after {rounds} tool rounds");
        }
        _ => {}
    })
}

fn write_bubble(out: &mut impl Write, bubble: &ChatBubble) -> std::io::Result<()> {
    let label = match bubble.role {
        BubbleRole::User => "you",
        BubbleRole::Assistant => "assistant",
    };
    writeln!(out, "{label}> {}", bubble.content)
}

/// Read lines from `input` until EOF or `/quit`, one turn per line.
///
/// A failed turn prints an error line and leaves the session untouched.
pub async fn run<R, W>(
    agent: &ChatAgent,
    key: &SessionKey,
    input: R,
    out: &mut W,
    sink: Option<&TurnEventSink>,
) -> Result<(), ChatError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "How can I help? ({HELP})")?;
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/help" => writeln!(out, "{HELP}")?,
            "/session" => writeln!(out, "session: {key}")?,
            "/history" => {
                for bubble in agent.bubbles(key).await {
                    write_bubble(out, &bubble)?;
                }
            }
            text => match agent.submit_with_events(key, text, sink).await {
                Ok(Some(reply)) => write_bubble(out, &reply.bubble)?,
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(error = %e, retryable = e.is_retryable(), "turn failed");
                    writeln!(out, "error: {e}")?;
                }
            },
        }
        out.flush()?;
    }
    Ok(())
}
