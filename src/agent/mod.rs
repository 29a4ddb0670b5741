//! Chat agent, session store and transcripts.

pub mod agent;
pub mod session;
pub mod transcript;

pub use agent::{ChatAgent, TurnReply};
pub use session::{SessionKey, SessionStore, SharedTranscript};
pub use transcript::{BubbleRole, ChatBubble, Transcript};
