//! In-memory session store keyed by session key.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::transcript::Transcript;
use crate::error::ChatError;

const MAX_KEY_LEN: usize = 128;

/// Opaque identifier scoping a transcript to one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionKey(String);

impl SessionKey {
    /// A fresh random key.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SessionKey {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= MAX_KEY_LEN
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(ChatError::InvalidArgument(format!(
                "Invalid session key '{s}': use 1-{MAX_KEY_LEN} characters from [A-Za-z0-9_-]"
            )))
        }
    }
}

impl TryFrom<String> for SessionKey {
    type Error = ChatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A session's transcript. The mutex serializes turns within one session.
pub type SharedTranscript = Arc<Mutex<Transcript>>;

/// Process-lifetime store of session transcripts.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, SharedTranscript>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh, empty session under a generated key.
    pub async fn create(&self) -> SessionKey {
        let key = SessionKey::generate();
        self.sessions
            .write()
            .await
            .insert(key.clone(), SharedTranscript::default());
        key
    }

    /// Get or create a session by key.
    pub async fn get_or_create(&self, key: &SessionKey) -> SharedTranscript {
        if let Some(existing) = self.sessions.read().await.get(key) {
            return existing.clone();
        }
        self.sessions
            .write()
            .await
            .entry(key.clone())
            .or_default()
            .clone()
    }

    /// Get an existing session.
    pub async fn get(&self, key: &SessionKey) -> Option<SharedTranscript> {
        self.sessions.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
