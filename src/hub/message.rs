//! Chat message value types
//!
//! A [`Message`] is immutable once created: the log owns it from append time
//! until retention evicts it, and readers only ever receive clones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reserved sender name used for hub-synthesized notices
pub const SYSTEM_SENDER: &str = "system";

/// Kind of message in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Authored by a participant
    Normal,
    /// Synthesized by the hub (join/leave/timeout notices)
    System,
    /// Error notice
    Error,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Name of the sender (the reserved `system` name for notices)
    pub sender: String,
    /// Message text
    pub content: String,
    /// Wall-clock time the message was created
    pub created_at: DateTime<Utc>,
    /// Message kind
    pub kind: MessageKind,
}

impl Message {
    /// Create a participant message
    pub fn normal(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            created_at: Utc::now(),
            kind: MessageKind::Normal,
        }
    }

    /// Create a system notice
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            sender: SYSTEM_SENDER.to_string(),
            content: content.into(),
            created_at: Utc::now(),
            kind: MessageKind::System,
        }
    }

    /// Create an error notice
    pub fn error(content: impl Into<String>) -> Self {
        Self {
            sender: SYSTEM_SENDER.to_string(),
            content: content.into(),
            created_at: Utc::now(),
            kind: MessageKind::Error,
        }
    }
}

/// Payload returned to a successfully registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Welcome {
    /// Greeting line for display ("Welcome, alice!")
    pub greeting: String,
    /// Number of users online after registration
    pub online_count: usize,
}
