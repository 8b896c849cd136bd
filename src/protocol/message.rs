//! Wire request and response types
//!
//! One request line yields exactly one response line. Requests are tagged by
//! `op`, responses by `reply`, so a frame like
//! `{"op":"send","sender":"alice","content":"hi"}` is self-describing on the
//! wire.

use serde::{Deserialize, Serialize};

use crate::hub::{Message, StatsSnapshot};

/// A hub operation requested by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Liveness probe
    Ping,
    /// Register a user
    Register { name: String },
    /// Disconnect a user
    Disconnect { name: String },
    /// Send a chat message
    Send { sender: String, content: String },
    /// Poll for messages at or after the caller-held cursor
    Poll { user: String, cursor: u64 },
    /// Fetch the most recent messages
    History { limit: usize },
    /// List users online
    Online,
    /// Fetch aggregate statistics
    Stats,
}

/// The hub's answer to a [`Request`]
///
/// Application rejections travel as `Rejected`; transport problems never
/// appear here — they surface as [`crate::error::Error`] on the caller's
/// side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Response {
    /// Answer to `Ping`
    Pong,
    /// Registration succeeded
    Welcome { greeting: String, online_count: usize },
    /// The hub refused the request (validation, conflict, rate limit)
    Rejected { reason: String },
    /// Message accepted at the given log position
    Sent { position: u64 },
    /// Disconnect processed
    Disconnected,
    /// New messages plus the cursor to poll with next time
    Messages {
        messages: Vec<Message>,
        next_cursor: u64,
    },
    /// Recent messages, oldest first
    History { messages: Vec<Message> },
    /// Names of users online
    Online { names: Vec<String> },
    /// Statistics snapshot
    Stats { stats: StatsSnapshot },
    /// The request line could not be understood
    BadRequest { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tagging() {
        let json = serde_json::to_string(&Request::Ping).unwrap();
        assert_eq!(json, "{\"op\":\"ping\"}");

        let json = serde_json::to_string(&Request::Poll {
            user: "alice".to_string(),
            cursor: 7,
        })
        .unwrap();
        assert_eq!(json, "{\"op\":\"poll\",\"user\":\"alice\",\"cursor\":7}");
    }

    #[test]
    fn test_request_parsing() {
        let req: Request =
            serde_json::from_str("{\"op\":\"send\",\"sender\":\"alice\",\"content\":\"hi\"}")
                .unwrap();
        assert_eq!(
            req,
            Request::Send {
                sender: "alice".to_string(),
                content: "hi".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_op_is_an_error() {
        let result: Result<Request, _> = serde_json::from_str("{\"op\":\"shout\"}");
        assert!(result.is_err());
    }

    #[test]
    fn test_response_tagging() {
        let json = serde_json::to_string(&Response::Rejected {
            reason: "Name already in use: alice".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            "{\"reply\":\"rejected\",\"reason\":\"Name already in use: alice\"}"
        );
    }

    #[test]
    fn test_response_round_trip() {
        let original = Response::Messages {
            messages: vec![Message::system("alice joined")],
            next_cursor: 1,
        };
        let json = serde_json::to_string(&original).unwrap();
        let back: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
