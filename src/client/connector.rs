//! Hub client
//!
//! Typed request helpers over one TCP connection to the hub. The client
//! owns the poll cursor, starting at 0: the hub never remembers where a
//! reader is, so losing the cursor means re-reading whatever the log still
//! retains.

use tokio::net::TcpStream;

use crate::error::{Error, Result};
use crate::hub::{Message, StatsSnapshot};
use crate::protocol::{Request, Response, Wire};

use super::config::ClientConfig;

/// Client connection to a chat hub
pub struct HubClient {
    wire: Wire<TcpStream>,
    cursor: u64,
}

impl HubClient {
    /// Connect to the hub with bounded retries
    ///
    /// Each attempt is followed by a `ping` probe, so a successful return
    /// means the hub actually answered, not just that TCP connected.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let attempts = config.connect_attempts;

        for attempt in 1..=attempts {
            match TcpStream::connect(config.addr).await {
                Ok(stream) => {
                    let _ = stream.set_nodelay(true);
                    let mut client = Self {
                        wire: Wire::with_max_frame(stream, config.max_frame),
                        cursor: 0,
                    };
                    client.ping().await?;
                    return Ok(client);
                }
                Err(e) => {
                    tracing::debug!(
                        attempt = attempt,
                        max = attempts,
                        error = %e,
                        "Connection attempt failed"
                    );
                    if attempt < attempts {
                        tokio::time::sleep(config.retry_delay).await;
                    }
                }
            }
        }

        Err(Error::HubUnreachable { attempts })
    }

    /// Current poll cursor
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Probe hub liveness
    pub async fn ping(&mut self) -> Result<()> {
        match self.request(Request::Ping).await? {
            Response::Pong => Ok(()),
            other => Err(unexpected("pong", &other)),
        }
    }

    /// Register a user
    ///
    /// Returns `(true, greeting)` on success or `(false, reason)` when the
    /// hub rejected the name.
    pub async fn register(&mut self, name: &str) -> Result<(bool, String)> {
        let request = Request::Register {
            name: name.to_string(),
        };
        match self.request(request).await? {
            Response::Welcome { greeting, .. } => Ok((true, greeting)),
            Response::Rejected { reason } => Ok((false, reason)),
            other => Err(unexpected("welcome or rejected", &other)),
        }
    }

    /// Disconnect a user
    pub async fn disconnect(&mut self, name: &str) -> Result<()> {
        let request = Request::Disconnect {
            name: name.to_string(),
        };
        match self.request(request).await? {
            Response::Disconnected => Ok(()),
            other => Err(unexpected("disconnected", &other)),
        }
    }

    /// Send a chat message
    ///
    /// Returns `(true, "sent")` on success or `(false, reason)` when the
    /// hub rejected the message.
    pub async fn send(&mut self, sender: &str, content: &str) -> Result<(bool, String)> {
        let request = Request::Send {
            sender: sender.to_string(),
            content: content.to_string(),
        };
        match self.request(request).await? {
            Response::Sent { .. } => Ok((true, "sent".to_string())),
            Response::Rejected { reason } => Ok((false, reason)),
            other => Err(unexpected("sent or rejected", &other)),
        }
    }

    /// Poll for messages newer than the held cursor, advancing it
    pub async fn poll_new(&mut self, user: &str) -> Result<Vec<Message>> {
        let request = Request::Poll {
            user: user.to_string(),
            cursor: self.cursor,
        };
        match self.request(request).await? {
            Response::Messages {
                messages,
                next_cursor,
            } => {
                self.cursor = next_cursor;
                Ok(messages)
            }
            other => Err(unexpected("messages", &other)),
        }
    }

    /// Fetch the last `limit` messages, oldest first
    pub async fn history(&mut self, limit: usize) -> Result<Vec<Message>> {
        match self.request(Request::History { limit }).await? {
            Response::History { messages } => Ok(messages),
            other => Err(unexpected("history", &other)),
        }
    }

    /// List users online
    pub async fn online(&mut self) -> Result<Vec<String>> {
        match self.request(Request::Online).await? {
            Response::Online { names } => Ok(names),
            other => Err(unexpected("online", &other)),
        }
    }

    /// Fetch aggregate statistics
    pub async fn stats(&mut self) -> Result<StatsSnapshot> {
        match self.request(Request::Stats).await? {
            Response::Stats { stats } => Ok(stats),
            other => Err(unexpected("stats", &other)),
        }
    }

    /// One request-response exchange
    async fn request(&mut self, request: Request) -> Result<Response> {
        self.wire.write_frame(&request).await?;
        match self.wire.read_frame().await? {
            Some(response) => Ok(response),
            None => Err(Error::ConnectionClosed),
        }
    }
}

fn unexpected(wanted: &str, got: &Response) -> Error {
    Error::UnexpectedReply(format!("wanted {}, got {:?}", wanted, got))
}
