//! Per-connection request dispatch
//!
//! Each connection loops read-request/dispatch/write-response until the peer
//! closes, the idle timeout fires or a protocol error occurs. Faults on one
//! connection never affect the hub or other connections.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{Error, Result};
use crate::hub::ChatHub;
use crate::protocol::{Request, Response, Wire};
use crate::server::config::ServerConfig;

/// A single client connection to the hub
pub struct Connection<S> {
    session_id: u64,
    peer_addr: SocketAddr,
    wire: Wire<S>,
    idle_timeout: Duration,
    hub: Arc<ChatHub>,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Connection<S> {
    /// Create a connection handler over an accepted stream
    pub fn new(
        session_id: u64,
        stream: S,
        peer_addr: SocketAddr,
        config: &ServerConfig,
        hub: Arc<ChatHub>,
    ) -> Self {
        Self {
            session_id,
            peer_addr,
            wire: Wire::with_max_frame(stream, config.max_frame),
            idle_timeout: config.idle_timeout,
            hub,
        }
    }

    /// Serve requests until the connection ends
    ///
    /// An unparseable line gets a `BadRequest` response and closes the
    /// connection; an idle timeout or clean EOF closes it silently.
    pub async fn run(mut self) -> Result<()> {
        loop {
            let read = tokio::time::timeout(self.idle_timeout, self.wire.read_frame::<Request>());

            let request = match read.await {
                Err(_) => {
                    tracing::debug!(
                        session_id = self.session_id,
                        peer = %self.peer_addr,
                        "Idle connection closed"
                    );
                    return Ok(());
                }
                Ok(Ok(None)) => return Ok(()),
                Ok(Ok(Some(request))) => request,
                Ok(Err(Error::MalformedFrame(e))) => {
                    tracing::debug!(
                        session_id = self.session_id,
                        error = %e,
                        "Unparseable request line"
                    );
                    let _ = self
                        .wire
                        .write_frame(&Response::BadRequest {
                            reason: format!("malformed request: {}", e),
                        })
                        .await;
                    return Ok(());
                }
                Ok(Err(e)) => return Err(e),
            };

            let response = self.dispatch(request).await;
            self.wire.write_frame(&response).await?;
        }
    }

    /// Map one request onto the hub and its result onto a response
    async fn dispatch(&self, request: Request) -> Response {
        match request {
            Request::Ping => {
                self.hub.ping().await;
                Response::Pong
            }
            Request::Register { name } => match self.hub.register_user(&name).await {
                Ok(welcome) => Response::Welcome {
                    greeting: welcome.greeting,
                    online_count: welcome.online_count,
                },
                Err(rejection) => Response::Rejected {
                    reason: rejection.to_string(),
                },
            },
            Request::Disconnect { name } => {
                self.hub.disconnect_user(&name).await;
                Response::Disconnected
            }
            Request::Send { sender, content } => {
                match self.hub.send_message(&sender, &content).await {
                    Ok(position) => Response::Sent { position },
                    Err(rejection) => Response::Rejected {
                        reason: rejection.to_string(),
                    },
                }
            }
            Request::Poll { user, cursor } => {
                let (messages, next_cursor) = self.hub.fetch_new(&user, cursor).await;
                Response::Messages {
                    messages,
                    next_cursor,
                }
            }
            Request::History { limit } => Response::History {
                messages: self.hub.fetch_history(limit).await,
            },
            Request::Online => Response::Online {
                names: self.hub.list_online().await,
            },
            Request::Stats => Response::Stats {
                stats: self.hub.statistics().await,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    /// Spawn a connection handler over one end of a duplex pipe, return the
    /// client side
    fn start(hub: Arc<ChatHub>) -> Wire<tokio::io::DuplexStream> {
        let (client_end, server_end) = tokio::io::duplex(16 * 1024);
        let config = ServerConfig::default();
        tokio::spawn(async move {
            let connection = Connection::new(1, server_end, test_peer(), &config, hub);
            let _ = connection.run().await;
        });
        Wire::new(client_end)
    }

    async fn exchange(wire: &mut Wire<tokio::io::DuplexStream>, request: Request) -> Response {
        wire.write_frame(&request).await.unwrap();
        wire.read_frame().await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_ping_pong() {
        let mut wire = start(Arc::new(ChatHub::new()));
        assert_eq!(exchange(&mut wire, Request::Ping).await, Response::Pong);
    }

    #[tokio::test]
    async fn test_register_and_reject() {
        let mut wire = start(Arc::new(ChatHub::new()));

        let reply = exchange(
            &mut wire,
            Request::Register {
                name: "alice".to_string(),
            },
        )
        .await;
        assert_eq!(
            reply,
            Response::Welcome {
                greeting: "Welcome, alice!".to_string(),
                online_count: 1,
            }
        );

        let reply = exchange(
            &mut wire,
            Request::Register {
                name: "alice".to_string(),
            },
        )
        .await;
        assert!(matches!(reply, Response::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_send_and_poll() {
        let hub = Arc::new(ChatHub::new());
        let mut wire = start(Arc::clone(&hub));

        hub.register_user("alice").await.unwrap();

        let reply = exchange(
            &mut wire,
            Request::Send {
                sender: "alice".to_string(),
                content: "hi".to_string(),
            },
        )
        .await;
        assert_eq!(reply, Response::Sent { position: 1 });

        let reply = exchange(
            &mut wire,
            Request::Poll {
                user: "alice".to_string(),
                cursor: 0,
            },
        )
        .await;
        match reply {
            Response::Messages {
                messages,
                next_cursor,
            } => {
                assert_eq!(messages.len(), 2);
                assert_eq!(next_cursor, 2);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stats_and_online() {
        let hub = Arc::new(ChatHub::new());
        let mut wire = start(Arc::clone(&hub));

        hub.register_user("bob").await.unwrap();

        let reply = exchange(&mut wire, Request::Online).await;
        assert_eq!(
            reply,
            Response::Online {
                names: vec!["bob".to_string()]
            }
        );

        let reply = exchange(&mut wire, Request::Stats).await;
        match reply {
            Response::Stats { stats } => assert_eq!(stats.online_count, 1),
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_line_gets_bad_request() {
        let hub = Arc::new(ChatHub::new());
        let (client_end, server_end) = tokio::io::duplex(1024);
        let config = ServerConfig::default();
        tokio::spawn(async move {
            let connection = Connection::new(1, server_end, test_peer(), &config, hub);
            let _ = connection.run().await;
        });

        use tokio::io::AsyncWriteExt;
        let mut client_end = client_end;
        client_end.write_all(b"not json at all\n").await.unwrap();

        let mut wire = Wire::new(client_end);
        let reply: Response = wire.read_frame().await.unwrap().unwrap();
        assert!(matches!(reply, Response::BadRequest { .. }));
    }
}
