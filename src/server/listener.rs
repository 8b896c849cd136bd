//! Chat hub TCP listener
//!
//! Handles the accept loop and spawns one connection handler per client.
//! The hub instance is constructed by the caller and shared into every
//! connection; the listener also owns the reaper task's lifecycle.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::error::Result;
use crate::hub::ChatHub;
use crate::server::config::ServerConfig;
use crate::server::connection::Connection;

/// Chat hub server
pub struct ChatServer {
    config: ServerConfig,
    hub: Arc<ChatHub>,
    next_session_id: AtomicU64,
    connection_semaphore: Option<Arc<Semaphore>>,
}

impl ChatServer {
    /// Create a server fronting the given hub
    pub fn new(config: ServerConfig, hub: Arc<ChatHub>) -> Self {
        let connection_semaphore = if config.max_connections > 0 {
            Some(Arc::new(Semaphore::new(config.max_connections)))
        } else {
            None
        };

        Self {
            config,
            hub,
            next_session_id: AtomicU64::new(1),
            connection_semaphore,
        }
    }

    /// Get a reference to the hub
    pub fn hub(&self) -> &Arc<ChatHub> {
        &self.hub
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }

    /// Run the server
    ///
    /// Spawns the inactivity reaper and blocks on the accept loop until the
    /// process ends.
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Chat hub listening");

        let _reaper_handle = self.hub.spawn_reaper_task();

        self.accept_loop(&listener).await
    }

    /// Run the server with graceful shutdown
    ///
    /// Serves until `shutdown` resolves, then stops the reaper task.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()>,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "Chat hub listening");

        let reaper_handle = self.hub.spawn_reaper_task();

        let result = tokio::select! {
            _ = shutdown => {
                tracing::info!("Shutdown signal received");
                Ok(())
            }
            result = self.accept_loop(&listener) => result,
        };

        reaper_handle.abort();

        result
    }

    async fn accept_loop(&self, listener: &TcpListener) -> Result<()> {
        loop {
            match listener.accept().await {
                Ok((socket, peer_addr)) => {
                    self.handle_connection(socket, peer_addr);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }

    fn handle_connection(&self, socket: TcpStream, peer_addr: SocketAddr) {
        // Check connection limit; the permit is held for the connection's
        // whole lifetime
        let permit = if let Some(ref sem) = self.connection_semaphore {
            match sem.clone().try_acquire_owned() {
                Ok(permit) => Some(permit),
                Err(_) => {
                    tracing::warn!(peer = %peer_addr, "Connection rejected: limit reached");
                    return;
                }
            }
        } else {
            None
        };

        let session_id = self.next_session_id.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(
            session_id = session_id,
            peer = %peer_addr,
            "New connection"
        );

        if self.config.tcp_nodelay {
            if let Err(e) = socket.set_nodelay(true) {
                tracing::debug!(error = %e, "Failed to set TCP_NODELAY");
            }
        }

        let config = self.config.clone();
        let hub = Arc::clone(&self.hub);

        tokio::spawn(async move {
            let _permit = permit;
            let connection = Connection::new(session_id, socket, peer_addr, &config, hub);

            if let Err(e) = connection.run().await {
                tracing::debug!(
                    session_id = session_id,
                    error = %e,
                    "Connection error"
                );
            }

            tracing::debug!(session_id = session_id, "Connection closed");
        });
    }
}
