//! Server configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::protocol::DEFAULT_MAX_FRAME;

/// Configuration options for the TCP front-end
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Maximum concurrent connections (0 = unlimited)
    pub max_connections: usize,

    /// Idle timeout (disconnect if no request received)
    pub idle_timeout: Duration,

    /// Maximum wire frame length in bytes
    pub max_frame: usize,

    /// Enable TCP_NODELAY (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:7878".parse().unwrap(),
            max_connections: 0, // Unlimited
            idle_timeout: Duration::from_secs(600),
            max_frame: DEFAULT_MAX_FRAME,
            tcp_nodelay: true,
        }
    }
}

impl ServerConfig {
    /// Create a new config with a custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set maximum concurrent connections
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the idle timeout
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the maximum frame length
    pub fn max_frame(mut self, max: usize) -> Self {
        self.max_frame = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), 7878);
        assert_eq!(config.max_connections, 0);
        assert_eq!(config.idle_timeout, Duration::from_secs(600));
        assert_eq!(config.max_frame, DEFAULT_MAX_FRAME);
        assert!(config.tcp_nodelay);
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        let config = ServerConfig::with_addr(addr);

        assert_eq!(config.bind_addr, addr);
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "0.0.0.0:7000".parse().unwrap();
        let config = ServerConfig::default()
            .bind(addr)
            .max_connections(50)
            .idle_timeout(Duration::from_secs(30))
            .max_frame(8 * 1024);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(config.max_connections, 50);
        assert_eq!(config.idle_timeout, Duration::from_secs(30));
        assert_eq!(config.max_frame, 8 * 1024);
    }
}
