//! Client configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::protocol::DEFAULT_MAX_FRAME;

/// Configuration options for [`crate::client::HubClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Address of the hub
    pub addr: SocketAddr,

    /// Number of connection attempts before giving up
    pub connect_attempts: u32,

    /// Delay between connection attempts
    pub retry_delay: Duration,

    /// Suggested interval between polls
    pub poll_interval: Duration,

    /// Maximum wire frame length in bytes
    pub max_frame: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:7878".parse().unwrap(),
            connect_attempts: 3,
            retry_delay: Duration::from_secs(2),
            poll_interval: Duration::from_millis(500),
            max_frame: DEFAULT_MAX_FRAME,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at a hub address
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            ..Default::default()
        }
    }

    /// Set the number of connection attempts (at least 1)
    pub fn connect_attempts(mut self, attempts: u32) -> Self {
        self.connect_attempts = attempts.max(1);
        self
    }

    /// Set the delay between connection attempts
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
