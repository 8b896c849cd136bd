//! Hub configuration

use std::time::Duration;

/// Configuration options for the chat hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum message length in characters
    pub max_message_len: usize,

    /// Minimum username length in characters
    pub min_username_len: usize,

    /// Maximum username length in characters
    pub max_username_len: usize,

    /// Messages admitted per sender within the rate window
    pub rate_limit: u32,

    /// Sliding window for rate limiting
    pub rate_window: Duration,

    /// Number of messages retained in the log
    pub log_capacity: usize,

    /// Inactivity after which a user is evicted
    pub idle_timeout: Duration,

    /// Period of the inactivity reaper
    pub reaper_interval: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_message_len: 500,
            min_username_len: 3,
            max_username_len: 20,
            rate_limit: 30,
            rate_window: Duration::from_secs(60),
            log_capacity: 100,
            idle_timeout: Duration::from_secs(300),
            reaper_interval: Duration::from_secs(30),
        }
    }
}

impl HubConfig {
    /// Set the maximum message length
    pub fn max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    /// Set the rate limit (messages per window)
    pub fn rate_limit(mut self, limit: u32) -> Self {
        self.rate_limit = limit;
        self
    }

    /// Set the log retention capacity
    ///
    /// Capacity is clamped to at least 1: a zero-capacity log could never
    /// deliver anything.
    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity.max(1);
        self
    }

    /// Set the inactivity timeout
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the reaper period
    pub fn reaper_interval(mut self, interval: Duration) -> Self {
        self.reaper_interval = interval;
        self
    }
}
