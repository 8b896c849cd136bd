//! Per-sender sliding-window rate limiter
//!
//! Admission control counts sends within a trailing time interval, not fixed
//! buckets: a burst followed by silence frees capacity continuously rather
//! than only at minute boundaries.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Sliding-window message admission per sender
///
/// Windows are created lazily on first send and dropped when a sender
/// disconnects. All methods take `now` explicitly so behavior is
/// deterministic under test.
#[derive(Debug)]
pub struct RateLimiter {
    /// Recent send instants per sender, oldest first
    windows: HashMap<String, VecDeque<Instant>>,

    /// Maximum sends admitted within the window
    limit: u32,

    /// Window length
    window: Duration,
}

impl RateLimiter {
    /// Create a limiter admitting `limit` sends per `window`
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            windows: HashMap::new(),
            limit,
            window,
        }
    }

    /// Admit or reject a send at `now`
    ///
    /// Prunes the sender's entries older than the window, then rejects
    /// without recording if the remaining count is at the limit, otherwise
    /// records `now` and accepts.
    pub fn admit(&mut self, sender: &str, now: Instant) -> bool {
        let window = self.windows.entry(sender.to_string()).or_default();

        while let Some(&front) = window.front() {
            if now.saturating_duration_since(front) >= self.window {
                window.pop_front();
            } else {
                break;
            }
        }

        if window.len() >= self.limit as usize {
            return false;
        }

        window.push_back(now);
        true
    }

    /// Drop all recorded sends for a sender (called on disconnect)
    pub fn clear(&mut self, sender: &str) {
        self.windows.remove(sender);
    }

    /// Number of senders currently holding a window
    pub fn tracked_senders(&self) -> usize {
        self.windows.len()
    }
}
