//! Aggregate hub statistics

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Monotonic counters owned by the hub
///
/// Counters never decrease; `peak_users` resets only when the process
/// restarts.
#[derive(Debug)]
pub struct HubStats {
    /// Total messages appended to the log, system notices included
    pub total_messages: u64,
    /// Total successful registrations ever made
    pub total_registrations: u64,
    /// Highest concurrent user count observed
    pub peak_users: usize,
    /// Process start time
    pub started_at: Instant,
}

impl HubStats {
    /// Create zeroed stats anchored at `now`
    pub fn new() -> Self {
        Self {
            total_messages: 0,
            total_registrations: 0,
            peak_users: 0,
            started_at: Instant::now(),
        }
    }

    /// Record a successful registration with the resulting online count
    pub fn record_registration(&mut self, online: usize) {
        self.total_registrations += 1;
        self.peak_users = self.peak_users.max(online);
    }

    /// Record a message appended to the log
    pub fn record_message(&mut self) {
        self.total_messages += 1;
    }

    /// Build a serializable snapshot for the given online count
    pub fn snapshot(&self, online: usize) -> StatsSnapshot {
        StatsSnapshot {
            online_count: online,
            total_messages: self.total_messages,
            total_registrations: self.total_registrations,
            peak_users: self.peak_users,
            uptime_secs: self.started_at.elapsed().as_secs(),
        }
    }
}

impl Default for HubStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of hub statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Users currently online
    pub online_count: usize,
    /// Total messages appended
    pub total_messages: u64,
    /// Total registrations ever
    pub total_registrations: u64,
    /// Peak concurrent users
    pub peak_users: usize,
    /// Seconds since the hub started
    pub uptime_secs: u64,
}

/// Format a duration in whole seconds as "2h 30m 5s"
///
/// Zero-valued leading units are omitted; a zero duration renders as "0s".
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zeroed() {
        let stats = HubStats::new();
        assert_eq!(stats.total_messages, 0);
        assert_eq!(stats.total_registrations, 0);
        assert_eq!(stats.peak_users, 0);
    }

    #[test]
    fn test_peak_tracks_maximum() {
        let mut stats = HubStats::new();

        stats.record_registration(1);
        stats.record_registration(2);
        stats.record_registration(3);
        assert_eq!(stats.peak_users, 3);

        // Users left; a new registration at a lower count keeps the peak
        stats.record_registration(2);
        assert_eq!(stats.peak_users, 3);
        assert_eq!(stats.total_registrations, 4);
    }

    #[test]
    fn test_snapshot() {
        let mut stats = HubStats::new();
        stats.record_registration(2);
        stats.record_message();
        stats.record_message();

        let snap = stats.snapshot(1);
        assert_eq!(snap.online_count, 1);
        assert_eq!(snap.total_messages, 2);
        assert_eq!(snap.total_registrations, 1);
        assert_eq!(snap.peak_users, 2);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(5), "5s");
        assert_eq!(format_duration(60), "1m");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(3600), "1h");
        assert_eq!(format_duration(9005), "2h 30m 5s");
        assert_eq!(format_duration(3605), "1h 5s");
    }
}
