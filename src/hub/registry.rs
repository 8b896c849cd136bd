//! User registry
//!
//! Tracks active participants and their last-activity instants. Names are
//! case-sensitive identities. The registry only covers occupancy; syntactic
//! name validation lives in [`super::validate`], and the system notices for
//! join/leave are appended by the hub façade so that registry mutation and
//! log append happen atomically under one lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::reject::Rejection;

/// Active participants keyed by name
#[derive(Debug, Default)]
pub struct UserRegistry {
    /// Name to last-activity instant
    users: HashMap<String, Instant>,
}

impl UserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with `last_activity = now`
    ///
    /// Fails with `NameTaken` if an entry with that exact name exists.
    pub fn register(&mut self, name: &str, now: Instant) -> Result<(), Rejection> {
        if self.users.contains_key(name) {
            return Err(Rejection::NameTaken(name.to_string()));
        }
        self.users.insert(name.to_string(), now);
        Ok(())
    }

    /// Refresh a user's last activity; no-op if the user is absent
    ///
    /// Absence is not an error: the caller may have been evicted by the
    /// reaper between its own calls.
    pub fn touch(&mut self, name: &str, now: Instant) {
        if let Some(last) = self.users.get_mut(name) {
            *last = now;
        }
    }

    /// Remove a user, reporting whether an entry was actually removed
    pub fn remove(&mut self, name: &str) -> bool {
        self.users.remove(name).is_some()
    }

    /// Whether a user is registered
    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Number of users online
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are online
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Alphabetically sorted snapshot of online names
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.users.keys().cloned().collect();
        names.sort();
        names
    }

    /// Names idle longer than `timeout` as of `now`
    pub fn idle_since(&self, timeout: Duration, now: Instant) -> Vec<String> {
        self.users
            .iter()
            .filter(|(_, &last)| now.saturating_duration_since(last) > timeout)
            .map(|(name, _)| name.clone())
            .collect()
    }
}
