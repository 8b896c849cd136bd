//! Chat hub implementation
//!
//! The hub owns all mutable chat state behind a single mutex and exposes the
//! only externally callable surface. Every operation acquires the lock for a
//! short, await-free critical section; operations are at worst O(online
//! users) or O(log capacity), so the coarse lock keeps invariants composable
//! (an append and the matching activity refresh happen atomically) at
//! negligible contention cost.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use super::config::HubConfig;
use super::limiter::RateLimiter;
use super::log::MessageLog;
use super::message::{Message, Welcome};
use super::registry::UserRegistry;
use super::reject::Rejection;
use super::stats::{HubStats, StatsSnapshot};
use super::validate;

/// All mutable hub state, guarded by one lock
#[derive(Debug)]
struct HubState {
    registry: UserRegistry,
    log: MessageLog,
    limiter: RateLimiter,
    stats: HubStats,
}

impl HubState {
    /// Append any message and bump the message counter
    fn append(&mut self, message: Message) -> u64 {
        self.stats.record_message();
        self.log.append(message)
    }

    /// Append a hub-synthesized notice
    fn append_notice(&mut self, text: String) {
        self.append(Message::system(text));
    }
}

/// The single process-wide authority for chat state
///
/// Constructed once at process start and shared as `Arc<ChatHub>`; there are
/// no ambient globals. Delivery is pull-based: pollers that find nothing new
/// get an empty batch and decide for themselves when to retry.
pub struct ChatHub {
    state: Mutex<HubState>,
    config: HubConfig,
}

impl ChatHub {
    /// Create a hub with default configuration
    pub fn new() -> Self {
        Self::with_config(HubConfig::default())
    }

    /// Create a hub with custom configuration
    pub fn with_config(config: HubConfig) -> Self {
        Self {
            state: Mutex::new(HubState {
                registry: UserRegistry::new(),
                log: MessageLog::with_capacity(config.log_capacity),
                limiter: RateLimiter::new(config.rate_limit, config.rate_window),
                stats: HubStats::new(),
            }),
            config,
        }
    }

    /// Get the hub configuration
    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Liveness probe; touches no state
    pub async fn ping(&self) -> bool {
        true
    }

    /// Register a new user
    ///
    /// Validates the name, inserts it into the registry, updates the
    /// registration counters and appends the "`<name> joined`" notice, all
    /// atomically. Returns a welcome payload on success.
    pub async fn register_user(&self, name: &str) -> Result<Welcome, Rejection> {
        validate::check_username(name, &self.config)?;

        let mut state = self.state.lock().await;

        state.registry.register(name, Instant::now())?;
        let online = state.registry.len();
        state.stats.record_registration(online);
        state.append_notice(format!("{} joined", name));

        tracing::info!(user = %name, online = online, "User registered");

        Ok(Welcome {
            greeting: format!("Welcome, {}!", name),
            online_count: online,
        })
    }

    /// Remove a user, idempotently
    ///
    /// The "`<name> left`" notice and the rate-window cleanup happen only
    /// when an entry was actually removed; a second call is a silent no-op.
    pub async fn disconnect_user(&self, name: &str) {
        let mut state = self.state.lock().await;

        if state.registry.remove(name) {
            state.limiter.clear(name);
            state.append_notice(format!("{} left", name));
            tracing::info!(user = %name, online = state.registry.len(), "User disconnected");
        }
    }

    /// Accept a message from a sender
    ///
    /// Content validation, rate admission, append and activity refresh run
    /// under one lock acquisition. Returns the assigned log position.
    pub async fn send_message(&self, sender: &str, content: &str) -> Result<u64, Rejection> {
        validate::check_content(content, &self.config)?;

        let now = Instant::now();
        let mut state = self.state.lock().await;

        if !state.limiter.admit(sender, now) {
            tracing::debug!(user = %sender, "Message rate limited");
            return Err(Rejection::RateLimited {
                limit: self.config.rate_limit,
            });
        }

        let position = state.append(Message::normal(sender, content));
        state.registry.touch(sender, now);

        Ok(position)
    }

    /// Read messages at or after the caller-held `cursor`
    ///
    /// Returns the messages and the cursor to use next time. The hub does
    /// not remember cursors across calls; each reader owns its own. Also
    /// refreshes the reader's activity.
    pub async fn fetch_new(&self, user: &str, cursor: u64) -> (Vec<Message>, u64) {
        let mut state = self.state.lock().await;

        state.registry.touch(user, Instant::now());
        state.log.read_from(cursor)
    }

    /// Last `limit` messages, oldest first
    pub async fn fetch_history(&self, limit: usize) -> Vec<Message> {
        self.state.lock().await.log.tail(limit)
    }

    /// Alphabetically sorted names of users online
    pub async fn list_online(&self) -> Vec<String> {
        self.state.lock().await.registry.list()
    }

    /// Aggregate statistics snapshot
    pub async fn statistics(&self) -> StatsSnapshot {
        let state = self.state.lock().await;
        state.stats.snapshot(state.registry.len())
    }

    /// Run one reaper cycle as of `now`
    ///
    /// Evicts every user idle longer than the configured timeout, clears
    /// each one's rate window and appends the inactivity notice. Returns the
    /// evicted names.
    pub async fn sweep_idle(&self, now: Instant) -> Vec<String> {
        let mut state = self.state.lock().await;

        let mut evicted = state.registry.idle_since(self.config.idle_timeout, now);
        evicted.sort();

        for name in &evicted {
            state.registry.remove(name);
            state.limiter.clear(name);
            state.append_notice(format!("{} disconnected (inactivity)", name));
            tracing::info!(user = %name, "User evicted for inactivity");
        }

        evicted
    }

    /// Spawn the periodic inactivity reaper
    ///
    /// Runs one sweep per configured interval. A sweep's outcome never
    /// terminates the loop and never reaches foreground callers. Returns a
    /// handle that can be used to abort the task.
    pub fn spawn_reaper_task(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let hub = Arc::clone(self);
        let interval = hub.config.reaper_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let evicted = hub.sweep_idle(Instant::now()).await;
                if !evicted.is_empty() {
                    tracing::debug!(count = evicted.len(), "Reaper cycle evicted users");
                }
            }
        })
    }
}

impl Default for ChatHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::hub::message::MessageKind;

    #[tokio::test]
    async fn test_register_and_welcome() {
        let hub = ChatHub::new();

        let welcome = hub.register_user("alice").await.unwrap();
        assert_eq!(welcome.greeting, "Welcome, alice!");
        assert_eq!(welcome.online_count, 1);

        assert_eq!(hub.list_online().await, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_register_duplicate_name() {
        let hub = ChatHub::new();

        hub.register_user("alice").await.unwrap();
        let err = hub.register_user("alice").await.unwrap_err();
        assert_eq!(err, Rejection::NameTaken("alice".to_string()));
    }

    #[tokio::test]
    async fn test_register_invalid_name() {
        let hub = ChatHub::new();

        assert!(matches!(
            hub.register_user("ab").await,
            Err(Rejection::InvalidName(_))
        ));
        assert!(matches!(
            hub.register_user("admin").await,
            Err(Rejection::InvalidName(_))
        ));
        // Nothing was registered, no notice appended
        assert!(hub.fetch_history(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_registration_single_winner() {
        let hub = Arc::new(ChatHub::new());

        let (a, b) = tokio::join!(hub.register_user("alice"), hub.register_user("alice"));
        assert!(a.is_ok() != b.is_ok());
        assert_eq!(hub.list_online().await.len(), 1);
    }

    #[tokio::test]
    async fn test_send_positions_strictly_increase() {
        let hub = ChatHub::new();
        hub.register_user("alice").await.unwrap();

        let mut last = hub.send_message("alice", "first").await.unwrap();
        for i in 0..5 {
            let pos = hub
                .send_message("alice", &format!("message {}", i))
                .await
                .unwrap();
            assert!(pos > last);
            last = pos;
        }

        // Log iteration order matches position order
        let (messages, _) = hub.fetch_new("alice", 0).await;
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents[0], "alice joined");
        assert_eq!(contents[1], "first");
        assert_eq!(contents[2], "message 0");
    }

    #[tokio::test]
    async fn test_send_validates_content() {
        let hub = ChatHub::new();
        hub.register_user("alice").await.unwrap();

        assert!(matches!(
            hub.send_message("alice", "   ").await,
            Err(Rejection::InvalidContent(_))
        ));
        assert!(matches!(
            hub.send_message("alice", &"x".repeat(501)).await,
            Err(Rejection::InvalidContent(_))
        ));
        assert!(matches!(
            hub.send_message("alice", "bad\rline").await,
            Err(Rejection::InvalidContent(_))
        ));
    }

    #[tokio::test]
    async fn test_send_rate_limited() {
        let config = HubConfig::default().rate_limit(3);
        let hub = ChatHub::with_config(config);
        hub.register_user("alice").await.unwrap();

        for i in 0..3 {
            hub.send_message("alice", &format!("m{}", i)).await.unwrap();
        }

        let err = hub.send_message("alice", "one too many").await.unwrap_err();
        assert_eq!(err, Rejection::RateLimited { limit: 3 });
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let hub = ChatHub::new();
        hub.register_user("alice").await.unwrap();

        hub.disconnect_user("alice").await;
        hub.disconnect_user("alice").await;

        // Exactly one "left" notice
        let history = hub.fetch_history(10).await;
        let left: Vec<_> = history
            .iter()
            .filter(|m| m.content == "alice left")
            .collect();
        assert_eq!(left.len(), 1);
        assert!(hub.list_online().await.is_empty());
    }

    #[tokio::test]
    async fn test_history_matches_tail() {
        let hub = ChatHub::new();
        hub.register_user("alice").await.unwrap();

        for i in 0..10 {
            hub.send_message("alice", &format!("message {}", i))
                .await
                .unwrap();
        }

        let history = hub.fetch_history(3).await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "message 7");
        assert_eq!(history[2].content, "message 9");
    }

    #[tokio::test]
    async fn test_retention_cap() {
        let config = HubConfig::default().log_capacity(5);
        let hub = ChatHub::with_config(config);
        hub.register_user("alice").await.unwrap();

        for i in 0..20 {
            hub.send_message("alice", &format!("message {}", i))
                .await
                .unwrap();
        }

        let (messages, _) = hub.fetch_new("alice", 0).await;
        assert_eq!(messages.len(), 5);
        // The first returned message is the oldest still retained
        assert_eq!(messages[0].content, "message 15");
    }

    #[tokio::test]
    async fn test_alice_scenario() {
        let hub = ChatHub::new();

        let welcome = hub.register_user("alice").await.unwrap();
        assert_eq!(welcome.greeting, "Welcome, alice!");

        let err = hub.register_user("alice").await.unwrap_err();
        assert_eq!(err, Rejection::NameTaken("alice".to_string()));

        hub.send_message("alice", "hi").await.unwrap();

        let (messages, cursor) = hub.fetch_new("alice", 0).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].kind, MessageKind::System);
        assert_eq!(messages[0].content, "alice joined");
        assert_eq!(messages[1].content, "hi");
        assert_eq!(cursor, 2);

        let (messages, cursor) = hub.fetch_new("alice", cursor).await;
        assert!(messages.is_empty());
        assert_eq!(cursor, 2);
    }

    #[tokio::test]
    async fn test_reaper_scenario() {
        let hub = ChatHub::new();
        hub.register_user("bob").await.unwrap();

        // 301 seconds with no activity from bob
        let evicted = hub
            .sweep_idle(Instant::now() + Duration::from_secs(301))
            .await;
        assert_eq!(evicted, vec!["bob"]);

        assert!(hub.list_online().await.is_empty());
        let history = hub.fetch_history(10).await;
        let last = history.last().unwrap();
        assert_eq!(last.content, "bob disconnected (inactivity)");
        assert_eq!(last.kind, MessageKind::System);
    }

    #[tokio::test]
    async fn test_sweep_spares_active_users() {
        let hub = ChatHub::new();
        hub.register_user("alice").await.unwrap();
        hub.register_user("bob").await.unwrap();

        // alice polls 200s in, which counts as activity
        let later = Instant::now() + Duration::from_secs(200);
        {
            let mut state = hub.state.lock().await;
            state.registry.touch("alice", later);
        }

        let evicted = hub
            .sweep_idle(Instant::now() + Duration::from_secs(301))
            .await;
        assert_eq!(evicted, vec!["bob"]);
        assert_eq!(hub.list_online().await, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_reregistration_after_eviction() {
        let hub = ChatHub::new();
        hub.register_user("bob").await.unwrap();
        hub.sweep_idle(Instant::now() + Duration::from_secs(301))
            .await;

        // The name is free again; a fresh session may claim it
        let welcome = hub.register_user("bob").await.unwrap();
        assert_eq!(welcome.online_count, 1);
    }

    #[tokio::test]
    async fn test_reaper_task_evicts() {
        let config = HubConfig::default()
            .idle_timeout(Duration::from_millis(50))
            .reaper_interval(Duration::from_millis(20));
        let hub = Arc::new(ChatHub::with_config(config));

        hub.register_user("bob").await.unwrap();
        let handle = hub.spawn_reaper_task();

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(hub.list_online().await.is_empty());

        handle.abort();
    }

    #[tokio::test]
    async fn test_statistics() {
        let hub = ChatHub::new();

        hub.register_user("alice").await.unwrap();
        hub.register_user("bob").await.unwrap();
        hub.send_message("alice", "hi").await.unwrap();
        hub.disconnect_user("bob").await;

        let stats = hub.statistics().await;
        assert_eq!(stats.online_count, 1);
        assert_eq!(stats.total_registrations, 2);
        assert_eq!(stats.peak_users, 2);
        // Two join notices, one chat message, one leave notice
        assert_eq!(stats.total_messages, 4);
    }

    #[tokio::test]
    async fn test_ping() {
        let hub = ChatHub::new();
        assert!(hub.ping().await);
    }
}
