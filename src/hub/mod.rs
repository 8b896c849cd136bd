//! The chat hub core
//!
//! Everything with real concurrency and invariants lives here: the user
//! registry, the bounded message log with reader-held cursors, the
//! per-sender rate limiter and the inactivity reaper, composed behind the
//! [`ChatHub`] façade. The transport shell and the terminal client are thin
//! consumers of this module.
//!
//! # Architecture
//!
//! ```text
//!                         Arc<ChatHub>
//!                  ┌──────────────────────────┐
//!                  │ Mutex<HubState> {        │
//!                  │   registry: UserRegistry │
//!                  │   log:      MessageLog   │
//!                  │   limiter:  RateLimiter  │
//!                  │   stats:    HubStats     │
//!                  │ }                        │
//!                  └────────────┬─────────────┘
//!                               │
//!          ┌────────────────────┼────────────────────┐
//!          │                    │                    │
//!          ▼                    ▼                    ▼
//!     [Sender]              [Poller]             [Reaper]
//!     send_message()        fetch_new(cursor)    sweep_idle()
//!          │                    │                  every 30s
//!          └──► log.append() ──►└─ cursor owned by each reader
//! ```
//!
//! # Delivery model
//!
//! Delivery is pull-based by design. The log tracks no per-reader state;
//! every reader polls with its own cursor and a reader that falls behind
//! retention is clamped forward, silently losing the gap.

pub mod config;
pub mod limiter;
pub mod log;
pub mod message;
pub mod registry;
pub mod reject;
pub mod stats;
pub mod store;
pub mod validate;

pub use config::HubConfig;
pub use limiter::RateLimiter;
pub use log::MessageLog;
pub use message::{Message, MessageKind, Welcome, SYSTEM_SENDER};
pub use registry::UserRegistry;
pub use reject::Rejection;
pub use stats::{format_duration, HubStats, StatsSnapshot};
pub use store::ChatHub;
