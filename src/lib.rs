//! Shared chat hub library
//!
//! A single authoritative hub process accepts registrations, admits
//! messages under per-sender rate limiting, serves history to any number of
//! polling readers and evicts inactive participants in the background. The
//! crate ships both sides of the wire:
//!
//! - [`hub`] — the in-memory core: registry, bounded message log with
//!   reader-held cursors, sliding-window rate limiter, inactivity reaper
//! - [`server`] — TCP front-end translating wire requests into hub calls
//! - [`client`] — typed client with connect retries and cursor tracking
//! - [`protocol`] — newline-delimited JSON request/response framing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chathub_rs::{ChatHub, ChatServer, ServerConfig};
//!
//! # async fn example() -> chathub_rs::Result<()> {
//! let hub = Arc::new(ChatHub::new());
//! let server = ChatServer::new(ServerConfig::default(), hub);
//! server.run().await
//! # }
//! ```

pub mod client;
pub mod error;
pub mod hub;
pub mod protocol;
pub mod server;

pub use client::{ClientConfig, HubClient};
pub use error::{Error, Result};
pub use hub::{ChatHub, HubConfig, Message, MessageKind, Rejection, StatsSnapshot, Welcome};
pub use server::{ChatServer, ServerConfig};
