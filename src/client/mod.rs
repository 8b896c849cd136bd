//! Client side of the hub boundary
//!
//! [`HubClient`] connects to a hub over TCP with bounded retries and exposes
//! the hub operations as typed calls. Application rejections come back as
//! `(false, reason)` outcomes; only transport problems are `Err`.

pub mod config;
pub mod connector;

pub use config::ClientConfig;
pub use connector::HubClient;
