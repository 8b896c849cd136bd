//! TCP front-end for the chat hub
//!
//! A thin shell around [`crate::hub::ChatHub`]: the listener accepts
//! connections and each [`connection::Connection`] translates wire requests
//! into hub operations, one synchronous request-response exchange per line.

pub mod config;
pub mod connection;
pub mod listener;

pub use config::ServerConfig;
pub use connection::Connection;
pub use listener::ChatServer;
