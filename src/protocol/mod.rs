//! Wire protocol between clients and the hub
//!
//! Newline-delimited JSON over a byte stream: one [`message::Request`] line
//! in, exactly one [`message::Response`] line out. The framing lives in
//! [`codec::Wire`] and works over anything `AsyncRead + AsyncWrite`, which
//! keeps the codec testable without sockets.

pub mod codec;
pub mod message;

pub use codec::{Wire, DEFAULT_MAX_FRAME};
pub use message::{Request, Response};
