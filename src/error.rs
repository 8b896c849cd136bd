//! Transport-level error types
//!
//! These errors cover the wire between a client and the hub: I/O failures,
//! framing problems, and protocol violations. Application-level rejections
//! (bad username, rate limit, name taken) are *not* errors — they travel as
//! [`crate::hub::Rejection`] values inside successful exchanges.

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for transport and protocol failures
#[derive(Debug)]
pub enum Error {
    /// Underlying socket I/O failed
    Io(std::io::Error),
    /// Peer closed the connection in the middle of a frame
    ConnectionClosed,
    /// A frame exceeded the configured size limit
    FrameTooLarge { len: usize, max: usize },
    /// A frame was not valid JSON for the expected type
    MalformedFrame(serde_json::Error),
    /// The hub answered a request with a reply of the wrong kind
    UnexpectedReply(String),
    /// All connection attempts to the hub failed
    HubUnreachable { attempts: u32 },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::ConnectionClosed => write!(f, "Connection closed mid-frame"),
            Error::FrameTooLarge { len, max } => {
                write!(f, "Frame too large: {} bytes (max {})", len, max)
            }
            Error::MalformedFrame(e) => write!(f, "Malformed frame: {}", e),
            Error::UnexpectedReply(what) => write!(f, "Unexpected reply: {}", what),
            Error::HubUnreachable { attempts } => {
                write!(f, "Hub unreachable after {} attempts", attempts)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::MalformedFrame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
