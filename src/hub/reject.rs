//! Application-level rejections
//!
//! A [`Rejection`] is an expected admission-control or validation outcome,
//! reported synchronously to the caller with a human-readable reason. It is
//! deliberately a separate type from [`crate::error::Error`]: a rejection is
//! never a transport failure and is never logged as a server-side error.

/// Reason a hub operation refused a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Username failed syntactic validation
    InvalidName(String),
    /// Username already registered (case-sensitive exact match)
    NameTaken(String),
    /// Message content failed validation
    InvalidContent(String),
    /// Sender exceeded the sliding-window message limit
    RateLimited { limit: u32 },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::InvalidName(reason) => write!(f, "Invalid name: {}", reason),
            Rejection::NameTaken(name) => write!(f, "Name already in use: {}", name),
            Rejection::InvalidContent(reason) => write!(f, "Invalid message: {}", reason),
            Rejection::RateLimited { limit } => {
                write!(f, "Limit of {} messages per minute reached, try again later", limit)
            }
        }
    }
}

impl std::error::Error for Rejection {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_readable() {
        let r = Rejection::NameTaken("alice".to_string());
        assert_eq!(r.to_string(), "Name already in use: alice");

        let r = Rejection::RateLimited { limit: 30 };
        assert!(r.to_string().contains("30 messages per minute"));
    }
}
