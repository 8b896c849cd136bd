//! Bounded append-only message log
//!
//! Positions are ever-growing sequence numbers assigned at append time and
//! never reused. Physically the log retains only the most recent `capacity`
//! messages; a reader whose cursor points at an evicted position is clamped
//! forward to the oldest retained message and silently loses the gap.
//!
//! The log holds no per-reader state: each reader supplies and owns its own
//! cursor, which trivially supports any number of concurrent pollers.

use std::collections::VecDeque;

use super::message::Message;

/// Ordered, bounded sequence of messages with monotonic positions
#[derive(Debug)]
pub struct MessageLog {
    /// Retained messages, oldest first
    entries: VecDeque<Message>,

    /// Position of the front entry
    base: u64,

    /// Retention capacity
    capacity: usize,
}

impl MessageLog {
    /// Create a log with the default capacity (100)
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Create a log retaining at most `capacity` messages
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            base: 0,
            capacity: capacity.max(1),
        }
    }

    /// Append a message, returning its assigned position
    ///
    /// Evicts from the front until the log is back within capacity.
    pub fn append(&mut self, message: Message) -> u64 {
        let position = self.base + self.entries.len() as u64;
        self.entries.push_back(message);

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.base += 1;
        }

        position
    }

    /// Read all messages at or after `position`, in order
    ///
    /// Returns the messages and the cursor to request next time. A position
    /// already evicted is clamped to the oldest retained one; a position at
    /// or past the head returns an empty batch with the cursor unchanged.
    pub fn read_from(&self, position: u64) -> (Vec<Message>, u64) {
        let head = self.base + self.entries.len() as u64;

        if position >= head {
            return (Vec::new(), position);
        }

        let start = position.max(self.base);
        let skip = (start - self.base) as usize;
        let messages: Vec<Message> = self.entries.iter().skip(skip).cloned().collect();

        (messages, head)
    }

    /// Last `limit` messages (or fewer), oldest first
    pub fn tail(&self, limit: usize) -> Vec<Message> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Number of retained messages
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retention capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Position of the oldest retained message
    pub fn oldest_position(&self) -> u64 {
        self.base
    }

    /// Position the next append will receive
    pub fn next_position(&self) -> u64 {
        self.base + self.entries.len() as u64
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(n: u64) -> Message {
        Message::normal("alice", format!("message {}", n))
    }

    #[test]
    fn test_positions_strictly_increase() {
        let mut log = MessageLog::new();

        for i in 0..5 {
            assert_eq!(log.append(msg(i)), i);
        }
        assert_eq!(log.next_position(), 5);
    }

    #[test]
    fn test_capacity_enforced() {
        let mut log = MessageLog::with_capacity(3);

        for i in 0..10 {
            log.append(msg(i));
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.oldest_position(), 7);
        // Positions keep growing past evictions
        assert_eq!(log.append(msg(10)), 10);
    }

    #[test]
    fn test_read_from_clamps_evicted_positions() {
        let mut log = MessageLog::with_capacity(3);

        for i in 0..10 {
            log.append(msg(i));
        }

        // Position 0 was evicted long ago; reader is clamped to the oldest
        // retained entry and never sees more than capacity messages
        let (messages, next) = log.read_from(0);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "message 7");
        assert_eq!(next, 10);
    }

    #[test]
    fn test_read_from_incremental() {
        let mut log = MessageLog::new();
        log.append(msg(0));
        log.append(msg(1));

        let (messages, next) = log.read_from(0);
        assert_eq!(messages.len(), 2);
        assert_eq!(next, 2);

        log.append(msg(2));
        let (messages, next) = log.read_from(next);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "message 2");
        assert_eq!(next, 3);
    }

    #[test]
    fn test_read_from_head_returns_empty_unchanged() {
        let mut log = MessageLog::new();
        log.append(msg(0));

        let (messages, next) = log.read_from(1);
        assert!(messages.is_empty());
        assert_eq!(next, 1);

        // A cursor past the head is also left untouched
        let (messages, next) = log.read_from(42);
        assert!(messages.is_empty());
        assert_eq!(next, 42);
    }

    #[test]
    fn test_tail() {
        let mut log = MessageLog::new();
        for i in 0..5 {
            log.append(msg(i));
        }

        let tail = log.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].content, "message 3");
        assert_eq!(tail[1].content, "message 4");

        // Asking for more than is stored returns everything
        assert_eq!(log.tail(100).len(), 5);
    }

    #[test]
    fn test_empty_log() {
        let log = MessageLog::new();

        assert!(log.is_empty());
        let (messages, next) = log.read_from(0);
        assert!(messages.is_empty());
        assert_eq!(next, 0);
        assert!(log.tail(10).is_empty());
    }
}
