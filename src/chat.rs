//! Bounded chat and server-log history for the room panel.

use std::collections::VecDeque;

use crate::protocol::{ChatEntry, LogLevel};

/// Default number of lines kept before the oldest are evicted.
pub const DEFAULT_CHAT_HISTORY_LIMIT: usize = 200;

/// A stored line with its arrival sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub seq: u64,
    pub entry: ChatEntry,
}

#[derive(Debug, Clone)]
pub struct ChatLog {
    lines: VecDeque<ChatLine>,
    limit: usize,
    next_seq: u64,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::with_limit(DEFAULT_CHAT_HISTORY_LIMIT)
    }
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log holding at most `limit` lines (clamped to at least 1).
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            lines: VecDeque::with_capacity(limit.min(DEFAULT_CHAT_HISTORY_LIMIT)),
            limit,
            next_seq: 0,
        }
    }

    /// Append an entry, evicting the oldest line when full. Returns its
    /// sequence number.
    pub fn push(&mut self, entry: ChatEntry) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.lines.len() == self.limit {
            self.lines.pop_front();
        }
        self.lines.push_back(ChatLine { seq, entry });
        seq
    }

    /// Append a server log line at `level`.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) -> u64 {
        self.push(ChatEntry::Log {
            level,
            message: message.into(),
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &ChatLine> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&ChatLine> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn chat(message: &str) -> ChatEntry {
        ChatEntry::Chat {
            name: "Alice".into(),
            message: message.into(),
        }
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut log = ChatLog::with_limit(2);
        log.push(chat("one"));
        log.push(chat("two"));
        log.push(chat("three"));

        let seqs: Vec<u64> = log.lines().map(|line| line.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(log.last().unwrap().entry, chat("three"));
    }

    #[test]
    fn zero_limit_is_clamped() {
        let mut log = ChatLog::with_limit(0);
        log.log(LogLevel::Info, "a");
        log.log(LogLevel::Warning, "b");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn sequence_survives_clear() {
        let mut log = ChatLog::new();
        log.push(chat("hi"));
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.push(chat("again")), 1);
    }
}
