//! Bounded battle log.

use std::collections::VecDeque;

/// Default number of lines kept.
pub const DEFAULT_LOG_CAPACITY: usize = 12;

/// Sliding window over the most recent battle messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl BattleLog {
    /// Empty log holding at most `capacity` lines (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a message tagged with its round, evicting the oldest line on
    /// overflow.
    pub fn push(&mut self, round: u32, message: &str) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(format!("Turn {round}: {message}"));
    }

    /// Lines oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Most recent line.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Number of lines held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of lines.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
