//! Undo/redo history of note content.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Result, TallyError};

/// Maximum number of undo entries to keep by default
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A content snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    fn new(content: String) -> Self {
        HistoryEntry {
            content,
            timestamp: Utc::now(),
        }
    }
}

/// Linear content history for one note.
///
/// Recording a new snapshot discards anything that could have been redone.
#[derive(Clone, Debug)]
pub struct History {
    current: HistoryEntry,
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    limit: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(initial: impl Into<String>, limit: usize) -> Self {
        History {
            current: HistoryEntry::new(initial.into()),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> &str {
        &self.current.content
    }

    /// Record a new snapshot. Recording the current content is a no-op.
    pub fn record(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content == self.current.content {
            return;
        }
        let previous = std::mem::replace(&mut self.current, HistoryEntry::new(content));
        self.undo_stack.push(previous);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.limit {
            let overflow = self.undo_stack.len() - self.limit;
            self.undo_stack.drain(..overflow);
            debug!(dropped = overflow, limit = self.limit, "history limit reached");
        }
    }

    pub fn undo(&mut self) -> Result<&str> {
        let entry = self.undo_stack.pop().ok_or(TallyError::NothingToUndo)?;
        let current = std::mem::replace(&mut self.current, entry);
        self.redo_stack.push(current);
        Ok(&self.current.content)
    }

    pub fn redo(&mut self) -> Result<&str> {
        let entry = self.redo_stack.pop().ok_or(TallyError::NothingToRedo)?;
        let current = std::mem::replace(&mut self.current, entry);
        self.undo_stack.push(current);
        Ok(&self.current.content)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo() {
        let mut history = History::new("a");
        history.record("ab");
        history.record("abc");

        assert_eq!(history.undo().unwrap(), "ab");
        assert_eq!(history.undo().unwrap(), "a");
        assert!(matches!(history.undo(), Err(TallyError::NothingToUndo)));

        assert_eq!(history.redo().unwrap(), "ab");
        assert_eq!(history.redo().unwrap(), "abc");
        assert!(matches!(history.redo(), Err(TallyError::NothingToRedo)));
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new("a");
        history.record("b");
        history.undo().unwrap();
        history.record("c");
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap(), "a");
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit("0", 3);
        for n in 1..=5 {
            history.record(n.to_string());
        }
        assert_eq!(history.undo().unwrap(), "4");
        assert_eq!(history.undo().unwrap(), "3");
        assert_eq!(history.undo().unwrap(), "2");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_duplicate_record_is_ignored() {
        let mut history = History::new("a");
        history.record("a");
        assert!(!history.can_undo());
    }
}
