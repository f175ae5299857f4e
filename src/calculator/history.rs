//! Calculation history, newest first.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_HISTORY_ITEMS: usize = 50;

/// A finished calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The expression as it was shown, e.g. `5 + 3` or `sin(30)`.
    pub expression: String,
    /// The rounded result.
    pub result: f64,
    /// When the calculation completed.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: f64) -> Self {
        Self {
            expression: expression.into(),
            result,
            timestamp: Utc::now(),
        }
    }
}

/// Bounded list of calculations. Pushing past the cap drops the oldest.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_items: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_ITEMS)
    }
}

impl History {
    pub fn new(max_items: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_items: max_items.max(1),
        }
    }

    /// Rebuild history from stored entries, already ordered newest first.
    pub fn from_entries(entries: Vec<HistoryEntry>, max_items: usize) -> Self {
        let mut history = Self::new(max_items);
        history.entries = entries.into();
        history.entries.truncate(history.max_items);
        history
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.max_items);
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    pub fn set_max_items(&mut self, max_items: usize) {
        self.max_items = max_items.max(1);
        self.entries.truncate(self.max_items);
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }
}
