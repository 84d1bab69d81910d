use chrono::{DateTime, Local};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub reward: String,
    pub index: usize,
    pub at: DateTime<Local>,
}

/// Completed spins, newest first
pub struct ResultHistory {
    entries: VecDeque<ResultEntry>,
    max_size: usize,
}

impl ResultHistory {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    pub fn record(&mut self, reward: &str, index: usize) {
        self.push(ResultEntry {
            reward: reward.to_string(),
            index,
            at: Local::now(),
        });
    }

    pub fn push(&mut self, entry: ResultEntry) {
        if self.max_size == 0 {
            return;
        }

        self.entries.push_front(entry);

        // Trim to max size
        while self.entries.len() > self.max_size {
            self.entries.pop_back();
        }
    }

    pub fn latest(&self) -> Option<&ResultEntry> {
        self.entries.front()
    }

    pub fn get_all(&self) -> &VecDeque<ResultEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_entries_first() {
        let mut history = ResultHistory::new(2);
        assert!(history.latest().is_none());

        history.record("10", 0);
        history.record("20", 1);
        history.record("30", 2);

        assert_eq!(history.len(), 2);
        let rewards: Vec<&str> = history.get_all().iter().map(|e| e.reward.as_str()).collect();
        assert_eq!(rewards, vec!["30", "20"]);
        assert_eq!(history.latest().map(|e| e.index), Some(2));
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = ResultHistory::new(0);
        history.record("10", 0);
        assert!(history.is_empty());
    }
}
