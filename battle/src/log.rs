//! Bounded battle log

use std::collections::VecDeque;

/// First line of every fresh (or reset) battle log
pub const STARTER_LINES: [&str; 2] = [
    "Battle started. Drag a friendly card onto an enemy card to attack.",
    "Each of your three cards acts once per turn, then enemies counterattack.",
];

/// Append-only log that keeps only the most recent lines
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    lines: VecDeque<String>,
    retention: usize,
}

impl BattleLog {
    /// Create an empty log keeping at most `retention` lines
    pub fn new(retention: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(retention),
            retention: retention.max(1),
        }
    }

    /// Create a log holding the two starter lines
    pub fn with_starter(retention: usize) -> Self {
        let mut log = Self::new(retention);
        log.extend(STARTER_LINES.iter().map(|line| line.to_string()));
        log
    }

    /// Append a line, evicting the oldest beyond retention
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > self.retention {
            self.lines.pop_front();
        }
    }

    pub fn extend<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        for line in lines {
            self.push(line);
        }
    }

    /// Lines from oldest to newest
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_lines() {
        let log = BattleLog::with_starter(16);
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines, STARTER_LINES.to_vec());
    }

    #[test]
    fn test_evicts_oldest() {
        let mut log = BattleLog::new(3);
        for i in 0..5 {
            log.push(format!("line {}", i));
        }

        assert_eq!(log.len(), 3);
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
        assert_eq!(log.latest(), Some("line 4"));
    }

    #[test]
    fn test_zero_retention_keeps_one_line() {
        let mut log = BattleLog::new(0);
        log.push("a");
        log.push("b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest(), Some("b"));
    }
}
