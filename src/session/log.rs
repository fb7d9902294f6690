// Bounded notification log for solve output

use std::collections::VecDeque;

pub const DEFAULT_LOG_LIMIT: usize = 10_000;

/// One logged line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub text: String,
    pub kind: LogKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// A solved move, `"1 -> 3"`
    Move,
    /// A solve summary line
    Summary,
}

/// Append-only log that drops its oldest lines past `limit`
#[derive(Debug, Clone)]
pub struct MoveLog {
    lines: VecDeque<LogLine>,
    limit: usize,
    dropped: usize,
}

impl MoveLog {
    pub fn new(limit: usize) -> Self {
        MoveLog {
            lines: VecDeque::new(),
            limit: limit.max(1),
            dropped: 0,
        }
    }

    pub fn push(&mut self, kind: LogKind, text: impl Into<String>) {
        if self.lines.len() == self.limit {
            self.lines.pop_front();
            self.dropped += 1;
        }
        self.lines.push_back(LogLine {
            text: text.into(),
            kind,
        });
    }

    pub fn lines(&self) -> impl ExactSizeIterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// Lines that fell off the front
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.dropped = 0;
    }
}

impl Default for MoveLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_drops_oldest() {
        let mut log = MoveLog::new(2);
        log.push(LogKind::Move, "1 -> 3");
        log.push(LogKind::Move, "1 -> 2");
        log.push(LogKind::Summary, "Total Moves: 2");

        let texts: Vec<&str> = log.lines().map(|line| line.text.as_str()).collect();
        assert_eq!(texts, vec!["1 -> 2", "Total Moves: 2"]);
        assert_eq!(log.dropped(), 1);
    }
}
