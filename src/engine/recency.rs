use std::collections::VecDeque;

/// Default number of selections remembered.
pub const DEFAULT_RECENT_MAX: usize = 20;

/// Bounded, oldest-first log of recently selected words. Duplicates are kept.
#[derive(Debug, Clone)]
pub struct RecencyLog {
    words: VecDeque<String>,
    max: usize,
}

impl Default for RecencyLog {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_MAX)
    }
}

impl RecencyLog {
    pub fn new(max: usize) -> Self {
        Self {
            words: VecDeque::with_capacity(max + 1),
            max,
        }
    }

    /// Build a log from persisted words (oldest first), keeping only the newest `max`.
    pub fn from_words(words: impl IntoIterator<Item = String>, max: usize) -> Self {
        let mut log = Self::new(max);
        for w in words {
            log.record(w);
        }
        log
    }

    pub fn record(&mut self, word: impl Into<String>) {
        self.words.push_back(word.into());
        while self.words.len() > self.max {
            self.words.pop_front();
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_twenty() {
        let mut log = RecencyLog::default();
        for i in 0..25 {
            log.record(format!("w{}", i));
        }

        assert_eq!(log.len(), 20);
        let got: Vec<&String> = log.iter().collect();
        let want: Vec<String> = (5..25).map(|i| format!("w{}", i)).collect();
        assert_eq!(got, want.iter().collect::<Vec<_>>());
        assert!(!log.contains("w4"));
        assert!(log.contains("w5"));
    }

    #[test]
    fn keeps_duplicates() {
        let mut log = RecencyLog::new(3);
        log.record("a");
        log.record("a");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn loading_truncates_to_newest() {
        let words = ["a", "b", "c", "d"].map(String::from);
        let log = RecencyLog::from_words(words, 2);
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["c", "d"]);
    }
}
