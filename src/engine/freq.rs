use std::collections::HashMap;

/// Per-word usage counters keyed by the full word.
#[derive(Debug, Clone, Default)]
pub struct FrequencyStore {
    counts: HashMap<String, u64>,
}

impl FrequencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for `word`, 0 if unknown.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Bump the count, creating the entry if needed. Returns the new count.
    pub fn increment(&mut self, word: &str) -> u64 {
        let c = self.counts.entry(word.to_string()).or_insert(0);
        *c = c.saturating_add(1);
        *c
    }

    /// Create a zero entry if absent.
    pub fn ensure(&mut self, word: &str) {
        if !self.counts.contains_key(word) {
            self.counts.insert(word.to_string(), 0);
        }
    }

    /// Set a count directly. Used when loading persisted state.
    pub fn set(&mut self, word: impl Into<String>, count: u64) {
        self.counts.insert(word.into(), count);
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        let mut f = FrequencyStore::new();
        assert_eq!(f.get("a"), 0);
        assert!(!f.contains("a"));

        f.ensure("a");
        assert!(f.contains("a"));
        assert_eq!(f.get("a"), 0);

        assert_eq!(f.increment("a"), 1);
        assert_eq!(f.increment("b"), 1);

        // ensure() never resets.
        f.ensure("a");
        assert_eq!(f.get("a"), 1);
        assert_eq!(f.len(), 2);
    }
}
