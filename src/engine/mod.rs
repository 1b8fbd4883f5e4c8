pub mod codec;
pub mod freq;
pub mod ranking;
pub mod recency;
pub mod script;
pub mod trie;

use std::{collections::BTreeSet, ops::Bound};

use serde::Serialize;

pub use freq::FrequencyStore;
pub use ranking::ScoredItem;
pub use recency::RecencyLog;
pub use script::Script;
pub use trie::Trie;

/// Default number of candidates pulled from the trie before scoring.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 200;

/// Default number of suggestions returned.
pub const DEFAULT_TOP_K: usize = 10;

/// Tunables for the suggestion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub candidate_limit: usize,
    pub top_k: usize,
    pub recent_max: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            top_k: DEFAULT_TOP_K,
            recent_max: recency::DEFAULT_RECENT_MAX,
        }
    }
}

/// Outcome of adding a word to the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Exists,
    /// The word can't be indexed (empty or containing NUL).
    Invalid,
}

/// Word and its usage count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordStat {
    pub word: String,
    pub freq: u64,
}

/// Is this dictionary line a comment or section marker?
pub fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("---")
}

/// The suggestion engine: the trie, the full sorted word list used by the
/// fallback scan, usage counts and the recency log.
#[derive(Debug)]
pub struct SuggestionEngine {
    opts: Options,
    trie: Trie,
    words: BTreeSet<String>,
    freq: FrequencyStore,
    recent: RecencyLog,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl SuggestionEngine {
    pub fn new(opts: Options) -> Self {
        Self {
            opts,
            trie: Trie::new(),
            words: BTreeSet::new(),
            freq: FrequencyStore::new(),
            recent: RecencyLog::new(opts.recent_max),
        }
    }

    /// Merge persisted usage counts and replace the recency log.
    /// Counted words missing from the trie are learned.
    pub fn restore(&mut self, freq: FrequencyStore, recent: Vec<String>) {
        self.recent = RecencyLog::from_words(recent, self.opts.recent_max);

        for (w, &n) in freq.iter() {
            if self.learn(w) {
                self.freq.set(w.clone(), n);
            } else {
                log::warn!("skipping undecodable counted word: {:?}", w);
            }
        }
    }

    /// Load dictionary lines. Blank, `#` and `---` lines are skipped.
    /// Returns the number of words accepted.
    pub fn load_dictionary<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut n = 0;
        for line in lines {
            let w = line.as_ref().trim();
            if is_comment(w) {
                continue;
            }
            if self.learn(w) {
                n += 1;
            } else {
                log::warn!("skipping undecodable dictionary word: {:?}", w);
            }
        }
        n
    }

    /// Insert a word into the trie and word list and make sure it has a count.
    pub fn learn(&mut self, word: &str) -> bool {
        if !self.trie.insert(word) {
            return false;
        }
        if !self.words.contains(word) {
            self.words.insert(word.to_string());
        }
        self.freq.ensure(word);
        true
    }

    /// Ranked suggestions for `prefix`.
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        self.suggest_scored(prefix)
            .into_iter()
            .map(|i| i.word)
            .collect()
    }

    /// Ranked suggestions with their scores.
    pub fn suggest_scored(&self, prefix: &str) -> Vec<ScoredItem> {
        if prefix.is_empty() {
            return Vec::new();
        }

        let script = Script::classify(prefix);
        let candidates = self.trie.collect_prefix(prefix, self.opts.candidate_limit);
        let mut items = ranking::score_candidates(
            candidates.iter().map(String::as_str),
            script,
            &self.freq,
            &self.recent,
        );

        if items.is_empty() {
            items = self.scan_scored(prefix, script);
            if !items.is_empty() {
                log::debug!("prefix {:?} ({}) served by fallback scan", prefix, script);
            }
        }

        ranking::rank(items, self.opts.top_k)
    }

    /// Byte-prefix scan over the full word list.
    fn scan_scored(&self, prefix: &str, script: Script) -> Vec<ScoredItem> {
        let matches = self
            .words
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|w| w.starts_with(prefix))
            .map(String::as_str);

        ranking::score_candidates(matches, script, &self.freq, &self.recent)
    }

    /// Register a selection: bump the count, record it as recent and learn
    /// the word if it wasn't known. Returns the new count.
    pub fn select(&mut self, word: &str) -> u64 {
        if !self.trie.contains(word) && !self.learn(word) {
            log::warn!("selected word {:?} can't be indexed", word);
        }
        let n = self.freq.increment(word);
        self.recent.record(word);
        n
    }

    /// Add a new dictionary word with a zero count.
    pub fn add_word(&mut self, word: &str) -> AddOutcome {
        if self.freq.contains(word) {
            return AddOutcome::Exists;
        }
        if !self.learn(word) {
            return AddOutcome::Invalid;
        }
        AddOutcome::Added
    }

    /// Whether the word is known to the engine.
    pub fn contains(&self, word: &str) -> bool {
        self.freq.contains(word)
    }

    /// All counted words, sorted by word.
    pub fn stats(&self) -> Vec<WordStat> {
        let mut out: Vec<WordStat> = self
            .freq
            .iter()
            .map(|(w, &f)| WordStat {
                word: w.clone(),
                freq: f,
            })
            .collect();
        out.sort_by(|a, b| a.word.cmp(&b.word));
        out
    }

    pub fn frequencies(&self) -> &FrequencyStore {
        &self.freq
    }

    pub fn recent(&self) -> &RecencyLog {
        &self.recent
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}
