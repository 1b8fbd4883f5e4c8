use tokio::sync::RwLock;

use crate::{
    engine::{AddOutcome, Options, ScoredItem, SuggestionEngine, WordStat},
    store::{self, Store},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("store error: {0}")]
    Store(#[from] store::Error),
    /// The change is live in memory but couldn't be written to disk.
    #[error("applied in memory but not saved: {0}")]
    Unsaved(#[source] store::Error),
    #[error("{0}")]
    Validation(String),
}

/// Manager owns the shared suggestion engine and its on-disk state.
///
/// A single lock guards the trie, counts and recency log. Mutations persist
/// while still holding the write lock so concurrent selections never write
/// stale snapshots.
pub struct Manager {
    engine: RwLock<SuggestionEngine>,
    store: Store,
}

impl Manager {
    /// Load persisted state and build the engine.
    pub fn load(store: Store, opts: Options) -> Self {
        let mut engine = SuggestionEngine::new(opts);

        engine.restore(store.load_frequencies(), store.load_recent());
        let n = engine.load_dictionary(store.load_words());

        log::info!(
            "loaded {} dictionary words, {} counted words, {} recent selections",
            n,
            engine.frequencies().len(),
            engine.recent().len()
        );

        let trie = engine.trie();
        if trie.is_empty() {
            log::warn!("vocabulary is empty, words can be added with POST /addword");
        } else {
            log::info!(
                "indexed {} words in {} trie nodes",
                trie.len(),
                trie.node_count()
            );
        }

        Self::new(engine, store)
    }

    pub fn new(engine: SuggestionEngine, store: Store) -> Self {
        Self {
            engine: RwLock::new(engine),
            store,
        }
    }

    // #########################
    // Queries

    /// Ranked suggestions for a prefix. The prefix is trimmed.
    pub async fn suggest(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.engine.read().await.suggest(prefix)
    }

    /// Like [`Manager::suggest`] but with scores.
    pub async fn suggest_scored(&self, prefix: &str) -> Vec<ScoredItem> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.engine.read().await.suggest_scored(prefix)
    }

    pub async fn stats(&self) -> Vec<WordStat> {
        self.engine.read().await.stats()
    }

    // #########################
    // Mutations

    /// Record a selected word and persist counts and the recency log.
    /// Returns the word's new count.
    pub async fn select(&self, word: &str) -> Result<u64, Error> {
        let word = validate_word(word)?;

        let mut eng = self.engine.write().await;
        let n = eng.select(word);
        log::debug!("selected {:?} (count {})", word, n);

        self.store
            .save_frequencies(eng.frequencies())
            .and_then(|_| self.store.save_recent(eng.recent()))
            .map_err(|e| {
                log::error!("selection of {:?} applied but not saved: {}", word, e);
                Error::Unsaved(e)
            })?;
        Ok(n)
    }

    /// Add a new word to the dictionary file and the engine.
    pub async fn add_word(&self, word: &str) -> Result<AddOutcome, Error> {
        let word = validate_word(word)?;

        let mut eng = self.engine.write().await;
        if eng.contains(word) {
            return Ok(AddOutcome::Exists);
        }

        // Write to disk first so a failed append leaves the engine untouched.
        self.store.append_word(word)?;
        let out = eng.add_word(word);

        // The word is already in the dictionary file, so its zero count is
        // rebuilt on the next load even if this save fails.
        self.store.save_frequencies(eng.frequencies()).map_err(|e| {
            log::error!("added {:?} but frequencies not saved: {}", word, e);
            Error::Unsaved(e)
        })?;

        log::info!("added word {:?}", word);
        Ok(out)
    }
}

/// Trim and check a word from a request.
fn validate_word(word: &str) -> Result<&str, Error> {
    let word = word.trim();
    if word.is_empty() {
        return Err(Error::Validation("empty word".to_string()));
    }
    if word.contains(['\0', '\n', '\r']) {
        return Err(Error::Validation("word contains invalid characters".to_string()));
    }
    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(dir: &std::path::Path, words: &str) -> Manager {
        let store = Store::new(
            dir.join("words.txt"),
            dir.join("freq.json"),
            dir.join("recent.json"),
        );
        std::fs::write(&store.words, words).unwrap();
        Manager::load(store, Options::default())
    }

    #[tokio::test]
    async fn select_persists() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path(), "cart\ncars\n");

        assert_eq!(m.select(" cart ").await.unwrap(), 1);
        assert_eq!(m.suggest("car").await, vec!["cart", "cars"]);

        // Reload from disk.
        let m2 = manager(dir.path(), "cart\ncars\n");
        assert_eq!(m2.suggest("car").await, vec!["cart", "cars"]);
        let stats = m2.stats().await;
        assert_eq!(stats.iter().find(|s| s.word == "cart").unwrap().freq, 1);
    }

    #[tokio::test]
    async fn rejects_blank_words() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path(), "cart\n");

        assert!(matches!(m.select("  ").await, Err(Error::Validation(_))));
        assert!(matches!(m.add_word("").await, Err(Error::Validation(_))));
        assert!(matches!(m.add_word("a\nb").await, Err(Error::Validation(_))));
        assert!(!dir.path().join("freq.json").exists());
    }

    #[tokio::test]
    async fn add_word_appends() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path(), "# fruits\nअनार\n");

        assert_eq!(m.add_word("अमरूद").await.unwrap(), AddOutcome::Added);
        assert_eq!(m.add_word("अनार").await.unwrap(), AddOutcome::Exists);
        assert_eq!(m.suggest("अ").await, vec!["अनार", "अमरूद"]);

        let words = std::fs::read_to_string(dir.path().join("words.txt")).unwrap();
        assert_eq!(words, "# fruits\nअनार\nअमरूद\n");
    }

    #[tokio::test]
    async fn failed_save_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        let m = manager(dir.path(), "cart\ncars\n");

        // A directory where the frequency file should be makes writes fail.
        std::fs::create_dir(dir.path().join("freq.json")).unwrap();

        assert!(matches!(m.select("cars").await, Err(Error::Unsaved(_))));
        let stats = m.stats().await;
        assert_eq!(stats.iter().find(|s| s.word == "cars").unwrap().freq, 1);

        assert!(matches!(m.add_word("carp").await, Err(Error::Unsaved(_))));
        assert_eq!(m.add_word("carp").await.unwrap(), AddOutcome::Exists);

        // The dictionary append went through, so a reload still knows the word.
        let words = std::fs::read_to_string(dir.path().join("words.txt")).unwrap();
        assert!(words.ends_with("carp\n"));
    }

    #[tokio::test]
    async fn missing_dictionary_still_serves() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(
            dir.path().join("nope.txt"),
            dir.path().join("freq.json"),
            dir.path().join("recent.json"),
        );
        let m = Manager::load(store, Options::default());
        assert!(m.suggest("a").await.is_empty());

        m.add_word("apple").await.unwrap();
        assert_eq!(m.suggest("a").await, vec!["apple"]);
    }
}
