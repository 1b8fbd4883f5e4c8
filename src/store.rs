use std::{
    collections::BTreeMap,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::engine::{FrequencyStore, RecencyLog};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error encoding {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Locations of the dictionary, frequency table and recency list on disk.
#[derive(Debug, Clone)]
pub struct Store {
    pub words: PathBuf,
    pub frequencies: PathBuf,
    pub recent: PathBuf,
}

impl Store {
    pub fn new(
        words: impl Into<PathBuf>,
        frequencies: impl Into<PathBuf>,
        recent: impl Into<PathBuf>,
    ) -> Self {
        Self {
            words: words.into(),
            frequencies: frequencies.into(),
            recent: recent.into(),
        }
    }

    /// Read the raw dictionary lines. A missing file yields an empty vocabulary.
    pub fn load_words(&self) -> Vec<String> {
        match fs::read_to_string(&self.words) {
            Ok(s) => s.lines().map(str::to_string).collect(),
            Err(e) => {
                log::warn!(
                    "dictionary {} not readable ({}), starting with an empty vocabulary",
                    self.words.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Load the word -> count table. Missing or malformed files yield an
    /// empty table. Integral floats such as `3.0` are accepted, other
    /// non-integer or negative entries are skipped.
    pub fn load_frequencies(&self) -> FrequencyStore {
        let mut out = FrequencyStore::new();

        let map: serde_json::Map<String, serde_json::Value> = match read_json(&self.frequencies) {
            Some(m) => m,
            None => return out,
        };

        for (word, v) in map {
            match as_count(&v) {
                Some(n) => out.set(word, n),
                None => log::warn!("skipping invalid frequency for {:?}: {}", word, v),
            }
        }

        out
    }

    /// Load the recency list, oldest first. Non-string items are skipped.
    pub fn load_recent(&self) -> Vec<String> {
        let items: Vec<serde_json::Value> = match read_json(&self.recent) {
            Some(v) => v,
            None => return Vec::new(),
        };

        items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn save_frequencies(&self, freq: &FrequencyStore) -> Result<(), Error> {
        let sorted: BTreeMap<&String, &u64> = freq.iter().collect();
        write_json(&self.frequencies, &sorted)
    }

    pub fn save_recent(&self, recent: &RecencyLog) -> Result<(), Error> {
        let items: Vec<&String> = recent.iter().collect();
        write_json(&self.recent, &items)
    }

    /// Append a word to the end of the dictionary file, creating it if needed.
    pub fn append_word(&self, word: &str) -> Result<(), Error> {
        let io_err = |source| Error::Io {
            path: self.words.clone(),
            source,
        };

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.words)
            .map_err(io_err)?;
        writeln!(f, "{}", word).map_err(io_err)
    }
}

/// A non-negative integer count, allowing integral floats.
fn as_count(v: &serde_json::Value) -> Option<u64> {
    v.as_u64().or_else(|| {
        v.as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Read and decode a JSON file, logging and returning None on any failure.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("{} not found, starting fresh", path.display());
            return None;
        }
        Err(e) => {
            log::warn!("error reading {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), Error> {
    let body = serde_json::to_string_pretty(data).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, body).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> Store {
        Store::new(
            dir.join("words.txt"),
            dir.join("freq.json"),
            dir.join("recent.json"),
        )
    }

    #[test]
    fn missing_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());
        assert!(s.load_words().is_empty());
        assert_eq!(s.load_frequencies().len(), 0);
        assert!(s.load_recent().is_empty());
    }

    #[test]
    fn tolerates_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());

        fs::write(&s.frequencies, "{not json").unwrap();
        fs::write(&s.recent, r#"["a", 3, null, "b"]"#).unwrap();
        assert_eq!(s.load_frequencies().len(), 0);
        assert_eq!(s.load_recent(), vec!["a", "b"]);

        fs::write(&s.frequencies, r#"{"a": 2, "b": -1, "c": "x", "d": 0}"#).unwrap();
        let f = s.load_frequencies();
        assert_eq!(f.len(), 2);
        assert_eq!(f.get("a"), 2);
        assert!(f.contains("d"));
        assert!(!f.contains("b"));
    }

    #[test]
    fn accepts_integral_floats() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());

        fs::write(&s.frequencies, r#"{"a": 3.0, "b": 2.5, "c": -1.0, "d": 1e2}"#).unwrap();
        let f = s.load_frequencies();
        assert_eq!(f.get("a"), 3);
        assert_eq!(f.get("d"), 100);
        assert!(!f.contains("b"));
        assert!(!f.contains("c"));

        // Saved back as integers.
        s.save_frequencies(&f).unwrap();
        let raw = fs::read_to_string(&s.frequencies).unwrap();
        assert!(raw.contains("\"a\": 3"));
        assert!(!raw.contains("3.0"));
    }

    #[test]
    fn saves_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());

        let mut f = FrequencyStore::new();
        f.set("अनार", 3);
        f.set("apple", 0);
        s.save_frequencies(&f).unwrap();

        let mut r = RecencyLog::new(20);
        r.record("अनार");
        r.record("apple");
        s.save_recent(&r).unwrap();

        let f2 = s.load_frequencies();
        assert_eq!(f2.get("अनार"), 3);
        assert!(f2.contains("apple"));
        assert_eq!(s.load_recent(), vec!["अनार", "apple"]);
    }

    #[test]
    fn appends_words() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());

        fs::write(&s.words, "# header\napple\n").unwrap();
        s.append_word("अनार").unwrap();
        assert_eq!(s.load_words(), vec!["# header", "apple", "अनार"]);
    }
}
