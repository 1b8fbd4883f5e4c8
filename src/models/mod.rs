use serde::Deserialize;

use crate::engine::{self, Options};

/// Top level config file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub suggest: SuggestConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub address: String,
}

/// Paths to persisted state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub words: String,
    #[serde(default)]
    pub frequencies: String,
    #[serde(default)]
    pub recent: String,
}

/// Ranking tunables. 0 means "use the default".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestConfig {
    #[serde(default)]
    pub candidate_limit: usize,
    #[serde(default)]
    pub top_k: usize,
    #[serde(default)]
    pub recent_max: usize,
}

pub const DEFAULT_ADDRESS: &str = "127.0.0.1:9090";
pub const DEFAULT_WORDS: &str = "words.txt";
pub const DEFAULT_FREQUENCIES: &str = "freq.json";
pub const DEFAULT_RECENT: &str = "recent.json";

impl AppConfig {
    pub fn address(&self) -> &str {
        or_default(&self.address, DEFAULT_ADDRESS)
    }
}

impl DataConfig {
    pub fn words(&self) -> &str {
        or_default(&self.words, DEFAULT_WORDS)
    }

    pub fn frequencies(&self) -> &str {
        or_default(&self.frequencies, DEFAULT_FREQUENCIES)
    }

    pub fn recent(&self) -> &str {
        or_default(&self.recent, DEFAULT_RECENT)
    }
}

impl SuggestConfig {
    pub fn options(&self) -> Options {
        let d = Options::default();
        Options {
            candidate_limit: nonzero_or(self.candidate_limit, d.candidate_limit),
            top_k: nonzero_or(self.top_k, d.top_k),
            recent_max: nonzero_or(self.recent_max, engine::recency::DEFAULT_RECENT_MAX),
        }
    }
}

fn or_default<'a>(v: &'a str, def: &'a str) -> &'a str {
    if v.is_empty() {
        def
    } else {
        v
    }
}

fn nonzero_or(v: usize, def: usize) -> usize {
    if v == 0 {
        def
    } else {
        v
    }
}
