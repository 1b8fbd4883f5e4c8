use std::{cmp::Ordering, collections::HashSet};

use super::{codec, freq::FrequencyStore, recency::RecencyLog, script::Script};

const FREQ_WEIGHT: f64 = 2.0;
const RECENT_BOOST: f64 = 5.0;

/// A candidate word with its computed score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub word: String,
    pub score: f64,
}

/// `freq * 2 + 1 / max(1, len) + (5 if recently selected)`.
pub fn score(word: &str, freq: &FrequencyStore, recent: &RecencyLog) -> f64 {
    let len = codec::codepoint_count(word).max(1);
    let mut s = freq.get(word) as f64 * FREQ_WEIGHT + 1.0 / len as f64;
    if recent.contains(word) {
        s += RECENT_BOOST;
    }
    s
}

/// Dedupe candidates, drop those outside `script` and score the rest.
pub fn score_candidates<'a, I>(
    candidates: I,
    script: Script,
    freq: &FrequencyStore,
    recent: &RecencyLog,
) -> Vec<ScoredItem>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|w| seen.insert(*w))
        .filter(|w| script.matches(w))
        .map(|w| ScoredItem {
            word: w.to_string(),
            score: score(w, freq, recent),
        })
        .collect()
}

/// Score descending, then word ascending.
pub fn compare(a: &ScoredItem, b: &ScoredItem) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.word.cmp(&b.word))
}

/// Sort and truncate to the best `top_k`.
pub fn rank(mut items: Vec<ScoredItem>, top_k: usize) -> Vec<ScoredItem> {
    items.sort_by(compare);
    items.truncate(top_k);
    items
}
