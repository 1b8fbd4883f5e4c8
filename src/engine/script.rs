use std::{fmt, ops::RangeInclusive};

use super::codec::{self, Codepoint};

/// Coarse script bucket, decided by the Unicode block of a word's first codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Devanagari,
    Gurmukhi,
    Bengali,
    Kannada,
    Unknown,
}

/// Known buckets in lookup order.
const BUCKETS: [(Script, RangeInclusive<Codepoint>); 4] = [
    (Script::Devanagari, 0x0900..=0x097F),
    (Script::Gurmukhi, 0x0A00..=0x0A7F),
    (Script::Bengali, 0x0980..=0x09FF),
    (Script::Kannada, 0x0C80..=0x0CFF),
];

impl Script {
    /// Bucket for a single codepoint.
    pub fn of(cp: Codepoint) -> Script {
        BUCKETS
            .iter()
            .find(|(_, r)| r.contains(&cp))
            .map(|(s, _)| *s)
            .unwrap_or(Script::Unknown)
    }

    /// Classify text by its first codepoint only.
    pub fn classify(text: &str) -> Script {
        if text.is_empty() {
            return Script::Unknown;
        }
        Script::of(codec::first_codepoint(text))
    }

    /// Codepoint range of the bucket. None for Unknown.
    pub fn range(self) -> Option<RangeInclusive<Codepoint>> {
        BUCKETS
            .iter()
            .find(|(s, _)| *s == self)
            .map(|(_, r)| r.clone())
    }

    /// Whether `word` belongs to this bucket. Unknown matches every non-empty word.
    pub fn matches(self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        match self.range() {
            Some(r) => r.contains(&codec::first_codepoint(word)),
            None => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Script::Devanagari => "devanagari",
            Script::Gurmukhi => "gurmukhi",
            Script::Bengali => "bengali",
            Script::Kannada => "kannada",
            Script::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
