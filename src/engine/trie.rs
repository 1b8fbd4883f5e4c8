use std::collections::BTreeMap;

use super::codec::{self, Codepoint};

/// Handle of the root node in the arena.
const ROOT: usize = 0;

#[derive(Debug, Default)]
struct Node {
    /// Ordered by codepoint so traversal is reproducible.
    children: BTreeMap<Codepoint, usize>,
    terminal: bool,
}

/// Codepoint-keyed prefix trie. Nodes live in a flat arena and refer to
/// their children by index. Words are only ever added.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<Node>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            words: 0,
        }
    }

    /// Insert a word. Re-inserting an existing word is a no-op.
    /// Returns false if the word is empty or cannot be decoded cleanly.
    pub fn insert(&mut self, word: &str) -> bool {
        let cps = match codec::codepoints(word) {
            Some(c) if !c.is_empty() => c,
            _ => return false,
        };

        let mut idx = ROOT;
        for cp in cps {
            idx = match self.nodes[idx].children.get(&cp) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[idx].children.insert(cp, next);
                    next
                }
            };
        }

        let node = &mut self.nodes[idx];
        if !node.terminal {
            node.terminal = true;
            self.words += 1;
        }
        true
    }

    /// Walk down the trie along `key`. None if the path doesn't exist or `key`
    /// has a malformed sequence.
    fn find(&self, key: &str) -> Option<usize> {
        let mut idx = ROOT;
        for cp in codec::codepoints(key)? {
            idx = *self.nodes[idx].children.get(&cp)?;
        }
        Some(idx)
    }

    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.find(word).is_some_and(|i| self.nodes[i].terminal)
    }

    /// Collect up to `limit` stored words that start with `prefix`.
    ///
    /// Pre-order depth-first walk from the prefix node, children in ascending
    /// codepoint order. Stops as soon as `limit` words are collected.
    pub fn collect_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut out = Vec::new();
        if limit == 0 {
            return out;
        }

        let start = match self.find(prefix) {
            Some(i) => i,
            None => return out,
        };

        let mut stack: Vec<(usize, Vec<u8>)> = vec![(start, prefix.as_bytes().to_vec())];
        while let Some((idx, buf)) = stack.pop() {
            let node = &self.nodes[idx];
            if node.terminal {
                if let Ok(w) = String::from_utf8(buf.clone()) {
                    out.push(w);
                }
                if out.len() >= limit {
                    break;
                }
            }

            // Push in reverse so the smallest codepoint is popped first.
            for (&cp, &child) in node.children.iter().rev() {
                let mut next = buf.clone();
                next.extend(codec::encode(cp));
                stack.push((child, next));
            }
        }

        out
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
