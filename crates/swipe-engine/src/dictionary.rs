//! Word list with popularity weights.
//!
//! Words live in a flat entry table indexed by a `HashMap` for exact lookup,
//! and in an arena trie for prefix walks. A `Dictionary` is immutable once
//! built; reloading builds a fresh one and swaps it in.

use crate::error::{SwipeError, SwipeResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const NO_ENTRY: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryEntry {
    pub word: String,
    pub weight: f64,
}

#[derive(Debug, Clone)]
struct TrieNode {
    children: BTreeMap<char, u32>,
    entry: u32,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            entry: NO_ENTRY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    nodes: Vec<TrieNode>,
    entries: Vec<DictionaryEntry>,
    index: HashMap<String, u32>,
    skipped_lines: usize,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::new()],
            entries: Vec::new(),
            index: HashMap::new(),
            skipped_lines: 0,
        }
    }

    /// Parse a word list: one `word` or `word<sep>weight` per line, where
    /// `<sep>` is a tab, comma or whitespace. Malformed lines are skipped;
    /// a list with no usable word is a parse failure.
    pub fn from_text(text: &str) -> SwipeResult<Self> {
        let mut dict = Self::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Some((word, weight)) => dict.insert(&word, weight),
                None => {
                    debug!("Skipping malformed dictionary line {}: {:?}", line_no + 1, line);
                    dict.skipped_lines += 1;
                }
            }
        }

        if dict.is_empty() {
            return Err(SwipeError::Parse(format!(
                "no valid dictionary entries ({} malformed lines)",
                dict.skipped_lines
            )));
        }

        info!(
            "Dictionary built: {} words, {} malformed lines skipped",
            dict.len(),
            dict.skipped_lines
        );
        Ok(dict)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> SwipeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SwipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text)
    }

    /// Insert or replace a word. Empty words and invalid weights are ignored.
    pub fn insert(&mut self, word: &str, weight: f64) {
        if word.is_empty() || !weight.is_finite() || weight < 0.0 {
            return;
        }

        if let Some(&id) = self.index.get(word) {
            self.entries[id as usize].weight = weight;
            return;
        }

        let id = self.entries.len() as u32;
        self.entries.push(DictionaryEntry {
            word: word.to_string(),
            weight,
        });
        self.index.insert(word.to_string(), id);

        let mut node = 0usize;
        for ch in word.chars() {
            let next = match self.nodes[node].children.get(&ch) {
                Some(&child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::new());
                    self.nodes[node].children.insert(ch, child as u32);
                    child
                }
            };
            node = next;
        }
        self.nodes[node].entry = id;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    #[cfg(test)]
    fn weight(&self, word: &str) -> Option<f64> {
        self.index
            .get(word)
            .map(|&id| self.entries[id as usize].weight)
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }

    /// Entries starting with `first`, in lexicographic order. Each call
    /// returns a fresh walk.
    pub fn candidates_by_first_letter(&self, first: char) -> Candidates<'_> {
        let mut buf = [0u8; 4];
        self.candidates_with_prefix(first.encode_utf8(&mut buf))
    }

    /// Entries starting with `prefix`, in lexicographic order.
    pub fn candidates_with_prefix(&self, prefix: &str) -> Candidates<'_> {
        let mut node = Some(0u32);
        for ch in prefix.chars() {
            node = node.and_then(|n| self.nodes[n as usize].children.get(&ch).copied());
        }
        Candidates {
            dict: self,
            stack: node.into_iter().collect(),
        }
    }
}

/// Depth-first walk over a trie subtree.
pub struct Candidates<'a> {
    dict: &'a Dictionary,
    stack: Vec<u32>,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = &'a DictionaryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = &self.dict.nodes[id as usize];
            // Reverse so the smallest child is popped first.
            self.stack.extend(node.children.values().rev().copied());
            if node.entry != NO_ENTRY {
                return Some(&self.dict.entries[node.entry as usize]);
            }
        }
        None
    }
}

fn parse_line(line: &str) -> Option<(String, f64)> {
    let mut fields = line
        .split(|c: char| c == '\t' || c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty());

    let word = fields.next()?.to_lowercase();
    let weight = match fields.next() {
        Some(w) => w.parse::<f64>().ok()?,
        None => 1.0,
    };
    if fields.next().is_some() || !weight.is_finite() || weight < 0.0 {
        return None;
    }
    Some((word, weight))
}
