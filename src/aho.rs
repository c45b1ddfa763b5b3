//! Aho–Corasick exact multi-pattern matcher backend (§4.3).
//!
//! Grounded on `FlashText` (formerly `src/flash.rs`): same `aho_corasick` builder usage
//! and the same byte-offset → code-point-offset translation idea, extended with
//! separator compaction and whole-word boundary filtering.

use crate::trie::ExactMatch;
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::collections::HashSet;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Aho–Corasick-backed exact matcher. Insert patterns, call [`AhoMatcher::finalize`] once,
/// then search. Mirrors the `insert_all` / `finalize` / `find_all` capability the trie
/// backend exposes so the orchestrator can dispatch on a single tag (§9).
pub struct AhoMatcher {
    patterns: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl AhoMatcher {
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
            automaton: None,
        }
    }

    pub fn insert_all<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        self.patterns.extend(words.into_iter().map(|w| w.to_string()));
        self.automaton = None;
    }

    /// Build the automaton from the patterns inserted so far. Idempotent; a subsequent
    /// `insert_all` invalidates the built automaton until `finalize` runs again.
    pub fn finalize(&mut self) {
        if self.automaton.is_none() {
            let ac = AhoCorasickBuilder::new()
                .match_kind(MatchKind::Standard)
                .build(&self.patterns)
                .expect("failed to build Aho-Corasick automaton");
            self.automaton = Some(ac);
        }
    }

    /// Search `text`. Panics if called before [`AhoMatcher::finalize`], an internal
    /// invariant violation, per §4.8/§7, not a recoverable error.
    pub fn find_all(
        &self,
        text: &str,
        whole_words_only: bool,
        separators: &HashSet<char>,
    ) -> Vec<ExactMatch> {
        let ac = self
            .automaton
            .as_ref()
            .expect("AhoMatcher::find_all called before finalize");

        let chars: Vec<char> = text.chars().collect();
        let mut compact = String::with_capacity(text.len());
        let mut original_index: Vec<usize> = Vec::with_capacity(chars.len());
        for (i, &c) in chars.iter().enumerate() {
            if separators.contains(&c) {
                continue;
            }
            compact.push(c);
            original_index.push(i);
        }

        if original_index.is_empty() {
            return Vec::new();
        }

        // Overlapping matches are not guaranteed monotonic in start position, so each
        // match's byte offsets are translated independently rather than incrementally.
        let mut raw: Vec<(usize, usize)> = Vec::new();
        for mat in ac
            .try_find_overlapping_iter(&compact)
            .expect("Standard match kind supports overlapping iteration")
        {
            let start_compact = compact[..mat.start()].chars().count();
            let len_compact = compact[mat.start()..mat.end()].chars().count();
            if len_compact == 0 {
                continue;
            }
            let end_compact = start_compact + len_compact;

            let start_orig = original_index[start_compact];
            let end_orig = original_index[end_compact - 1] + 1;

            if whole_words_only {
                let left_ok = start_orig == 0 || !is_word_char(chars[start_orig - 1]);
                let right_ok = end_orig >= chars.len() || !is_word_char(chars[end_orig]);
                if !left_ok || !right_ok {
                    continue;
                }
            }

            raw.push((start_orig, end_orig));
        }

        // Keep only the longest match per start, matching the trie backend's "longest
        // terminal from this start" semantics so the two backends stay equivalent.
        let mut best_end_by_start: std::collections::HashMap<usize, usize> =
            std::collections::HashMap::new();
        for (start, end) in raw {
            best_end_by_start
                .entry(start)
                .and_modify(|e| *e = (*e).max(end))
                .or_insert(end);
        }

        let mut out: Vec<ExactMatch> = best_end_by_start
            .into_iter()
            .map(|(start, end)| ExactMatch { start, end })
            .collect();
        out.sort_by_key(|m| m.start);
        out
    }
}

impl Default for AhoMatcher {
    fn default() -> Self {
        Self::new()
    }
}
