//! Prefix-tree exact multi-pattern matcher (§4.2).

use std::collections::HashMap;

/// One code-point match against a language's word set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactMatch {
    /// Start code-point index (inclusive) in the scanned text.
    pub start: usize,
    /// End code-point index (exclusive) in the scanned text.
    pub end: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[derive(Default)]
struct Node {
    children: HashMap<char, Node>,
    terminal: bool,
}

/// Prefix tree over code points, with whole-word boundaries and separator-skipping
/// built into the scan itself (see `find_all`).
#[derive(Default)]
pub struct Trie {
    root: Node,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for c in word.chars() {
            node = node.children.entry(c).or_default();
        }
        node.terminal = true;
    }

    pub fn insert_all<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for w in words {
            self.insert(w);
        }
    }

    /// Scan `text` for every pattern in the trie, per §4.2's lenient "longest terminal
    /// from this start, then advance to next start" semantics.
    pub fn find_all(
        &self,
        text: &str,
        whole_words_only: bool,
        separators: &std::collections::HashSet<char>,
    ) -> Vec<ExactMatch> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::new();

        for start in 0..chars.len() {
            // A separator-skip applies once a match is underway, not to the start itself:
            // otherwise every word preceded by a separator would also be reported starting
            // at that separator, double-counting the same occurrence.
            if separators.contains(&chars[start]) {
                continue;
            }
            if whole_words_only && start > 0 && is_word_char(chars[start - 1]) {
                continue;
            }

            let mut node = &self.root;
            let mut best_end: Option<usize> = None;
            let mut i = start;
            while i < chars.len() {
                let c = chars[i];
                if let Some(next) = node.children.get(&c) {
                    node = next;
                    i += 1;
                    if node.terminal {
                        let boundary_ok = !whole_words_only
                            || i >= chars.len()
                            || !is_word_char(chars[i]);
                        if boundary_ok {
                            best_end = Some(i);
                        }
                    }
                } else if separators.contains(&c) {
                    i += 1;
                } else {
                    break;
                }
            }

            if let Some(end) = best_end {
                out.push(ExactMatch { start, end });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn seps() -> HashSet<char> {
        [' ', '.', '-', '_', '*'].into_iter().collect()
    }

    #[test]
    fn finds_simple_word() {
        let mut t = Trie::new();
        t.insert("bitch");
        let m = t.find_all("you are a bitch", false, &seps());
        assert_eq!(m, vec![ExactMatch { start: 10, end: 15 }]);
    }

    #[test]
    fn whole_word_boundary_rejects_substring_match() {
        let mut t = Trie::new();
        t.insert("ass");
        let m = t.find_all("classic", true, &seps());
        assert!(m.is_empty());
    }

    #[test]
    fn whole_word_boundary_allows_standalone_match() {
        let mut t = Trie::new();
        t.insert("ass");
        let m = t.find_all("you ass", true, &seps());
        assert_eq!(m, vec![ExactMatch { start: 4, end: 7 }]);
    }

    #[test]
    fn separators_are_skipped_within_a_word() {
        let mut t = Trie::new();
        t.insert("shit");
        let text = "s*h-i t happens";
        let m = t.find_all(text, false, &seps());
        assert_eq!(m, vec![ExactMatch { start: 0, end: 7 }]);
    }

    #[test]
    fn longest_terminal_from_start_wins() {
        let mut t = Trie::new();
        t.insert("ass");
        t.insert("asshole");
        let m = t.find_all("asshole", false, &seps());
        assert_eq!(m, vec![ExactMatch { start: 0, end: 7 }]);
    }
}
