//! Token-keyed phrase matcher with stop-word skips (§4.4).

use std::collections::{HashMap, HashSet};

/// A maximal run of `[letter | digit | underscore]` code points, with its code-point
/// offsets in the text it was tokenized from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize `text` into maximal word-character runs, recording code-point offsets.
/// Simple code-point scanning, not UAX #29 segmentation (spec non-goal).
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !is_word_char(chars[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && is_word_char(chars[i]) {
            i += 1;
        }
        tokens.push(Token {
            text: chars[start..i].iter().collect(),
            start,
            end: i,
        });
    }
    tokens
}

/// A token-level match, in token indices (inclusive on both ends).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch {
    pub start_token: usize,
    pub end_token: usize,
}

#[derive(Default)]
struct Node {
    children: HashMap<String, Node>,
    terminal: bool,
}

/// Token-keyed tree of phrases, each phrase a sequence of already-normalized tokens.
#[derive(Default)]
pub struct PhraseTrie {
    root: Node,
}

impl PhraseTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, phrase_tokens: &[String]) {
        let mut node = &mut self.root;
        for tok in phrase_tokens {
            node = node.children.entry(tok.clone()).or_default();
        }
        node.terminal = true;
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Search tokenized text, consuming up to `max_skips` stop words per attempt without
    /// advancing the trie. Earliest terminal reached from a given start wins.
    pub fn find_all(
        &self,
        tokens: &[Token],
        stopwords: &HashSet<String>,
        max_skips: usize,
    ) -> Vec<PhraseMatch> {
        let mut out = Vec::new();
        for start in 0..tokens.len() {
            // A stop-word skip applies once an attempt is underway, not to the start
            // itself, unless the phrase genuinely begins with that token: otherwise every
            // phrase preceded by a stop word would also be reported starting at that stop
            // word, double-counting the same occurrence (mirrors the trie's separator-start rule).
            let first = &tokens[start].text;
            if stopwords.contains(first) && !self.root.children.contains_key(first) {
                continue;
            }

            let mut node = &self.root;
            let mut i = start;
            let mut skips_used = 0usize;
            let mut found: Option<usize> = None;

            while i < tokens.len() {
                let tok = &tokens[i].text;
                if let Some(next) = node.children.get(tok) {
                    node = next;
                    i += 1;
                    if node.terminal {
                        found = Some(i - 1);
                        break;
                    }
                } else if stopwords.contains(tok) && skips_used < max_skips {
                    skips_used += 1;
                    i += 1;
                } else {
                    break;
                }
            }

            if let Some(end_token) = found {
                out.push(PhraseMatch {
                    start_token: start,
                    end_token,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_basic() {
        let toks = tokenize("you are a   bitch!");
        let texts: Vec<&str> = toks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["you", "are", "a", "bitch"]);
    }

    #[test]
    fn finds_contiguous_phrase() {
        let mut trie = PhraseTrie::new();
        trie.insert(&["son".into(), "of".into(), "a".into(), "bitch".into()]);
        let tokens = tokenize("you are a son of a bitch indeed");
        let stopwords: HashSet<String> = ["of", "the", "a", "an", "and", "to"]
            .into_iter()
            .map(String::from)
            .collect();
        let matches = trie.find_all(&tokens, &stopwords, 2);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(tokens[m.start_token].text, "son");
        assert_eq!(tokens[m.end_token].text, "bitch");
    }

    #[test]
    fn consumes_stopwords_as_skips() {
        let mut trie = PhraseTrie::new();
        trie.insert(&["son".into(), "of".into(), "a".into(), "bitch".into()]);
        let tokens = tokenize("you are a son of the a   bitch indeed");
        let stopwords: HashSet<String> = ["of", "the", "a", "an", "and", "to"]
            .into_iter()
            .map(String::from)
            .collect();
        let matches = trie.find_all(&tokens, &stopwords, 2);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(tokens[m.start_token].text, "son");
        assert_eq!(tokens[m.end_token].text, "bitch");
    }

    #[test]
    fn too_many_skips_fails_to_match() {
        let mut trie = PhraseTrie::new();
        trie.insert(&["son".into(), "of".into(), "a".into(), "bitch".into()]);
        // "of" matches directly, but "the", "total", "stranger" would need 3 skips before "a".
        let tokens = tokenize("son of the total stranger a bitch");
        let stopwords: HashSet<String> = ["of", "the", "a", "an", "and", "to"]
            .into_iter()
            .map(String::from)
            .collect();
        let matches = trie.find_all(&tokens, &stopwords, 2);
        assert!(matches.is_empty());
    }
}
