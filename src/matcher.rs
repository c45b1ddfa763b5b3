//! Tagged-variant dispatch over the two exact-matcher backends (§9).

use crate::aho::AhoMatcher;
use crate::config::Algorithm;
use crate::trie::{ExactMatch, Trie};
use std::collections::HashSet;

/// Either backend, behind a single tag check at call time, so the registry can hold a
/// homogeneous per-language matcher regardless of the active [`Algorithm`].
pub enum ExactBackend {
    Trie(Trie),
    Aho(AhoMatcher),
}

impl ExactBackend {
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Trie => ExactBackend::Trie(Trie::new()),
            Algorithm::Aho => ExactBackend::Aho(AhoMatcher::new()),
        }
    }

    pub fn insert_all<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        match self {
            ExactBackend::Trie(t) => t.insert_all(words),
            ExactBackend::Aho(a) => a.insert_all(words),
        }
    }

    pub fn finalize(&mut self) {
        if let ExactBackend::Aho(a) = self {
            a.finalize();
        }
    }

    pub fn find_all(
        &self,
        text: &str,
        whole_words_only: bool,
        separators: &HashSet<char>,
    ) -> Vec<ExactMatch> {
        match self {
            ExactBackend::Trie(t) => t.find_all(text, whole_words_only, separators),
            ExactBackend::Aho(a) => a.find_all(text, whole_words_only, separators),
        }
    }
}
