//! Per-language word sets and compiled matchers (§4.6).

use crate::config::{Algorithm, DetectionConfig};
use crate::matcher::ExactBackend;
use crate::normalize::{expand_eszett_variant, normalize};
use std::collections::{HashMap, HashSet};

/// External word-list collaborator: a read-only `code → raw words` mapping (§6).
/// Production word lists are an external concern; this crate only consumes the trait.
pub trait WordPackSource {
    fn words_for(&self, code: &str) -> Vec<String>;
    fn all_codes(&self) -> Vec<String>;
}

/// In-memory implementation for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWordPack {
    table: HashMap<String, Vec<String>>,
}

impl InMemoryWordPack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(code: &str, words: &[&str]) -> Self {
        let mut pack = Self::new();
        pack.set(code, words);
        pack
    }

    pub fn set(&mut self, code: &str, words: &[&str]) {
        self.table
            .insert(code.to_string(), words.iter().map(|w| w.to_string()).collect());
    }
}

impl WordPackSource for InMemoryWordPack {
    fn words_for(&self, code: &str) -> Vec<String> {
        self.table.get(code).cloned().unwrap_or_default()
    }

    fn all_codes(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }
}

/// One language's normalized word set and its compiled exact-matcher.
pub struct LanguageEntry {
    pub word_set: HashSet<String>,
    pub matcher: ExactBackend,
}

impl LanguageEntry {
    fn rebuild(&mut self, algorithm: Algorithm, cfg: &DetectionConfig) {
        let mut backend = ExactBackend::new(algorithm);
        let expanded = expand_for_matching(&self.word_set, cfg);
        backend.insert_all(expanded.iter().map(|s| s.as_str()));
        backend.finalize();
        self.matcher = backend;
    }
}

/// Expand a base word set with inflection suffixes and the German eszett variant, per §4.1/§4.6.
/// Returned set is used to build the matcher only; `word_set` itself stays the base forms.
fn expand_for_matching(base: &HashSet<String>, cfg: &DetectionConfig) -> HashSet<String> {
    let mut out = HashSet::new();
    for word in base {
        out.insert(word.clone());
        if let Some(variant) = expand_eszett_variant(word) {
            out.insert(variant);
        }
        if cfg.enable_inflections {
            for suffix in &cfg.inflection_suffixes {
                out.insert(format!("{word}{suffix}"));
            }
        }
    }
    out
}

/// Holds every loaded language's word set and compiled matcher, keyed by code.
pub struct LanguageRegistry {
    entries: HashMap<String, LanguageEntry>,
    algorithm: Algorithm,
}

impl LanguageRegistry {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            entries: HashMap::new(),
            algorithm,
        }
    }

    pub fn is_loaded(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn get(&self, code: &str) -> Option<&LanguageEntry> {
        self.entries.get(code)
    }

    pub fn loaded_codes(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Populate `codes` from `source`, normalizing raw words and building a matcher for each.
    /// A code with no entries in `source` is still marked loaded, with an empty word set,
    /// per the "unknown code produces an empty set without error" contract (§4.6/§7).
    pub fn load(&mut self, codes: &[&str], source: &dyn WordPackSource, cfg: &DetectionConfig) {
        let known = source.all_codes();
        for &code in codes {
            if self.entries.contains_key(code) {
                continue;
            }
            if !known.iter().any(|c| c == code) {
                tracing::warn!(code, "loading unknown language code, created with empty word set");
            }
            let raw = source.words_for(code);
            let word_set: HashSet<String> = raw
                .iter()
                .map(|w| normalize(w, cfg))
                .filter(|w| !w.is_empty())
                .collect();
            let mut entry = LanguageEntry {
                word_set,
                matcher: ExactBackend::new(self.algorithm),
            };
            entry.rebuild(self.algorithm, cfg);
            self.entries.insert(code.to_string(), entry);
        }
    }

    /// Insert `word` (already expected in roughly raw form; normalized here) into `code`'s
    /// word set and rebuild that language's matcher.
    pub fn add_word(&mut self, word: &str, code: &str, cfg: &DetectionConfig) {
        let normalized = normalize(word, cfg);
        if normalized.is_empty() {
            return;
        }
        let entry = self.entries.entry(code.to_string()).or_insert_with(|| LanguageEntry {
            word_set: HashSet::new(),
            matcher: ExactBackend::new(self.algorithm),
        });
        entry.word_set.insert(normalized);
        entry.rebuild(self.algorithm, cfg);
    }

    pub fn remove_word(&mut self, word: &str, code: &str, cfg: &DetectionConfig) {
        let normalized = normalize(word, cfg);
        if let Some(entry) = self.entries.get_mut(code) {
            entry.word_set.remove(&normalized);
            entry.rebuild(self.algorithm, cfg);
        }
    }

    /// Rebuild every loaded language's matcher under `alg`, dropping the prior matcher kind.
    pub fn set_algorithm(&mut self, alg: Algorithm, cfg: &DetectionConfig) {
        self.algorithm = alg;
        for entry in self.entries.values_mut() {
            entry.rebuild(alg, cfg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet as Set;

    fn cfg() -> DetectionConfig {
        DetectionConfig::default()
    }

    #[test]
    fn loads_known_code_with_normalized_words() {
        let pack = InMemoryWordPack::with_words("en", &["SHIT", "Bitch"]);
        let mut reg = LanguageRegistry::new(Algorithm::Trie);
        reg.load(&["en"], &pack, &cfg());
        let entry = reg.get("en").unwrap();
        assert!(entry.word_set.contains("shit"));
        assert!(entry.word_set.contains("bitch"));
    }

    #[test]
    fn loading_unknown_code_is_silent_and_empty() {
        let pack = InMemoryWordPack::new();
        let mut reg = LanguageRegistry::new(Algorithm::Trie);
        reg.load(&["xx"], &pack, &cfg());
        assert!(reg.is_loaded("xx"));
        assert!(reg.get("xx").unwrap().word_set.is_empty());
    }

    #[test]
    fn add_word_rebuilds_matcher_so_it_is_findable() {
        let pack = InMemoryWordPack::new();
        let mut reg = LanguageRegistry::new(Algorithm::Trie);
        reg.load(&["en"], &pack, &cfg());
        reg.add_word("bitch", "en", &cfg());
        let entry = reg.get("en").unwrap();
        let seps: Set<char> = [' ', '.', '-', '_', '*'].into_iter().collect();
        let matches = entry.matcher.find_all("you are a bitch", true, &seps);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn remove_word_makes_it_unfindable() {
        let pack = InMemoryWordPack::with_words("en", &["bitch"]);
        let mut reg = LanguageRegistry::new(Algorithm::Trie);
        reg.load(&["en"], &pack, &cfg());
        reg.remove_word("bitch", "en", &cfg());
        let entry = reg.get("en").unwrap();
        let seps: Set<char> = [' ', '.', '-', '_', '*'].into_iter().collect();
        assert!(entry.matcher.find_all("you are a bitch", true, &seps).is_empty());
    }

    #[test]
    fn set_algorithm_preserves_matching_behavior() {
        let pack = InMemoryWordPack::with_words("en", &["bitch"]);
        let mut reg = LanguageRegistry::new(Algorithm::Trie);
        reg.load(&["en"], &pack, &cfg());
        reg.set_algorithm(Algorithm::Aho, &cfg());
        let entry = reg.get("en").unwrap();
        let seps: Set<char> = [' ', '.', '-', '_', '*'].into_iter().collect();
        assert_eq!(entry.matcher.find_all("you are a bitch", true, &seps).len(), 1);
    }

    #[test]
    fn inflection_suffix_is_matchable() {
        let pack = InMemoryWordPack::with_words("en", &["bitch"]);
        let mut reg = LanguageRegistry::new(Algorithm::Trie);
        reg.load(&["en"], &pack, &cfg());
        let entry = reg.get("en").unwrap();
        let seps: Set<char> = [' ', '.', '-', '_', '*'].into_iter().collect();
        assert_eq!(entry.matcher.find_all("you are bitches", true, &seps).len(), 1);
    }
}
