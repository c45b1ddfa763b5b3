//! Pipeline orchestration: stage sequencing, language resolution, masking (§4.7).

use crate::config::{Algorithm, ConfigError, DetectorConfig};
use crate::fuzzy::find_first_fuzzy;
use crate::normalize::normalize;
use crate::phrase::{tokenize, PhraseTrie};
use crate::registry::{InMemoryWordPack, LanguageRegistry, WordPackSource};
use crate::script::likely_languages;

/// One reported hit, in normalized-text code-point coordinates (identical to the raw
/// input's coordinates under the default length-preserving normalization).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSpan {
    pub word: String,
    pub start_index: usize,
    pub length: usize,
    pub language_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionResult {
    pub has_profanity: bool,
    pub matches: Vec<MatchSpan>,
}

fn substr(chars: &[char], start: usize, end: usize) -> String {
    chars[start..end].iter().collect()
}

/// Orchestrates the normalizer, per-language registry, phrase trie, and fuzzy scanner
/// behind the `detect` / `sanitize` surface. Synchronous and single-threaded per instance
/// (§5): mutators rebuild affected matchers before returning, never exposing a partially
/// rebuilt one to a concurrent `detect`.
pub struct Detector {
    config: DetectorConfig,
    registry: LanguageRegistry,
    phrases: PhraseTrie,
    phrase_list: Vec<String>,
    source: Box<dyn WordPackSource>,
}

impl Detector {
    /// Build a detector with default configuration and an empty in-memory word pack.
    /// Use [`Detector::with_source`] to supply a populated [`WordPackSource`].
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, InMemoryWordPack::new())
    }

    pub fn with_source(config: DetectorConfig, source: impl WordPackSource + 'static) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut registry = LanguageRegistry::new(config.detection.algorithm);
        let enabled: Vec<&str> = config.languages.enabled.iter().map(String::as_str).collect();
        registry.load(&enabled, &source, &config.detection);

        let custom_words = config.detection.custom_words.clone();
        let fallback = config.languages.fallback.clone();
        let mut detector = Detector {
            config,
            registry,
            phrases: PhraseTrie::new(),
            phrase_list: Vec::new(),
            source: Box::new(source),
        };
        for word in custom_words {
            detector.registry.add_word(&word, &fallback, &detector.config.detection);
        }
        Ok(detector)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Resolve the ordered candidate language list for an already-normalized text, per §4.7.
    /// `detect` takes `&self`, so a candidate list that would require loading a brand-new
    /// language falls back to `languages.enabled` instead (loading needs `&mut self` and a
    /// pack source, neither available here).
    fn resolve_candidates(&self, normalized_text: &str) -> Vec<String> {
        if !self.config.languages.auto_detect {
            return self.config.languages.enabled.clone();
        }

        let likely = likely_languages(normalized_text);
        let loaded = self.registry.loaded_codes();
        let mut candidates: Vec<String> = likely
            .into_iter()
            .filter(|code| loaded.iter().any(|l| l == code))
            .map(String::from)
            .collect();

        if candidates.is_empty() && !loaded.is_empty() {
            candidates = loaded;
        }
        if candidates.is_empty() {
            candidates = self.config.languages.enabled.clone();
        }
        candidates
    }

    fn apply_allowlist(&self, spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
        spans
            .into_iter()
            .filter(|s| !self.config.detection.allowlist.contains(&s.word))
            .collect()
    }

    /// Run the §2 pipeline and return every match span found for the first candidate
    /// language that produces any, in stage order (exact, phrase, fuzzy).
    pub fn detect(&self, text: &str) -> DetectionResult {
        tracing::debug!(len = text.chars().count(), "detect called");
        let normalized = normalize(text, &self.config.detection);
        let chars: Vec<char> = normalized.chars().collect();
        let candidates = self.resolve_candidates(&normalized);
        tracing::debug!(candidates = ?candidates, "resolved candidate languages");

        for code in &candidates {
            let Some(entry) = self.registry.get(code) else {
                continue;
            };

            let mut exact = entry.matcher.find_all(
                &normalized,
                self.config.detection.whole_words_only,
                &self.config.detection.ignore_separators,
            );
            exact.sort_by_key(|m| m.start);
            if !exact.is_empty() {
                let spans: Vec<MatchSpan> = exact
                    .iter()
                    .map(|m| MatchSpan {
                        word: substr(&chars, m.start, m.end),
                        start_index: m.start,
                        length: m.end - m.start,
                        language_code: code.clone(),
                    })
                    .collect();
                let spans = self.apply_allowlist(spans);
                if !spans.is_empty() {
                    tracing::debug!(stage = "exact", count = spans.len(), "match found");
                    return DetectionResult {
                        has_profanity: true,
                        matches: spans,
                    };
                }
            }

            if !self.phrases.is_empty() {
                let tokens = tokenize(&normalized);
                let phrase_matches =
                    self.phrases
                        .find_all(&tokens, &self.config.detection.phrase_stopwords, self.config.detection.phrase_max_skips);
                if !phrase_matches.is_empty() {
                    let spans: Vec<MatchSpan> = phrase_matches
                        .iter()
                        .map(|m| {
                            let start = tokens[m.start_token].start;
                            let end = tokens[m.end_token].end;
                            MatchSpan {
                                word: substr(&chars, start, end),
                                start_index: start,
                                length: end - start,
                                language_code: code.clone(),
                            }
                        })
                        .collect();
                    let spans = self.apply_allowlist(spans);
                    if !spans.is_empty() {
                        tracing::debug!(stage = "phrase", count = spans.len(), "match found");
                        return DetectionResult {
                            has_profanity: true,
                            matches: spans,
                        };
                    }
                }
            }

            if self.config.detection.max_edit_distance > 0 {
                let mut words: Vec<String> = entry.word_set.iter().cloned().collect();
                words.sort();
                if let Some(m) = find_first_fuzzy(&normalized, &words, &self.config.detection) {
                    let span = MatchSpan {
                        word: substr(&chars, m.start, m.end),
                        start_index: m.start,
                        length: m.end - m.start,
                        language_code: code.clone(),
                    };
                    let spans = self.apply_allowlist(vec![span]);
                    if !spans.is_empty() {
                        tracing::debug!(stage = "fuzzy", "match found");
                        return DetectionResult {
                            has_profanity: true,
                            matches: spans,
                        };
                    }
                }
            }
        }

        DetectionResult {
            has_profanity: false,
            matches: Vec::new(),
        }
    }

    /// Run `detect`, then mask every returned span per the active [`crate::config::MaskingConfig`],
    /// in ascending start order, skipping any span overlapping an already-masked region (§9).
    pub fn sanitize(&self, text: &str) -> String {
        tracing::debug!(len = text.chars().count(), "sanitize called");
        let result = self.detect(text);
        if !self.config.masking.enabled || result.matches.is_empty() {
            return text.to_string();
        }

        let mut chars: Vec<char> = text.chars().collect();
        let mut covered = vec![false; chars.len()];
        let mut spans = result.matches;
        spans.sort_by_key(|m| m.start_index);

        for m in &spans {
            let start = m.start_index.min(chars.len());
            let end = (start + m.length).min(chars.len());
            if start >= end || covered[start..end].iter().any(|&c| c) {
                continue;
            }
            let len = end - start;
            for (j, idx) in (start..end).enumerate() {
                covered[idx] = true;
                let keep = self.config.masking.preserve_length
                    && ((self.config.masking.preserve_first && j == 0)
                        || (self.config.masking.preserve_last && j == len - 1));
                if !keep {
                    chars[idx] = self.config.masking.pattern_char;
                }
            }
        }

        chars.into_iter().collect()
    }

    /// API-compatibility shim (§5): never actually suspends, the pack table is in-memory.
    pub async fn load_languages(&mut self, codes: &[&str]) {
        let span = tracing::info_span!("load_languages", codes = ?codes);
        let _enter = span.enter();
        self.registry.load(codes, self.source.as_ref(), &self.config.detection);
        tracing::info!(codes = ?codes, "languages loaded");
    }

    pub fn set_languages(&mut self, codes: &[&str], fallback: Option<&str>) {
        self.config.languages.enabled = codes.iter().map(|s| s.to_string()).collect();
        if let Some(f) = fallback {
            self.config.languages.fallback = f.to_string();
        }
        let span = tracing::info_span!("set_languages", codes = ?codes);
        let _enter = span.enter();
        self.registry.load(codes, self.source.as_ref(), &self.config.detection);
        tracing::info!(codes = ?codes, "active languages updated");
    }

    pub fn set_algorithm(&mut self, alg: Algorithm) {
        self.config.detection.algorithm = alg;
        let span = tracing::info_span!("set_algorithm");
        let _enter = span.enter();
        self.registry.set_algorithm(alg, &self.config.detection);
        tracing::info!(?alg, "matcher algorithm switched");
    }

    pub fn add_word(&mut self, word: &str, code: Option<&str>) {
        let code = code.unwrap_or(&self.config.languages.fallback).to_string();
        let span = tracing::info_span!("add_word", code = %code);
        let _enter = span.enter();
        self.registry.add_word(word, &code, &self.config.detection);
        let size = self.registry.get(&code).map(|e| e.word_set.len()).unwrap_or(0);
        tracing::info!(code = %code, word_set_size = size, "word added");
    }

    pub fn remove_word(&mut self, word: &str, code: Option<&str>) {
        let code = code.unwrap_or(&self.config.languages.fallback).to_string();
        let span = tracing::info_span!("remove_word", code = %code);
        let _enter = span.enter();
        self.registry.remove_word(word, &code, &self.config.detection);
        let size = self.registry.get(&code).map(|e| e.word_set.len()).unwrap_or(0);
        tracing::info!(code = %code, word_set_size = size, "word removed");
    }

    pub fn add_phrase(&mut self, phrase: &str) {
        self.phrase_list.push(phrase.to_string());
        self.rebuild_phrase_trie();
        tracing::info!(phrase_count = self.phrase_list.len(), "phrase added");
    }

    pub fn remove_phrase(&mut self, phrase: &str) {
        self.phrase_list.retain(|p| p != phrase);
        self.rebuild_phrase_trie();
        tracing::info!(phrase_count = self.phrase_list.len(), "phrase removed");
    }

    fn rebuild_phrase_trie(&mut self) {
        let mut trie = PhraseTrie::new();
        for phrase in self.phrase_list.clone() {
            let normalized = normalize(&phrase, &self.config.detection);
            let tokens = tokenize(&normalized);
            let words: Vec<String> = tokens.into_iter().map(|t| t.text).collect();
            if !words.is_empty() {
                trie.insert(&words);
            }
        }
        self.phrases = trie;
    }
}
