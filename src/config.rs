//! Configuration surface for [`crate::Detector`].

use std::collections::HashSet;

/// Exact multi-pattern matching backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Trie,
    Aho,
}

/// Errors raised by the constructor or a mutator when a configuration value is invalid.
///
/// Recoverable, caller-facing: see `src/detector.rs` for the internal-invariant panics
/// this is deliberately *not* used for.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_edit_distance must be non-negative, got {0}")]
    NegativeDistance(i64),
    #[error("phrase_max_skips must be non-negative, got {0}")]
    NegativePhraseSkips(i64),
    #[error("mask pattern_char must be a single non-control code point, got {0:?}")]
    InvalidPatternChar(char),
}

/// Masking behavior for [`crate::Detector::sanitize`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskingConfig {
    pub enabled: bool,
    pub pattern_char: char,
    pub preserve_length: bool,
    pub preserve_first: bool,
    pub preserve_last: bool,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pattern_char: '*',
            preserve_length: true,
            preserve_first: true,
            preserve_last: false,
        }
    }
}

/// Detection-stage tuning: normalization policy, matcher policy, fuzzy policy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionConfig {
    pub max_edit_distance: usize,
    pub case_sensitive: bool,
    pub whole_words_only: bool,
    pub custom_words: Vec<String>,
    pub confusable_mapping: bool,
    pub ignore_separators: HashSet<char>,
    pub strip_diacritics: bool,
    pub use_compat_form: bool,
    pub length_preserving: bool,
    pub strip_invisible: bool,
    pub enable_inflections: bool,
    pub inflection_suffixes: Vec<String>,
    pub allowlist: HashSet<String>,
    pub token_bounded_fuzzy: bool,
    pub phrase_stopwords: HashSet<String>,
    pub phrase_max_skips: usize,
    pub algorithm: Algorithm,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: 1,
            case_sensitive: false,
            whole_words_only: false,
            custom_words: Vec::new(),
            confusable_mapping: true,
            ignore_separators: [' ', '.', '-', '_', '*'].into_iter().collect(),
            strip_diacritics: true,
            use_compat_form: false,
            length_preserving: true,
            strip_invisible: true,
            enable_inflections: true,
            inflection_suffixes: ["s", "es", "ed", "ing", "er", "ers"]
                .into_iter()
                .map(String::from)
                .collect(),
            allowlist: HashSet::new(),
            token_bounded_fuzzy: true,
            phrase_stopwords: ["of", "the", "a", "an", "and", "to"]
                .into_iter()
                .map(String::from)
                .collect(),
            phrase_max_skips: 2,
            algorithm: Algorithm::Trie,
        }
    }
}

/// Active language set and auto-detection policy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageConfig {
    pub enabled: Vec<String>,
    pub auto_detect: bool,
    pub fallback: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            enabled: vec!["en".to_string()],
            auto_detect: false,
            fallback: "en".to_string(),
        }
    }
}

/// Full configuration snapshot for a [`crate::Detector`].
///
/// Cloned into the detector at construction time; mutators replace the relevant
/// sub-config and rebuild affected matchers, never mutate shared defaults in place
/// (see `DetectorConfig::default()` below: each call produces fresh owned collections).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorConfig {
    pub masking: MaskingConfig,
    pub detection: DetectionConfig,
    pub languages: LanguageConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            masking: MaskingConfig::default(),
            detection: DetectionConfig::default(),
            languages: LanguageConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Validate invariants that the constructor and mutators must reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.masking.pattern_char.is_control() {
            return Err(ConfigError::InvalidPatternChar(self.masking.pattern_char));
        }
        Ok(())
    }
}

impl DetectionConfig {
    /// Set `max_edit_distance` from a signed value, the shape it arrives in when read
    /// from an external config format that has no unsigned integer type. `max_edit_distance`
    /// is unsigned at rest, so this is the only path that can reject a negative value
    /// before it would otherwise wrap on an unchecked cast to `usize`.
    pub fn try_set_max_edit_distance(&mut self, value: i64) -> Result<(), ConfigError> {
        let distance: usize = value
            .try_into()
            .map_err(|_| ConfigError::NegativeDistance(value))?;
        self.max_edit_distance = distance;
        Ok(())
    }

    /// Same shape as [`Self::try_set_max_edit_distance`], for `phrase_max_skips`.
    pub fn try_set_phrase_max_skips(&mut self, value: i64) -> Result<(), ConfigError> {
        let skips: usize = value
            .try_into()
            .map_err(|_| ConfigError::NegativePhraseSkips(value))?;
        self.phrase_max_skips = skips;
        Ok(())
    }
}
