//! # wordscreen
//!
//! Multi-language profanity detection and masking.
//!
//! Given a configuration and an input string, a [`Detector`] returns a verdict plus the
//! set of match spans, and can produce a masked version of the input. The matching core
//! is a hybrid pipeline: Unicode normalization (case folding, confusable substitution,
//! diacritics stripping), an exact multi-pattern matcher with interchangeable Trie /
//! Aho-Corasick backends, a token-based phrase matcher with stop-word skipping, and an
//! approximate edit-distance fallback. Shipped word lists, framework adapters, CLI
//! tooling and build scripts are out of scope; this crate only defines the core and the
//! [`WordPackSource`] interface external word lists plug into.

pub mod aho;
pub mod config;
pub mod detector;
pub mod fuzzy;
pub mod matcher;
pub mod normalize;
pub mod phrase;
pub mod registry;
pub mod script;
pub mod trie;

pub use config::{Algorithm, ConfigError, DetectionConfig, DetectorConfig, LanguageConfig, MaskingConfig};
pub use detector::{DetectionResult, Detector, MatchSpan};
pub use registry::{InMemoryWordPack, WordPackSource};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryWordPack;

    #[test]
    fn end_to_end_default_detector_catches_plain_profanity() {
        let pack = InMemoryWordPack::with_words("en", &["shit", "bitch", "asshole"]);
        let det = Detector::with_source(DetectorConfig::default(), pack).unwrap();
        assert!(det.detect("you are a bitch").has_profanity);
        assert!(!det.detect("you are a nice person").has_profanity);
    }

    #[test]
    fn end_to_end_sanitize_masks_in_place() {
        let pack = InMemoryWordPack::with_words("en", &["shit"]);
        let det = Detector::with_source(DetectorConfig::default(), pack).unwrap();
        assert_eq!(det.sanitize("shit happens, a lot"), "s*** happens, a lot");
    }

    #[test]
    fn end_to_end_algorithm_switch_preserves_behavior() {
        let pack = InMemoryWordPack::with_words("en", &["bitch"]);
        let mut det = Detector::with_source(DetectorConfig::default(), pack).unwrap();
        let before = det.detect("you are a bitch");
        det.set_algorithm(Algorithm::Aho);
        let after = det.detect("you are a bitch");
        assert_eq!(before.has_profanity, after.has_profanity);
        assert_eq!(before.matches.len(), after.matches.len());
    }
}
