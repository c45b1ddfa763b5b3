//! Per-code-point text normalization.
//!
//! Mirrors the diacritics-stripping approach of the workspace's original `fold.rs`
//! (NFKD decomposition + combining-mark filter) but threads a length-preserving policy
//! through every stage so reported match spans stay in original-text coordinates.

use crate::config::DetectionConfig;
use unicode_normalization::UnicodeNormalization;

const INVISIBLES: [char; 5] = ['\u{200B}', '\u{200D}', '\u{200C}', '\u{FEFF}', '\u{00AD}'];

fn is_invisible(c: char) -> bool {
    INVISIBLES.contains(&c)
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Minimum confusable table required by the spec. Keys are single code points that look
/// like the mapped letter and are commonly substituted to evade naive filters.
fn confusable(c: char) -> Option<char> {
    Some(match c {
        '0' => 'o',
        '1' => 'i',
        '3' => 'e',
        '4' => 'a',
        '5' => 's',
        '7' => 't',
        '8' => 'b',
        '@' => 'a',
        '$' => 's',
        '!' => 'i',
        '|' => 'i',
        '€' => 'e',
        '£' => 'l',
        '¢' => 'c',
        '§' => 's',
        _ => return None,
    })
}

fn strip_diacritics_one(c: char, length_preserving: bool) -> Vec<char> {
    let bases: Vec<char> = std::iter::once(c)
        .nfkd()
        .filter(|d| !is_combining_mark(*d))
        .collect();
    if bases.is_empty() {
        return if length_preserving { vec![c] } else { Vec::new() };
    }
    if length_preserving {
        vec![bases[0]]
    } else {
        bases
    }
}

/// Run the §4.1 per-code-point pipeline for a single input code point, returning the
/// (possibly empty, possibly multi-char) output sequence it maps to.
fn process_one(c: char, cfg: &DetectionConfig) -> Vec<char> {
    let mut buf: Vec<char> = if cfg.case_sensitive {
        vec![c]
    } else {
        let mut lowered: Vec<char> = c.to_lowercase().collect();
        if cfg.length_preserving && lowered.len() > 1 {
            lowered.truncate(1);
        }
        lowered
    };

    if cfg.strip_invisible {
        buf = buf
            .into_iter()
            .flat_map(|ch| {
                if is_invisible(ch) {
                    if cfg.length_preserving {
                        vec![' ']
                    } else {
                        Vec::new()
                    }
                } else {
                    vec![ch]
                }
            })
            .collect();
    }

    if cfg.strip_diacritics {
        buf = buf
            .into_iter()
            .flat_map(|ch| strip_diacritics_one(ch, cfg.length_preserving))
            .collect();
    }

    if cfg.confusable_mapping {
        buf = buf
            .into_iter()
            .map(|ch| confusable(ch).unwrap_or(ch))
            .collect();
    }

    buf
}

/// Normalize `text` per the active [`DetectionConfig`].
///
/// When `cfg.length_preserving` is set (the default), `normalize(text).chars().count()`
/// equals `text.chars().count()` and position `i` of the output corresponds to position
/// `i` of the input, for any `text`.
pub fn normalize(text: &str, cfg: &DetectionConfig) -> String {
    let working: String = if cfg.use_compat_form && !cfg.length_preserving {
        text.nfkc().collect()
    } else {
        text.to_string()
    };

    let mut out = String::with_capacity(working.len());
    for c in working.chars() {
        out.extend(process_one(c, cfg));
    }
    out
}

/// Word-set build-time hook: German `ß` also registers an `ss` surface form so both spellings
/// match. Not applied during text normalization itself, only when populating a language's
/// word set (see `src/registry.rs`).
pub fn expand_eszett_variant(word: &str) -> Option<String> {
    if word.contains('ß') {
        Some(word.replace('ß', "ss"))
    } else {
        None
    }
}
