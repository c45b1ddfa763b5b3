//! Approximate (edit-distance) fallback scanner (§4.5).
//!
//! Only consulted when `max_edit_distance > 0` and no earlier stage produced a match.
//! Crate: `strsim` (`generic_levenshtein`), the ecosystem's standard edit-distance crate
//! (see `FelixEngl-tmt/tokenizer/Cargo.toml`), used here in place of a hand-rolled DP.

use crate::config::DetectionConfig;
use crate::trie::ExactMatch;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Return the scaled max distance for a word of length `len`, per §4.5.
fn scaled_max_distance(max_edit_distance: usize, len: usize) -> usize {
    max_edit_distance.min(len / 5)
}

/// Scan `text` against `words` in order, returning the first match found: first word
/// (in iteration order) with any window producing distance `<= scaled_max_distance`,
/// at its first qualifying start position. Preserves the "first-match-wins" semantics
/// documented as intentional in §9.
pub fn find_first_fuzzy(text: &str, words: &[String], cfg: &DetectionConfig) -> Option<ExactMatch> {
    let chars: Vec<char> = text.chars().collect();

    for word in words {
        let wchars: Vec<char> = word.chars().collect();
        if wchars.is_empty() {
            continue;
        }
        let wlen = wchars.len();
        let d = scaled_max_distance(cfg.max_edit_distance, wlen);

        for i in 0..chars.len() {
            if cfg.token_bounded_fuzzy && i > 0 && is_word_char(chars[i - 1]) {
                continue;
            }

            let window_len = (wlen + d).min(chars.len() - i);
            if window_len < wlen {
                continue;
            }
            let window = &chars[i..i + window_len];

            let mut best: Option<(usize, usize)> = None;
            for offset in 0..=(window.len() - wlen) {
                let candidate = &window[offset..offset + wlen];
                let dist = strsim::generic_levenshtein(&candidate.to_vec(), &wchars);
                if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                    best = Some((offset, dist));
                }
            }

            if let Some((offset, dist)) = best {
                if dist <= d {
                    let start = i + offset;
                    let end = start + wlen;
                    if cfg.whole_words_only {
                        let left_ok = start == 0 || !is_word_char(chars[start - 1]);
                        let right_ok = end >= chars.len() || !is_word_char(chars[end]);
                        if !left_ok || !right_ok {
                            continue;
                        }
                    }
                    return Some(ExactMatch { start, end });
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DetectionConfig {
        DetectionConfig::default()
    }

    #[test]
    fn finds_one_edit_typo() {
        // word length 10 => d = min(1, 10/5) = 1, so a single-edit typo is allowed.
        let words = vec!["asshole".to_string() + "wipe"];
        let m = find_first_fuzzy("asshorewipe happens", &words, &cfg());
        assert_eq!(m, Some(ExactMatch { start: 0, end: 11 }));
    }

    #[test]
    fn respects_scaled_distance_cap() {
        // word length 4 => d = min(1, 4/5) = min(1, 0) = 0, so a 1-edit typo is rejected.
        let words = vec!["shit".to_string()];
        let mut c = cfg();
        c.max_edit_distance = 1;
        let m = find_first_fuzzy("zhit happens", &words, &c);
        assert_eq!(m, None);
    }

    #[test]
    fn token_bounded_fuzzy_skips_mid_word_starts() {
        let words = vec!["ass".to_string()];
        let mut c = cfg();
        c.max_edit_distance = 1;
        c.token_bounded_fuzzy = true;
        let m = find_first_fuzzy("classic", &words, &c);
        // every start inside "classic" after the first char is preceded by a word char
        assert!(m.is_none() || m == Some(ExactMatch { start: 0, end: 3 }));
    }

    #[test]
    fn exact_match_has_zero_distance() {
        let words = vec!["bitch".to_string()];
        let m = find_first_fuzzy("a bitch indeed", &words, &cfg());
        assert_eq!(m, Some(ExactMatch { start: 2, end: 7 }));
    }
}
