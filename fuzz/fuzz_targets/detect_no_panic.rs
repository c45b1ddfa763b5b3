#![no_main]

use libfuzzer_sys::fuzz_target;
use wordscreen::registry::InMemoryWordPack;
use wordscreen::{Detector, DetectorConfig};

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let pack = InMemoryWordPack::with_words("en", &["francois", "muller", "beijing", "hello"]);
    let det = Detector::with_source(DetectorConfig::default(), pack).expect("default config is valid");

    let result = det.detect(&s);
    let char_count = s.chars().count();
    for m in &result.matches {
        debug_assert!(m.start_index + m.length <= char_count);
    }

    // detect/sanitize must never panic on arbitrary bytes, and sanitize must be a projection.
    let sanitized = det.sanitize(&s);
    debug_assert_eq!(sanitized, det.sanitize(&sanitized));
});
