#![no_main]

use libfuzzer_sys::fuzz_target;
use wordscreen::config::DetectionConfig;
use wordscreen::normalize::normalize;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    // Length preservation must hold for any input under the default, length-preserving config.
    let cfg = DetectionConfig::default();
    let out = normalize(&s, &cfg);
    debug_assert_eq!(out.chars().count(), s.chars().count());

    // Normalization must be idempotent.
    let out2 = normalize(&out, &cfg);
    debug_assert_eq!(out, out2);
});
