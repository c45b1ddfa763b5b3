use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wordscreen::registry::InMemoryWordPack;
use wordscreen::{Algorithm, Detector, DetectorConfig};

fn sample_text() -> &'static str {
    "you are a bitch and this sh1t happens every single day, classic nonsense honestly"
}

fn word_list(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("badword{i}")).collect()
}

fn detector_for(n: usize, alg: Algorithm) -> Detector {
    let words = word_list(n);
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let mut pack = InMemoryWordPack::new();
    pack.set("en", &refs);
    let mut cfg = DetectorConfig::default();
    cfg.detection.algorithm = alg;
    // Exact-matcher throughput at scale is what these benches exercise; the fuzzy
    // fallback is a separate O(words * text len) scan benched in isolation elsewhere.
    cfg.detection.max_edit_distance = 0;
    Detector::with_source(cfg, pack).unwrap()
}

fn bench_detect_by_dictionary_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect::dictionary_size");
    for n in [1_000usize, 10_000, 100_000] {
        let det = detector_for(n, Algorithm::Aho);
        group.bench_with_input(BenchmarkId::new("aho", n), &n, |b, _| {
            b.iter(|| det.detect(black_box(sample_text())))
        });
    }
    group.finish();
}

fn bench_detect_algorithm_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect::algorithm");
    let trie_det = detector_for(10_000, Algorithm::Trie);
    let aho_det = detector_for(10_000, Algorithm::Aho);

    group.bench_function("trie", |b| b.iter(|| trie_det.detect(black_box(sample_text()))));
    group.bench_function("aho", |b| b.iter(|| aho_det.detect(black_box(sample_text()))));
    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");
    let det = detector_for(10_000, Algorithm::Aho);
    group.bench_function("baseline", |b| b.iter(|| det.sanitize(black_box(sample_text()))));
    group.finish();
}

criterion_group!(
    benches,
    bench_detect_by_dictionary_size,
    bench_detect_algorithm_comparison,
    bench_sanitize
);
criterion_main!(benches);
