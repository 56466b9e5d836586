//! Benchmarks for lexguard.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lexguard::detector::{CascadeConfig, DetectionContext, EditDistancePolicy, FakeWordDetector};
use lexguard::distance::damerau_levenshtein;
use lexguard::lexicon::BuiltinLexicon;
use lexguard::training::{Trainer, TrainingConfig};

const SENTENCES: &[&str] = &[
    "The quick brown fox jumped over the lazy dog",
    "Senior software engineer at Blorgtech Solutions",
    "Experience with python, data analysis and customer support",
    "qwzx management consulting limited frobnicated",
    "International business group of meadow lanterns",
];

fn build_detector(policy: EditDistancePolicy) -> FakeWordDetector {
    let lexicon = BuiltinLexicon::english();
    let config = TrainingConfig {
        real_samples: 150,
        random_fakes: 75,
        typo_fakes: 75,
        ..Default::default()
    };
    let outcome = Trainer::new(config)
        .train(&lexicon.known_words(), &lexicon)
        .unwrap();
    let cascade = CascadeConfig {
        edit_distance_policy: policy,
        ..Default::default()
    };
    FakeWordDetector::new(DetectionContext::new(
        outcome.artifacts,
        Arc::new(lexicon),
        cascade,
    ))
    .unwrap()
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");
    let words: usize = SENTENCES.iter().map(|s| s.split_whitespace().count()).sum();
    group.throughput(Throughput::Elements(words as u64));

    for (name, policy) in [
        ("zero_fill", EditDistancePolicy::ZeroFill),
        ("sampled", EditDistancePolicy::Sampled),
    ] {
        let detector = build_detector(policy);
        group.bench_function(name, |b| {
            b.iter(|| {
                for sentence in SENTENCES {
                    black_box(detector.classify(black_box(sentence)).unwrap());
                }
            })
        });
    }

    let detector = build_detector(EditDistancePolicy::ZeroFill);
    group.bench_function("batch", |b| {
        b.iter(|| black_box(detector.classify_batch(black_box(SENTENCES)).unwrap()))
    });

    group.finish();
}

fn bench_damerau_levenshtein(c: &mut Criterion) {
    let known = BuiltinLexicon::english().known_words();
    let candidates: Vec<&str> = known.iter().collect();

    c.bench_function("damerau_levenshtein_scan", |b| {
        b.iter(|| {
            for candidate in &candidates {
                black_box(damerau_levenshtein(black_box("managment"), candidate));
            }
        })
    });
}

criterion_group!(benches, bench_cascade, bench_damerau_levenshtein);
criterion_main!(benches);
