use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use sandhi_core::{classify, combine_with, RuleTable, SandhiCache};

static INPUTS: &[(&str, &[&str])] = &[
    ("pair", &["राम", "अर्जुनः"]),
    ("visarga", &["रामः", "अत्र", "गच्छति"]),
    (
        "sentence",
        &[
            "अहम्", "गच्छामि", "हरिः", "अपि", "तव", "छाया", "जगत्", "ईशः", "सत्", "चित्",
            "आनन्दः",
        ],
    ),
];

fn bench_combine(c: &mut Criterion) {
    let table = RuleTable::global();
    let mut group = c.benchmark_group("combine/words");
    for &(label, words) in INPUTS {
        group.bench_with_input(BenchmarkId::new(label, words.len()), &words, |b, &words| {
            b.iter(|| combine_with(table, words));
        });
    }
    group.finish();
}

fn bench_single_word(c: &mut Criterion) {
    let table = RuleTable::global();
    let mut group = c.benchmark_group("combine/single");
    for word in ["सत्य", "पुत्रस्य", "धर्मक्षेत्रे"] {
        group.bench_with_input(BenchmarkId::new("word", word), &word, |b, &word| {
            b.iter(|| combine_with(table, &[word]));
        });
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let text = "धर्मक्षेत्रे कुरुक्षेत्रे समवेता युयुत्सवः";
    c.bench_function("classify", |b| b.iter(|| classify(text).count()));
}

fn bench_cached(c: &mut Criterion) {
    let table = RuleTable::global();
    let mut cache = SandhiCache::with_capacity(64);
    let words = INPUTS[2].1;
    c.bench_function("combine/cached", |b| {
        b.iter(|| cache.get_or_combine(table, words))
    });
}

criterion_group!(
    benches,
    bench_combine,
    bench_single_word,
    bench_classify,
    bench_cached
);
criterion_main!(benches);
