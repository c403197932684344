use criterion::{black_box, criterion_group, criterion_main, Criterion};
use distver::{
    suggest_normalized_version, AdaptiveVersion, LegacyVersion, NormalizedMatcher,
    NormalizedVersion, SchemeKind, SemanticVersion, Versions,
};

fn bench_parse(c: &mut Criterion) {
    let versions = [
        "1.0",
        "1.2.3a4",
        "1.0.post456.dev623",
        "1!2.0rc1+ubuntu.1",
        "4.17rc2",
        "0.9.33.post17222",
    ];

    c.bench_function("parse_normalized", |b| {
        b.iter(|| {
            for version in versions {
                black_box(NormalizedVersion::parse(black_box(version)).ok());
            }
        })
    });

    let semantic = ["1.2.3", "1.0.0-alpha.1", "1.0.0-rc.1+build.5", "10.20.30"];
    c.bench_function("parse_semantic", |b| {
        b.iter(|| {
            for version in semantic {
                black_box(SemanticVersion::parse(black_box(version)).ok());
            }
        })
    });

    let legacy = ["0.80.1-3", "0.79.9999+0.80.0pre4-1", "2.1a0-20040501", "3.2pl1-1"];
    c.bench_function("parse_legacy", |b| {
        b.iter(|| {
            for version in legacy {
                black_box(LegacyVersion::new(black_box(version)));
            }
        })
    });
}

fn bench_adaptive_fallback(c: &mut Criterion) {
    let versions = ["1.0.post1", "1.0.0-alpha.1", "0pre1", "2013b"];

    c.bench_function("parse_adaptive", |b| {
        b.iter(|| {
            for version in versions {
                black_box(AdaptiveVersion::parse(black_box(version)).ok());
            }
        })
    });
}

fn bench_compare(c: &mut Criterion) {
    let pairs: Vec<(NormalizedVersion, NormalizedVersion)> = [
        ("1.0.dev456", "1.0a1"),
        ("1.0b2.post345", "1.0c1.dev456"),
        ("1.0", "1.0.post345.dev456"),
        ("1.2.0", "1.2"),
    ]
    .iter()
    .filter_map(|(a, b)| Some((NormalizedVersion::parse(a).ok()?, NormalizedVersion::parse(b).ok()?)))
    .collect();

    c.bench_function("compare_normalized", |b| {
        b.iter(|| {
            for (left, right) in &pairs {
                black_box(black_box(left).cmp(black_box(right)));
            }
        })
    });
}

fn bench_matcher(c: &mut Criterion) {
    let requirements = [
        "Hey (>=2.5,!=2.6,<2.7)",
        "foo [bar] (~= 1.4.5)",
        "foo (== 1.0.*) ; python_version < \"3\"",
        "foo >= 1.0, < 2.0",
    ];

    c.bench_function("parse_matcher", |b| {
        b.iter(|| {
            for requirement in requirements {
                black_box(NormalizedMatcher::parse(black_box(requirement)).ok());
            }
        })
    });

    let matcher = NormalizedMatcher::parse("Hey (>=2.5,!=2.6,<2.7)").ok();
    let candidates = ["2.4", "2.5", "2.5.1", "2.6", "2.6.post1", "2.7.dev0"];
    c.bench_function("matcher_match", |b| {
        b.iter(|| {
            if let Some(matcher) = &matcher {
                for candidate in candidates {
                    black_box(matcher.matches(black_box(candidate)).ok());
                }
            }
        })
    });
}

fn bench_sort_and_suggest(c: &mut Criterion) {
    let versions = [
        "1.0", "1.0.post1", "0.9", "1.0.dev1", "1.0a1", "2.0", "1.10", "1.2rc1", "1.1",
    ];

    c.bench_function("sort_adaptive", |b| {
        b.iter(|| black_box(Versions::sort(SchemeKind::Adaptive, black_box(&versions))))
    });

    let loose = ["1.0-alpha1", "0.4a1.r10", "2.4preview1", "1.4p1", "walla walla"];
    c.bench_function("suggest_normalized", |b| {
        b.iter(|| {
            for version in loose {
                black_box(suggest_normalized_version(black_box(version)));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_adaptive_fallback,
    bench_compare,
    bench_matcher,
    bench_sort_and_suggest
);
criterion_main!(benches);
