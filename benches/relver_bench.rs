use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relver::prelude::*;

fn version_inputs() -> Vec<&'static str> {
    vec![
        "1.0.1",
        "1.0.1-SNAPSHOT",
        "releaseCandidateOrName-1.0.1-SNAPSHOT",
        "releaseNAME-releaseCandidate-1.0.1-SNAPSHOT",
        "apollo_beta_3.1_nightly-7",
    ]
}

fn parse_all(inputs: &[&str]) {
    for input in inputs {
        let res = VersionInfo::parse(input);
        assert!(res.is_ok());
    }
}

fn develop_all(inputs: &[VersionInfo]) {
    for version in inputs {
        let res = version.next_version().map(|next| next.snapshot_version_string());
        assert!(res.is_ok());
    }
}

fn compare_pairs() -> Vec<(VersionInfo, VersionInfo)> {
    [
        ("1.01.01", "1.01"),
        ("1.0-RC1", "1.0-rc1"),
        ("1.0-SNAPSHOT", "1.0"),
        ("2.0.1-alpha-3", "2.0.1-beta-1"),
    ]
    .iter()
    .map(|(a, b)| (VersionInfo::parse(a).unwrap(), VersionInfo::parse(b).unwrap()))
    .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let inputs = version_inputs();
    let parsed: Vec<VersionInfo> = inputs.iter().map(|s| VersionInfo::parse(s).unwrap()).collect();
    let pairs = compare_pairs();

    c.bench_function("parse", |b| b.iter(|| parse_all(black_box(&inputs))));
    c.bench_function("develop", |b| b.iter(|| develop_all(black_box(&parsed))));
    c.bench_function("compare", |b| {
        b.iter(|| {
            for (a, other) in black_box(&pairs) {
                black_box(a.compare(other));
            }
        })
    });
    c.bench_function("sort", |b| {
        b.iter(|| {
            let mut sorted = black_box(&parsed).clone();
            sorted.sort();
            sorted
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
