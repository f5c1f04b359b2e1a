//! Split / combine / derive benchmarks.
//!
//! A 12-word phrase is ~60 bytes; shares are sized accordingly.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shamir_wallet::core::key_manager::derive_ethereum_account;
use shamir_wallet::shamir::{combine_shares, split_secret};

const PHRASE: &str = "test test test test test test test test test test test junk";

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_secret");
    for (n, k) in [(3u8, 2u8), (6, 3), (255, 128)] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{k}-of-{n}")), &(n, k), |b, &(n, k)| {
            b.iter(|| split_secret(black_box(PHRASE.as_bytes()), n, k).unwrap());
        });
    }
    group.finish();
}

fn bench_combine(c: &mut Criterion) {
    let shares = split_secret(PHRASE.as_bytes(), 6, 3).unwrap();
    let subset = &shares[..3];
    c.bench_function("combine_shares_3_of_6", |b| {
        b.iter(|| combine_shares(black_box(subset)).unwrap());
    });
}

/// Dominated by the 2048 PBKDF2 rounds of the seed.
fn bench_derive(c: &mut Criterion) {
    c.bench_function("derive_ethereum_account", |b| {
        b.iter(|| derive_ethereum_account(black_box(PHRASE), "").unwrap());
    });
}

criterion_group!(benches, bench_split, bench_combine, bench_derive);
criterion_main!(benches);
