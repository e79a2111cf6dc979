use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hashcash_crypto::{digest, PrefixHasher, MAX_DIGEST_LEN};
use hashcash_types::Algorithm;

const ENCODED: &[u8] = b"1:20:1665396610:bG9jYWxob3N0:sha-256:vZOxuoIgixP+hw==:1313715";
const PREFIX: &[u8] = b"1:20:1665396610:bG9jYWxob3N0:sha-256:vZOxuoIgixP+hw==:";

fn one_shot_digest_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest_one_shot");
    for alg in Algorithm::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(alg), &alg, |b, &alg| {
            b.iter(|| digest(alg, black_box(ENCODED)))
        });
    }
    group.finish();
}

fn prefix_digest_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest_prefix_cached");
    for alg in Algorithm::ALL {
        let hasher = PrefixHasher::new(alg, PREFIX);
        let mut out = [0u8; MAX_DIGEST_LEN];
        group.bench_with_input(BenchmarkId::from_parameter(alg), &alg, |b, _| {
            b.iter(|| {
                hasher.finish_with(black_box(b"1313715"), &mut out);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, one_shot_digest_bench, prefix_digest_bench);
criterion_main!(benches);
