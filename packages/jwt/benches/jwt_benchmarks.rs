//! Sign and verify throughput per algorithm

#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use ysd_jwt::{Algorithm, FixedClock, SignOptions, VerifyOptions, sign_with_clock, verify_with_clock};

const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
const PRIVATE_PEM: &str = include_str!("../tests/fixtures/rsa_private.pem");
const PUBLIC_PEM: &str = include_str!("../tests/fixtures/rsa_public.pem");
const NOW: i64 = 1_700_000_000;

fn options(alg: Algorithm) -> (SignOptions, VerifyOptions) {
    match alg {
        Algorithm::Rs256 => (SignOptions::rs256(PRIVATE_PEM), VerifyOptions::rs256(PUBLIC_PEM)),
        hmac => (SignOptions::hmac(hmac, SECRET), VerifyOptions::hmac(hmac, SECRET)),
    }
}

/// Benchmark token signing
fn benchmark_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign");
    let claims = json!({"sub": "u1", "roles": ["admin", "ops"], "tenant": 42});

    for alg in [Algorithm::Hs256, Algorithm::Hs384, Algorithm::Hs512, Algorithm::Rs256] {
        let (sign_options, _) = options(alg);
        let sign_options = sign_options.expires_in("1h");
        group.bench_with_input(BenchmarkId::from_parameter(alg), &sign_options, |b, opts| {
            b.iter(|| {
                let token = sign_with_clock(black_box(&claims), opts, &FixedClock(NOW))
                    .expect("signing should succeed");
                black_box(token);
            });
        });
    }
    group.finish();
}

/// Benchmark full verification, including claim checks
fn benchmark_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("verify");
    let claims = json!({"sub": "u1", "roles": ["admin", "ops"], "tenant": 42});

    for alg in [Algorithm::Hs256, Algorithm::Hs384, Algorithm::Hs512, Algorithm::Rs256] {
        let (sign_options, verify_options) = options(alg);
        let token = sign_with_clock(&claims, &sign_options.expires_in("1h"), &FixedClock(NOW))
            .expect("signing should succeed");
        group.bench_with_input(BenchmarkId::from_parameter(alg), &token, |b, token| {
            b.iter(|| {
                let claims =
                    verify_with_clock(black_box(token.as_str()), &verify_options, &FixedClock(NOW))
                        .expect("verification should succeed");
                black_box(claims);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_sign, benchmark_verify);
criterion_main!(benches);
