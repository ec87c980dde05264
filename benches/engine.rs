#![allow(clippy::panic)]

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use offset_amm::prelude::*;

const E18: u128 = 1_000_000_000_000_000_000;

fn addr(byte: u8) -> Address {
    Address::from_bytes([byte; 32])
}

/// An exchange holding one pool seeded with `(a, b)` at ratio `virt`.
fn seeded(virt: u32, a: u128, b: u128) -> (Exchange, Address) {
    let mut ex = Exchange::new(ExchangeConfig::new(addr(0xad)));
    for asset in [addr(1), addr(2)] {
        let Ok(()) = ex.deploy_asset(asset, TokenMetadata::new("Asset", "AST", 18), addr(0x11), Amount::MAX)
        else {
            panic!("deploy failed");
        };
    }
    let Ok(pool) = ex.create_pool(addr(1), addr(2), VirtualRatio::new(virt)) else {
        panic!("create failed");
    };
    for (asset, amount) in [(addr(1), a), (addr(2), b)] {
        let Ok(()) = ex.transfer(addr(0x11), asset, pool, Amount::new(amount)) else {
            panic!("deposit failed");
        };
    }
    let Ok(_) = ex.mint(addr(0x11), pool, addr(0x11)) else {
        panic!("mint failed");
    };
    (ex, pool)
}

fn bench_quote(c: &mut Criterion) {
    let mut g = c.benchmark_group("quote");
    g.warm_up_time(Duration::from_secs(2));
    g.measurement_time(Duration::from_secs(5));
    g.throughput(Throughput::Elements(1));

    let cases: [(&str, u128, u128, u128); 4] = [
        ("sym_small", 1_000_000 * E18, 1_000_000 * E18, 1_000 * E18),
        ("sym_large", 5_000_000_000 * E18, 5_000_000_000 * E18, 1_000_000 * E18),
        ("asym_a", 1_000_000_000 * E18, 1_000_000 * E18, 1_000 * E18),
        ("asym_b", 1_000_000 * E18, 1_000_000_000 * E18, 1_000 * E18),
    ];
    for (label, ra, rb, amount_in) in cases {
        g.bench_function(label, |b| {
            b.iter(|| {
                let out = get_amount_out(
                    black_box(Amount::new(amount_in)),
                    black_box(Amount::new(ra)),
                    black_box(Amount::new(rb)),
                );
                black_box(out)
            });
        });
    }
    g.finish();
}

fn bench_swap(c: &mut Criterion) {
    let mut g = c.benchmark_group("swap");
    g.throughput(Throughput::Elements(1));

    for virt in [0u32, 1_000, 10_000] {
        g.bench_function(format!("exact_in_v{virt}"), |b| {
            b.iter_batched(
                || {
                    let (ex, pool) = seeded(virt, 1_000 * E18, 4_000 * E18);
                    let (ra, rb, _) = ex.pool(&pool).map_or((Amount::ZERO, Amount::ZERO, 0), PoolEngine::get_reserves);
                    let Ok(out) = get_amount_out(Amount::new(E18), ra, rb) else {
                        panic!("quote failed");
                    };
                    (ex, pool, out)
                },
                |(mut ex, pool, out)| {
                    let Ok(()) = ex.transfer(addr(0x11), addr(1), pool, Amount::new(E18)) else {
                        panic!("payment failed");
                    };
                    black_box(ex.swap(addr(0x11), pool, Amount::ZERO, out, addr(0x11), &[]))
                },
                BatchSize::SmallInput,
            );
        });
    }
    g.finish();
}

fn bench_mint(c: &mut Criterion) {
    let mut g = c.benchmark_group("mint");
    g.throughput(Throughput::Elements(1));

    for virt in [0u32, 1_000, 10_000] {
        g.bench_function(format!("follow_up_v{virt}"), |b| {
            b.iter_batched(
                || {
                    let (mut ex, pool) = seeded(virt, 1_000 * E18, 4_000 * E18);
                    for (asset, amount) in [(addr(1), E18), (addr(2), 4 * E18)] {
                        let Ok(()) = ex.transfer(addr(0x11), asset, pool, Amount::new(amount)) else {
                            panic!("deposit failed");
                        };
                    }
                    (ex, pool)
                },
                |(mut ex, pool)| black_box(ex.mint(addr(0x11), pool, addr(0x11))),
                BatchSize::SmallInput,
            );
        });
    }
    g.finish();
}

criterion_group!(benches, bench_quote, bench_swap, bench_mint);
criterion_main!(benches);
