//! Roofline ceiling report: peak GFLOP/s per arithmetic mix and GB/s per
//! access pattern, on top of the self-timing kernels.
//!
//! The kernels carry their own serialized cycle timing; criterion wraps the
//! whole call, so its numbers include the fork-join overhead. The printed
//! per-call `gflops()`/`gbytes_per_sec()` come from the cycle counter and
//! are the roofline figures.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use roofline_kernels::{
    isa, measure_bandwidth, measure_flops, AccessPattern, ComputeKind,
};

const FLOP_REPEAT: u64 = 1_000_000;
/// 3 MiB: a chunk multiple for every profile, comfortably past L2.
const STREAM_F64S: usize = 3 * 1024 * 1024 / 8;
const STREAM_REPEAT: u64 = 8;

fn bench_flops(c: &mut Criterion) {
    let Ok(profile) = isa::profile() else { return };
    let mut group = c.benchmark_group("flops");

    let kinds = [
        (ComputeKind::Add, "add"),
        (ComputeKind::Mul, "mul"),
        (ComputeKind::MulAdd, "mul_add"),
        (ComputeKind::Fma, "fma"),
    ];
    for (kind, name) in kinds {
        if kind == ComputeKind::Fma && profile.fma.is_none() {
            continue;
        }
        let flops_per_call = 16 * FLOP_REPEAT * profile.lanes as u64;
        group.throughput(Throughput::Elements(flops_per_call));
        group.bench_with_input(BenchmarkId::from_parameter(name), &kind, |b, &kind| {
            b.iter(|| {
                let out = measure_flops(profile, FLOP_REPEAT, kind, 1).unwrap();
                black_box(out.elapsed_cycles())
            })
        });
    }
    group.finish();
}

fn bench_bandwidth(c: &mut Criterion) {
    let Ok(profile) = isa::profile() else { return };

    #[repr(align(64))]
    #[derive(Clone, Copy)]
    struct CacheLine([f64; 8]);
    let mut lines = vec![CacheLine([1.0; 8]); STREAM_F64S / 8];
    let stream = unsafe {
        std::slice::from_raw_parts_mut(lines.as_mut_ptr().cast::<f64>(), STREAM_F64S)
    };

    let mut group = c.benchmark_group("bandwidth");
    group.throughput(Throughput::Bytes(STREAM_F64S as u64 * 8 * STREAM_REPEAT));

    let patterns = [
        (AccessPattern::Load, "load"),
        (AccessPattern::Store, "store"),
        (AccessPattern::LoadStore, "2ld1st"),
        (AccessPattern::Copy, "nt_copy"),
    ];
    for (pattern, name) in patterns {
        group.bench_with_input(BenchmarkId::from_parameter(name), &pattern, |b, &pattern| {
            b.iter(|| {
                let out =
                    measure_bandwidth(profile, &mut stream[..], STREAM_REPEAT, pattern, 1)
                        .unwrap();
                black_box(out.elapsed_cycles())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_flops, bench_bandwidth);
criterion_main!(benches);
