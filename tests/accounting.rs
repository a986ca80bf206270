//! Operation accounting: every derived output field must be an exact integer
//! function of the inputs and the profile geometry, never of wall time.

mod common;

use common::AlignedStream;
use roofline_kernels::{
    isa, measure_bandwidth, measure_flops, AccessPattern, ComputeKind,
};

macro_rules! skip_without_profile {
    () => {
        match isa::profile() {
            Ok(p) => p,
            Err(_) => {
                eprintln!("no vector ISA profile for this target, skipping");
                return;
            }
        }
    };
}

/// Stream sized so every profile's chunk (192/384/768 bytes) and every
/// worker count under test divide it exactly: 3 MiB.
const STREAM_F64S: usize = 3 * 1024 * 1024 / 8;

#[test]
fn flops_instruction_count_is_exact() {
    let _ = env_logger::builder().is_test(true).try_init();
    let p = skip_without_profile!();
    for workers in [1, 2] {
        let out = measure_flops(p, 1000, ComputeKind::MulAdd, workers).unwrap();
        assert_eq!(out.instructions, 16_000 * workers as u64);
        assert_eq!(out.flops, out.instructions * p.lanes as u64);
        assert_eq!(out.bytes, 0);
        assert!(out.ts_end >= out.ts_start);
    }
}

#[test]
fn flops_all_kinds_run_and_account_identically() {
    let p = skip_without_profile!();
    for kind in [ComputeKind::Add, ComputeKind::Mul, ComputeKind::MulAdd] {
        let out = measure_flops(p, 500, kind, 1).unwrap();
        assert_eq!(out.instructions, 8_000);
        assert!(out.ts_end >= out.ts_start);
    }
    if p.fma.is_some() {
        let out = measure_flops(p, 500, ComputeKind::Fma, 1).unwrap();
        assert_eq!(out.instructions, 8_000);
    }
}

#[test]
fn flops_scale_linearly_with_repeat_count() {
    let p = skip_without_profile!();
    let a = measure_flops(p, 100, ComputeKind::Mul, 1).unwrap();
    let b = measure_flops(p, 700, ComputeKind::Mul, 1).unwrap();
    assert_eq!(b.instructions, 7 * a.instructions);
    assert_eq!(b.flops, 7 * a.flops);
}

#[test]
fn bandwidth_bytes_are_worker_count_invariant() {
    let p = skip_without_profile!();
    let mut stream = AlignedStream::new(STREAM_F64S);
    let stream = stream.as_mut_slice();
    let stream_bytes = std::mem::size_of_val(stream) as u64;

    for workers in [1, 2, 4] {
        let out = measure_bandwidth(p, stream, 4, AccessPattern::Load, workers).unwrap();
        // Work is redistributed across workers; total traffic is conserved.
        assert_eq!(out.bytes, stream_bytes * 4);
        assert_eq!(out.instructions, out.bytes / p.reg_bytes as u64);
        assert_eq!(out.flops, 0);
        assert!(out.ts_end >= out.ts_start);
    }
}

#[test]
fn bandwidth_all_patterns_run() {
    let p = skip_without_profile!();
    // 16 chunks per worker at the widest chunk size.
    let mut stream = AlignedStream::new(768 * 16 * 2 / 8);
    let stream = stream.as_mut_slice();
    let stream_bytes = std::mem::size_of_val(stream) as u64;

    for pattern in [
        AccessPattern::Load,
        AccessPattern::Store,
        AccessPattern::LoadStore,
        AccessPattern::Copy,
    ] {
        let out = measure_bandwidth(p, stream, 2, pattern, 1).unwrap();
        assert_eq!(out.bytes, stream_bytes * 2);
        assert_eq!(out.instructions, out.bytes / p.reg_bytes as u64);
        assert!(out.ts_end >= out.ts_start);
    }
}

#[test]
fn timed_interval_is_plausible_for_real_work() {
    let p = skip_without_profile!();
    // A million units of 16 vector ops is milliseconds of work; a tiny
    // interval would mean the counter reads were reordered into the loop.
    // The floor is conservative enough for slow-ticking aarch64 counters.
    let out = measure_flops(p, 1_000_000, ComputeKind::MulAdd, 1).unwrap();
    assert!(
        out.elapsed_cycles() > 10_000,
        "implausibly short interval: {} cycles",
        out.elapsed_cycles()
    );
}
