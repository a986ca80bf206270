//! Property-based tests for the instruction-sequence policy.
//!
//! These hold for all inputs, independent of the hardware the suite runs
//! on: the sequences are pure descriptions, and the accounting formulas the
//! entry points report derive from them.

use proptest::prelude::*;

use roofline_kernels::sequence::{
    chunk_bytes, compute_unit, memory_unit, AccessPattern, ComputeKind, FpOp,
    COMPUTE_UNIT_OPS, MEM_UNROLL,
};
use roofline_kernels::isa;

fn arb_compute_kind() -> impl Strategy<Value = ComputeKind> {
    prop_oneof![
        Just(ComputeKind::Add),
        Just(ComputeKind::Mul),
        Just(ComputeKind::MulAdd),
        Just(ComputeKind::Fma),
    ]
}

fn arb_pattern() -> impl Strategy<Value = AccessPattern> {
    prop_oneof![
        Just(AccessPattern::Load),
        Just(AccessPattern::Store),
        Just(AccessPattern::LoadStore),
        Just(AccessPattern::Copy),
    ]
}

proptest! {
    // 16 ops per unit whatever the kind or register count: the outer-loop
    // iteration count means the same thing on every extension.
    #[test]
    fn compute_unit_is_always_sixteen_ops(kind in arb_compute_kind(), n_regs in 1usize..64) {
        let unit = compute_unit(kind, n_regs);
        prop_assert_eq!(unit.len(), COMPUTE_UNIT_OPS);
    }

    // Registers ascend and wrap modulo the register count, touching the
    // whole file when it is large enough.
    #[test]
    fn compute_unit_registers_ascend_modulo(kind in arb_compute_kind(), n_regs in 1usize..64) {
        let unit = compute_unit(kind, n_regs);
        for (i, slot) in unit.iter().enumerate() {
            prop_assert_eq!(slot.reg, i % n_regs);
        }
    }

    #[test]
    fn compute_unit_alternates_the_op_pair(kind in arb_compute_kind(), n_regs in 1usize..64) {
        let (even, odd) = kind.op_pair();
        let unit = compute_unit(kind, n_regs);
        for (i, slot) in unit.iter().enumerate() {
            prop_assert_eq!(slot.op, if i % 2 == 0 { even } else { odd });
        }
    }

    #[test]
    fn mul_add_mix_is_half_and_half(n_regs in 1usize..64) {
        let unit = compute_unit(ComputeKind::MulAdd, n_regs);
        let muls = unit.iter().filter(|s| s.op == FpOp::Mul).count();
        prop_assert_eq!(muls * 2, unit.len());
    }

    #[test]
    fn memory_unit_tiles_the_pattern_cycle(pattern in arb_pattern()) {
        let Ok(p) = isa::profile() else { return Ok(()) };
        let cycle = pattern.op_cycle();
        let unit = memory_unit(pattern, p);
        prop_assert_eq!(unit.len(), MEM_UNROLL);
        for (i, slot) in unit.iter().enumerate() {
            prop_assert_eq!(slot.op, cycle[i % cycle.len()]);
            prop_assert_eq!(slot.offset, i * p.reg_bytes);
        }
    }

    // One unit touches exactly one chunk: the last transfer ends where the
    // moving pointer's advance begins.
    #[test]
    fn memory_unit_spans_exactly_one_chunk(pattern in arb_pattern()) {
        let Ok(p) = isa::profile() else { return Ok(()) };
        let unit = memory_unit(pattern, p);
        let end = unit.last().unwrap().offset + p.reg_bytes;
        prop_assert_eq!(end, chunk_bytes(p));
        prop_assert_eq!(chunk_bytes(p), MEM_UNROLL * p.reg_bytes);
    }

    // The accounting the entry points report, checked as pure formulas:
    // total bytes depend on stream size and repeat count only.
    #[test]
    fn byte_accounting_is_worker_invariant(
        chunks_per_worker in 1u64..64,
        repeat in 1u64..1000,
        workers in 1u64..16,
    ) {
        let Ok(p) = isa::profile() else { return Ok(()) };
        let chunk = chunk_bytes(p) as u64;
        let stream_bytes = chunks_per_worker * chunk * workers;
        let slice = stream_bytes / workers;
        prop_assert_eq!(slice % chunk, 0);
        let bytes = stream_bytes * repeat;
        // Per-worker traffic times workers equals the aggregate.
        prop_assert_eq!(slice * repeat * workers, bytes);
        prop_assert_eq!(bytes % p.reg_bytes as u64, 0);
    }

    #[test]
    fn flop_accounting_scales_by_lanes_exactly(
        repeat in 1u64..1_000_000,
        workers in 1u64..16,
    ) {
        let Ok(p) = isa::profile() else { return Ok(()) };
        let instructions = COMPUTE_UNIT_OPS as u64 * repeat * workers;
        let flops = instructions * p.lanes as u64;
        prop_assert_eq!(flops % instructions, 0);
        prop_assert_eq!(flops / instructions, p.lanes as u64);
    }
}

#[test]
fn two_load_one_store_ratio_is_structural() {
    let cycle = AccessPattern::LoadStore.op_cycle();
    assert_eq!(cycle.len(), 3);
    assert_eq!(cycle.iter().filter(|op| op.is_store()).count(), 1);
    // The 12-slot unit tiles the 3-op cycle exactly four times.
    assert_eq!(MEM_UNROLL % cycle.len(), 0);
}

#[test]
fn rendered_sequences_use_the_profile_mnemonics() {
    let Ok(p) = isa::profile() else { return };
    let unit = compute_unit(ComputeKind::MulAdd, p.n_regs);
    let first = roofline_kernels::sequence::render_fp(unit[0], p);
    assert!(first.starts_with(p.mul), "{first}");

    let mem = memory_unit(AccessPattern::Copy, p);
    let line = roofline_kernels::sequence::render_mem(mem[1], p, "r11");
    assert!(line.starts_with(p.store_nt), "{line}");
}
