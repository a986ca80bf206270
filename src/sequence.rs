//! Instruction-sequence descriptions for the unrolled kernel bodies.
//!
//! The timed loops in `kernels/` are hand-written assembly, which makes
//! their *ordering policy* — which register each unrolled slot touches, at
//! which offset, with which operation — invisible to tests. This module is
//! that policy as data. The asm bodies realize these sequences one-for-one;
//! the accounting in `flops`/`bandwidth` and the tests both derive from the
//! descriptions here, so the numbers a measurement reports can never drift
//! from what the loop actually executes.

use crate::isa::{IsaExt, IsaProfile};

/// Vector ops per compute unit: one op for each of 16 architectural
/// registers, independent of register width, so `loop_repeat` means the same
/// thing on every extension.
pub const COMPUTE_UNIT_OPS: usize = 16;

/// Registers participating in one memory unit. One unit advances the moving
/// pointer by `MEM_UNROLL * reg_bytes` ([`chunk_bytes`]).
pub const MEM_UNROLL: usize = 12;

/// Arithmetic mix for the flop-rate kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeKind {
    /// Additions only.
    Add,
    /// Multiplications only.
    Mul,
    /// Alternating multiply/add (one of each per register pair).
    MulAdd,
    /// Fused multiply-add; rejected pre-flight when the profile lacks FMA.
    Fma,
}

impl ComputeKind {
    /// The two mnemonics alternated across the unit.
    pub fn op_pair(self) -> (FpOp, FpOp) {
        match self {
            ComputeKind::Add => (FpOp::Add, FpOp::Add),
            ComputeKind::Mul => (FpOp::Mul, FpOp::Mul),
            ComputeKind::MulAdd => (FpOp::Mul, FpOp::Add),
            ComputeKind::Fma => (FpOp::Fma, FpOp::Fma),
        }
    }
}

/// Memory access mix for the bandwidth kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPattern {
    /// Pure cached loads.
    Load,
    /// Pure cached stores.
    Store,
    /// Two loads then one store, repeating. The 2:1 instruction ratio is the
    /// contract; the store targets the chunk just loaded, but that address
    /// aliasing is an implementation detail, not a promise.
    LoadStore,
    /// Non-temporal load + non-temporal store copy, bypassing cache to
    /// expose raw memory-controller bandwidth.
    Copy,
}

impl AccessPattern {
    /// The operation cycle tiled across the unit's 12 slots.
    pub fn op_cycle(self) -> &'static [MemOp] {
        match self {
            AccessPattern::Load => &[MemOp::Load],
            AccessPattern::Store => &[MemOp::Store],
            AccessPattern::LoadStore => &[MemOp::Load, MemOp::Load, MemOp::Store],
            AccessPattern::Copy => &[MemOp::LoadNt, MemOp::StoreNt],
        }
    }

    /// All four patterns use the aligned instruction forms, so the stream
    /// must be aligned to the register width.
    pub fn required_alignment(self, profile: &IsaProfile) -> usize {
        profile.reg_bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpOp {
    Mul,
    Add,
    Fma,
}

impl FpOp {
    pub fn mnemonic(self, profile: &IsaProfile) -> &'static str {
        match self {
            FpOp::Mul => profile.mul,
            FpOp::Add => profile.add,
            // Callers reject Fma before describing it for a profile without
            // the extension; rendering anything else here would misreport the
            // instruction stream.
            FpOp::Fma => profile
                .fma
                .expect("Fma mnemonic requested for a profile without fused multiply-add"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemOp {
    Load,
    LoadNt,
    Store,
    StoreNt,
}

impl MemOp {
    pub fn mnemonic(self, profile: &IsaProfile) -> &'static str {
        match self {
            MemOp::Load => profile.load,
            MemOp::LoadNt => profile.load_nt,
            MemOp::Store => profile.store,
            MemOp::StoreNt => profile.store_nt,
        }
    }

    pub fn is_store(self) -> bool {
        matches!(self, MemOp::Store | MemOp::StoreNt)
    }
}

/// One unrolled slot of a compute unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpSlot {
    pub op: FpOp,
    pub reg: usize,
}

/// One unrolled slot of a memory unit: operation, register, and byte offset
/// from the unit's moving pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemSlot {
    pub op: MemOp,
    pub reg: usize,
    pub offset: usize,
}

/// Describe one compute unit: [`COMPUTE_UNIT_OPS`] slots, registers in
/// ascending order. Targets with fewer than 16 architectural registers reuse
/// registers modulo `n_regs`; throughput is then register-file-bound rather
/// than issue-bound, an accepted limitation of such targets.
pub fn compute_unit(kind: ComputeKind, n_regs: usize) -> Vec<FpSlot> {
    let (even, odd) = kind.op_pair();
    (0..COMPUTE_UNIT_OPS)
        .map(|i| FpSlot {
            op: if i % 2 == 0 { even } else { odd },
            reg: i % n_regs,
        })
        .collect()
}

/// Describe one memory unit: [`MEM_UNROLL`] slots walking the chunk in
/// ascending register-width strides, operations tiled from the pattern's
/// cycle.
pub fn memory_unit(pattern: AccessPattern, profile: &IsaProfile) -> Vec<MemSlot> {
    let cycle = pattern.op_cycle();
    (0..MEM_UNROLL)
        .map(|i| MemSlot {
            op: cycle[i % cycle.len()],
            reg: i % profile.n_regs.min(MEM_UNROLL),
            offset: i * profile.reg_bytes,
        })
        .collect()
}

/// Bytes one fully-unrolled memory unit touches; the traversal granularity
/// every per-worker slice must divide into.
pub fn chunk_bytes(profile: &IsaProfile) -> usize {
    MEM_UNROLL * profile.reg_bytes
}

/// Render a compute slot as the assembly the kernel body executes, in the
/// profile's syntax. Purely descriptive; tests diff this against the asm
/// bodies' documented register allocation.
pub fn render_fp(slot: FpSlot, profile: &IsaProfile) -> String {
    let m = slot.op.mnemonic(profile);
    let (c, r) = (profile.reg_class, slot.reg);
    if profile.ext == IsaExt::Neon {
        format!("{m} {c}{r}.2d, {c}{r}.2d, {c}{r}.2d")
    } else if profile.three_operand() {
        format!("{m} {c}{r}, {c}{r}, {c}{r}")
    } else {
        format!("{m} {c}{r}, {c}{r}")
    }
}

/// Render a memory slot against a symbolic moving pointer.
pub fn render_mem(slot: MemSlot, profile: &IsaProfile, ptr: &str) -> String {
    let m = slot.op.mnemonic(profile);
    let (r, off) = (slot.reg, slot.offset);
    if profile.ext == IsaExt::Neon {
        // Load and store spell the register first on aarch64.
        format!("{m} q{r}, [{ptr}, #{off}]")
    } else if slot.op.is_store() {
        format!("{m} [{ptr} + {off}], {}{r}", profile.reg_class)
    } else {
        format!("{m} {}{r}, [{ptr} + {off}]", profile.reg_class)
    }
}
