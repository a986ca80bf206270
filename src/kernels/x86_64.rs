//! x86_64 loop bodies (SSE2/SSE4.1, AVX/AVX2, AVX-512).
//!
//! One family compiles per build, matching the resolved profile:
//!
//!   xmm path: 16 x 128-bit registers, two-operand ops, 192-byte chunk
//!   ymm path: 16 x 256-bit registers, VEX three-operand, 384-byte chunk
//!   zmm path: 512-bit registers, EVEX, 768-byte chunk
//!
//! Register allocation, all paths:
//!   regs 0-15 : flop-rate unit, one op per register, ascending
//!   regs 0-11 : memory unit, one transfer per register, ascending offsets
//!
//! Loop skeleton follows the original `sub`/`jnz` counted form: the outer
//! counter starts at `loop_repeat`; the memory loops re-arm a moving pointer
//! and a byte countdown per traversal. The timed region contains nothing
//! else — no calls, no stack traffic, no allocation.

use crate::sequence::{AccessPattern, ComputeKind};

#[cfg(not(target_feature = "avx"))]
pub(crate) use sse::{flops_loop, stream_loop, zero_regs};

#[cfg(all(target_feature = "avx", not(target_feature = "avx512f")))]
pub(crate) use avx::{flops_loop, stream_loop, zero_regs};

#[cfg(target_feature = "avx512f")]
pub(crate) use avx512::{flops_loop, stream_loop, zero_regs};

// ───────────────────────── xmm (SSE2 / SSE4.1) ─────────────────────────

#[cfg(not(target_feature = "avx"))]
mod sse {
    use super::*;
    use core::arch::asm;

    /// Zero xmm0-xmm15: a known, denormal-free starting state for the
    /// arithmetic loop.
    pub(crate) unsafe fn zero_regs() {
        asm!(
            "pxor xmm0, xmm0",
            "pxor xmm1, xmm1",
            "pxor xmm2, xmm2",
            "pxor xmm3, xmm3",
            "pxor xmm4, xmm4",
            "pxor xmm5, xmm5",
            "pxor xmm6, xmm6",
            "pxor xmm7, xmm7",
            "pxor xmm8, xmm8",
            "pxor xmm9, xmm9",
            "pxor xmm10, xmm10",
            "pxor xmm11, xmm11",
            "pxor xmm12, xmm12",
            "pxor xmm13, xmm13",
            "pxor xmm14, xmm14",
            "pxor xmm15, xmm15",
            out("xmm0") _, out("xmm1") _, out("xmm2") _, out("xmm3") _,
            out("xmm4") _, out("xmm5") _, out("xmm6") _, out("xmm7") _,
            out("xmm8") _, out("xmm9") _, out("xmm10") _, out("xmm11") _,
            out("xmm12") _, out("xmm13") _, out("xmm14") _, out("xmm15") _,
            options(nostack, nomem),
        );
    }

    // 16-op unit alternating $op1/$op2 across xmm0-xmm15 (two-operand form),
    // decremented from `loop_repeat`.
    macro_rules! flops_asm {
        ($op1:literal, $op2:literal, $repeat:expr) => {
            asm!(
                "2:",
                concat!($op1, " xmm0, xmm0"),
                concat!($op2, " xmm1, xmm1"),
                concat!($op1, " xmm2, xmm2"),
                concat!($op2, " xmm3, xmm3"),
                concat!($op1, " xmm4, xmm4"),
                concat!($op2, " xmm5, xmm5"),
                concat!($op1, " xmm6, xmm6"),
                concat!($op2, " xmm7, xmm7"),
                concat!($op1, " xmm8, xmm8"),
                concat!($op2, " xmm9, xmm9"),
                concat!($op1, " xmm10, xmm10"),
                concat!($op2, " xmm11, xmm11"),
                concat!($op1, " xmm12, xmm12"),
                concat!($op2, " xmm13, xmm13"),
                concat!($op1, " xmm14, xmm14"),
                concat!($op2, " xmm15, xmm15"),
                "sub {n}, 1",
                "jnz 2b",
                n = inout(reg) $repeat => _,
                out("xmm0") _, out("xmm1") _, out("xmm2") _, out("xmm3") _,
                out("xmm4") _, out("xmm5") _, out("xmm6") _, out("xmm7") _,
                out("xmm8") _, out("xmm9") _, out("xmm10") _, out("xmm11") _,
                out("xmm12") _, out("xmm13") _, out("xmm14") _, out("xmm15") _,
                options(nostack, nomem),
            )
        };
    }

    pub(crate) unsafe fn flops_loop(kind: ComputeKind, repeat: u64) {
        match kind {
            ComputeKind::Add => flops_asm!("addpd", "addpd", repeat),
            ComputeKind::Mul => flops_asm!("mulpd", "mulpd", repeat),
            ComputeKind::MulAdd => flops_asm!("mulpd", "addpd", repeat),
            // Profile carries no FMA mnemonic; measure_flops rejects this
            // before dispatching here.
            ComputeKind::Fma => unreachable!("FMA rejected pre-flight on SSE"),
        }
    }

    // Chunk traversal skeleton shared by the four patterns; the 12 transfer
    // lines are spelled per pattern below.
    macro_rules! stream_asm {
        ($base:expr, $len:expr, $repeat:expr, [$($line:literal),+ $(,)?], $($opts:ident),+) => {
            asm!(
                "2:",
                "mov {ptr}, {base}",
                "mov {cnt}, {len}",
                "3:",
                $(concat!($line),)+
                "add {ptr}, 192",
                "sub {cnt}, 192",
                "jnz 3b",
                "sub {n}, 1",
                "jnz 2b",
                base = in(reg) $base,
                len = in(reg) $len,
                n = inout(reg) $repeat => _,
                ptr = out(reg) _,
                cnt = out(reg) _,
                out("xmm0") _, out("xmm1") _, out("xmm2") _, out("xmm3") _,
                out("xmm4") _, out("xmm5") _, out("xmm6") _, out("xmm7") _,
                out("xmm8") _, out("xmm9") _, out("xmm10") _, out("xmm11") _,
                options($($opts),+),
            )
        };
    }

    pub(crate) unsafe fn stream_loop(
        pattern: AccessPattern,
        base: *mut u8,
        slice_bytes: usize,
        repeat: u64,
    ) {
        match pattern {
            AccessPattern::Load => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "movapd xmm0, [{ptr}]",
                    "movapd xmm1, [{ptr} + 16]",
                    "movapd xmm2, [{ptr} + 32]",
                    "movapd xmm3, [{ptr} + 48]",
                    "movapd xmm4, [{ptr} + 64]",
                    "movapd xmm5, [{ptr} + 80]",
                    "movapd xmm6, [{ptr} + 96]",
                    "movapd xmm7, [{ptr} + 112]",
                    "movapd xmm8, [{ptr} + 128]",
                    "movapd xmm9, [{ptr} + 144]",
                    "movapd xmm10, [{ptr} + 160]",
                    "movapd xmm11, [{ptr} + 176]",
                ],
                nostack, readonly
            ),
            AccessPattern::Store => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "movapd [{ptr}], xmm0",
                    "movapd [{ptr} + 16], xmm1",
                    "movapd [{ptr} + 32], xmm2",
                    "movapd [{ptr} + 48], xmm3",
                    "movapd [{ptr} + 64], xmm4",
                    "movapd [{ptr} + 80], xmm5",
                    "movapd [{ptr} + 96], xmm6",
                    "movapd [{ptr} + 112], xmm7",
                    "movapd [{ptr} + 128], xmm8",
                    "movapd [{ptr} + 144], xmm9",
                    "movapd [{ptr} + 160], xmm10",
                    "movapd [{ptr} + 176], xmm11",
                ],
                nostack
            ),
            AccessPattern::LoadStore => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "movapd xmm0, [{ptr}]",
                    "movapd xmm1, [{ptr} + 16]",
                    "movapd [{ptr} + 32], xmm2",
                    "movapd xmm3, [{ptr} + 48]",
                    "movapd xmm4, [{ptr} + 64]",
                    "movapd [{ptr} + 80], xmm5",
                    "movapd xmm6, [{ptr} + 96]",
                    "movapd xmm7, [{ptr} + 112]",
                    "movapd [{ptr} + 128], xmm8",
                    "movapd xmm9, [{ptr} + 144]",
                    "movapd xmm10, [{ptr} + 160]",
                    "movapd [{ptr} + 176], xmm11",
                ],
                nostack
            ),
            // Non-temporal loads are unavailable below SSE4.1 for doubles;
            // cached loads stand in and the stores still bypass cache.
            AccessPattern::Copy => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "movapd xmm0, [{ptr}]",
                    "movntpd [{ptr} + 16], xmm1",
                    "movapd xmm2, [{ptr} + 32]",
                    "movntpd [{ptr} + 48], xmm3",
                    "movapd xmm4, [{ptr} + 64]",
                    "movntpd [{ptr} + 80], xmm5",
                    "movapd xmm6, [{ptr} + 96]",
                    "movntpd [{ptr} + 112], xmm7",
                    "movapd xmm8, [{ptr} + 128]",
                    "movntpd [{ptr} + 144], xmm9",
                    "movapd xmm10, [{ptr} + 160]",
                    "movntpd [{ptr} + 176], xmm11",
                ],
                nostack
            ),
        }
    }
}

// ───────────────────────── ymm (AVX / AVX2) ─────────────────────────

#[cfg(all(target_feature = "avx", not(target_feature = "avx512f")))]
mod avx {
    use super::*;
    use core::arch::asm;

    /// Zero via VEX xor: zero-extends through the full ymm width, no
    /// SSE/AVX transition stall.
    pub(crate) unsafe fn zero_regs() {
        asm!(
            "vpxor xmm0, xmm0, xmm0",
            "vpxor xmm1, xmm1, xmm1",
            "vpxor xmm2, xmm2, xmm2",
            "vpxor xmm3, xmm3, xmm3",
            "vpxor xmm4, xmm4, xmm4",
            "vpxor xmm5, xmm5, xmm5",
            "vpxor xmm6, xmm6, xmm6",
            "vpxor xmm7, xmm7, xmm7",
            "vpxor xmm8, xmm8, xmm8",
            "vpxor xmm9, xmm9, xmm9",
            "vpxor xmm10, xmm10, xmm10",
            "vpxor xmm11, xmm11, xmm11",
            "vpxor xmm12, xmm12, xmm12",
            "vpxor xmm13, xmm13, xmm13",
            "vpxor xmm14, xmm14, xmm14",
            "vpxor xmm15, xmm15, xmm15",
            out("xmm0") _, out("xmm1") _, out("xmm2") _, out("xmm3") _,
            out("xmm4") _, out("xmm5") _, out("xmm6") _, out("xmm7") _,
            out("xmm8") _, out("xmm9") _, out("xmm10") _, out("xmm11") _,
            out("xmm12") _, out("xmm13") _, out("xmm14") _, out("xmm15") _,
            options(nostack, nomem),
        );
    }

    macro_rules! flops_asm {
        ($op1:literal, $op2:literal, $repeat:expr) => {
            asm!(
                "2:",
                concat!($op1, " ymm0, ymm0, ymm0"),
                concat!($op2, " ymm1, ymm1, ymm1"),
                concat!($op1, " ymm2, ymm2, ymm2"),
                concat!($op2, " ymm3, ymm3, ymm3"),
                concat!($op1, " ymm4, ymm4, ymm4"),
                concat!($op2, " ymm5, ymm5, ymm5"),
                concat!($op1, " ymm6, ymm6, ymm6"),
                concat!($op2, " ymm7, ymm7, ymm7"),
                concat!($op1, " ymm8, ymm8, ymm8"),
                concat!($op2, " ymm9, ymm9, ymm9"),
                concat!($op1, " ymm10, ymm10, ymm10"),
                concat!($op2, " ymm11, ymm11, ymm11"),
                concat!($op1, " ymm12, ymm12, ymm12"),
                concat!($op2, " ymm13, ymm13, ymm13"),
                concat!($op1, " ymm14, ymm14, ymm14"),
                concat!($op2, " ymm15, ymm15, ymm15"),
                "sub {n}, 1",
                "jnz 2b",
                n = inout(reg) $repeat => _,
                out("xmm0") _, out("xmm1") _, out("xmm2") _, out("xmm3") _,
                out("xmm4") _, out("xmm5") _, out("xmm6") _, out("xmm7") _,
                out("xmm8") _, out("xmm9") _, out("xmm10") _, out("xmm11") _,
                out("xmm12") _, out("xmm13") _, out("xmm14") _, out("xmm15") _,
                options(nostack, nomem),
            )
        };
    }

    pub(crate) unsafe fn flops_loop(kind: ComputeKind, repeat: u64) {
        match kind {
            ComputeKind::Add => flops_asm!("vaddpd", "vaddpd", repeat),
            ComputeKind::Mul => flops_asm!("vmulpd", "vmulpd", repeat),
            ComputeKind::MulAdd => flops_asm!("vmulpd", "vaddpd", repeat),
            ComputeKind::Fma => {
                #[cfg(target_feature = "fma")]
                flops_asm!("vfmadd132pd", "vfmadd132pd", repeat);
                #[cfg(not(target_feature = "fma"))]
                unreachable!("FMA rejected pre-flight without the fma feature");
            }
        }
    }

    macro_rules! stream_asm {
        ($base:expr, $len:expr, $repeat:expr, [$($line:literal),+ $(,)?], $($opts:ident),+) => {
            asm!(
                "2:",
                "mov {ptr}, {base}",
                "mov {cnt}, {len}",
                "3:",
                $(concat!($line),)+
                "add {ptr}, 384",
                "sub {cnt}, 384",
                "jnz 3b",
                "sub {n}, 1",
                "jnz 2b",
                base = in(reg) $base,
                len = in(reg) $len,
                n = inout(reg) $repeat => _,
                ptr = out(reg) _,
                cnt = out(reg) _,
                out("xmm0") _, out("xmm1") _, out("xmm2") _, out("xmm3") _,
                out("xmm4") _, out("xmm5") _, out("xmm6") _, out("xmm7") _,
                out("xmm8") _, out("xmm9") _, out("xmm10") _, out("xmm11") _,
                options($($opts),+),
            )
        };
    }

    pub(crate) unsafe fn stream_loop(
        pattern: AccessPattern,
        base: *mut u8,
        slice_bytes: usize,
        repeat: u64,
    ) {
        match pattern {
            AccessPattern::Load => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "vmovapd ymm0, [{ptr}]",
                    "vmovapd ymm1, [{ptr} + 32]",
                    "vmovapd ymm2, [{ptr} + 64]",
                    "vmovapd ymm3, [{ptr} + 96]",
                    "vmovapd ymm4, [{ptr} + 128]",
                    "vmovapd ymm5, [{ptr} + 160]",
                    "vmovapd ymm6, [{ptr} + 192]",
                    "vmovapd ymm7, [{ptr} + 224]",
                    "vmovapd ymm8, [{ptr} + 256]",
                    "vmovapd ymm9, [{ptr} + 288]",
                    "vmovapd ymm10, [{ptr} + 320]",
                    "vmovapd ymm11, [{ptr} + 352]",
                ],
                nostack, readonly
            ),
            AccessPattern::Store => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "vmovapd [{ptr}], ymm0",
                    "vmovapd [{ptr} + 32], ymm1",
                    "vmovapd [{ptr} + 64], ymm2",
                    "vmovapd [{ptr} + 96], ymm3",
                    "vmovapd [{ptr} + 128], ymm4",
                    "vmovapd [{ptr} + 160], ymm5",
                    "vmovapd [{ptr} + 192], ymm6",
                    "vmovapd [{ptr} + 224], ymm7",
                    "vmovapd [{ptr} + 256], ymm8",
                    "vmovapd [{ptr} + 288], ymm9",
                    "vmovapd [{ptr} + 320], ymm10",
                    "vmovapd [{ptr} + 352], ymm11",
                ],
                nostack
            ),
            AccessPattern::LoadStore => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "vmovapd ymm0, [{ptr}]",
                    "vmovapd ymm1, [{ptr} + 32]",
                    "vmovapd [{ptr} + 64], ymm2",
                    "vmovapd ymm3, [{ptr} + 96]",
                    "vmovapd ymm4, [{ptr} + 128]",
                    "vmovapd [{ptr} + 160], ymm5",
                    "vmovapd ymm6, [{ptr} + 192]",
                    "vmovapd ymm7, [{ptr} + 224]",
                    "vmovapd [{ptr} + 256], ymm8",
                    "vmovapd ymm9, [{ptr} + 288]",
                    "vmovapd ymm10, [{ptr} + 320]",
                    "vmovapd [{ptr} + 352], ymm11",
                ],
                nostack
            ),
            AccessPattern::Copy => {
                // ymm-wide vmovntdqa needs AVX2; plain AVX keeps the cached
                // load, matching its profile.
                #[cfg(target_feature = "avx2")]
                stream_asm!(
                    base, slice_bytes, repeat,
                    [
                        "vmovntdqa ymm0, [{ptr}]",
                        "vmovntpd [{ptr} + 32], ymm1",
                        "vmovntdqa ymm2, [{ptr} + 64]",
                        "vmovntpd [{ptr} + 96], ymm3",
                        "vmovntdqa ymm4, [{ptr} + 128]",
                        "vmovntpd [{ptr} + 160], ymm5",
                        "vmovntdqa ymm6, [{ptr} + 192]",
                        "vmovntpd [{ptr} + 224], ymm7",
                        "vmovntdqa ymm8, [{ptr} + 256]",
                        "vmovntpd [{ptr} + 288], ymm9",
                        "vmovntdqa ymm10, [{ptr} + 320]",
                        "vmovntpd [{ptr} + 352], ymm11",
                    ],
                    nostack
                );
                #[cfg(not(target_feature = "avx2"))]
                stream_asm!(
                    base, slice_bytes, repeat,
                    [
                        "vmovapd ymm0, [{ptr}]",
                        "vmovntpd [{ptr} + 32], ymm1",
                        "vmovapd ymm2, [{ptr} + 64]",
                        "vmovntpd [{ptr} + 96], ymm3",
                        "vmovapd ymm4, [{ptr} + 128]",
                        "vmovntpd [{ptr} + 160], ymm5",
                        "vmovapd ymm6, [{ptr} + 192]",
                        "vmovntpd [{ptr} + 224], ymm7",
                        "vmovapd ymm8, [{ptr} + 256]",
                        "vmovntpd [{ptr} + 288], ymm9",
                        "vmovapd ymm10, [{ptr} + 320]",
                        "vmovntpd [{ptr} + 352], ymm11",
                    ],
                    nostack
                );
            }
        }
    }
}

// ───────────────────────── zmm (AVX-512) ─────────────────────────

#[cfg(target_feature = "avx512f")]
mod avx512 {
    use super::*;
    use core::arch::asm;

    pub(crate) unsafe fn zero_regs() {
        asm!(
            "vpxor xmm0, xmm0, xmm0",
            "vpxor xmm1, xmm1, xmm1",
            "vpxor xmm2, xmm2, xmm2",
            "vpxor xmm3, xmm3, xmm3",
            "vpxor xmm4, xmm4, xmm4",
            "vpxor xmm5, xmm5, xmm5",
            "vpxor xmm6, xmm6, xmm6",
            "vpxor xmm7, xmm7, xmm7",
            "vpxor xmm8, xmm8, xmm8",
            "vpxor xmm9, xmm9, xmm9",
            "vpxor xmm10, xmm10, xmm10",
            "vpxor xmm11, xmm11, xmm11",
            "vpxor xmm12, xmm12, xmm12",
            "vpxor xmm13, xmm13, xmm13",
            "vpxor xmm14, xmm14, xmm14",
            "vpxor xmm15, xmm15, xmm15",
            out("xmm0") _, out("xmm1") _, out("xmm2") _, out("xmm3") _,
            out("xmm4") _, out("xmm5") _, out("xmm6") _, out("xmm7") _,
            out("xmm8") _, out("xmm9") _, out("xmm10") _, out("xmm11") _,
            out("xmm12") _, out("xmm13") _, out("xmm14") _, out("xmm15") _,
            options(nostack, nomem),
        );
    }

    // The compute unit stays 16 ops over zmm0-zmm15 even though AVX-512 has
    // 32 registers, keeping `loop_repeat` accounting identical across
    // extensions; the upper file is left to the memory unit's future use.
    macro_rules! flops_asm {
        ($op1:literal, $op2:literal, $repeat:expr) => {
            asm!(
                "2:",
                concat!($op1, " zmm0, zmm0, zmm0"),
                concat!($op2, " zmm1, zmm1, zmm1"),
                concat!($op1, " zmm2, zmm2, zmm2"),
                concat!($op2, " zmm3, zmm3, zmm3"),
                concat!($op1, " zmm4, zmm4, zmm4"),
                concat!($op2, " zmm5, zmm5, zmm5"),
                concat!($op1, " zmm6, zmm6, zmm6"),
                concat!($op2, " zmm7, zmm7, zmm7"),
                concat!($op1, " zmm8, zmm8, zmm8"),
                concat!($op2, " zmm9, zmm9, zmm9"),
                concat!($op1, " zmm10, zmm10, zmm10"),
                concat!($op2, " zmm11, zmm11, zmm11"),
                concat!($op1, " zmm12, zmm12, zmm12"),
                concat!($op2, " zmm13, zmm13, zmm13"),
                concat!($op1, " zmm14, zmm14, zmm14"),
                concat!($op2, " zmm15, zmm15, zmm15"),
                "sub {n}, 1",
                "jnz 2b",
                n = inout(reg) $repeat => _,
                out("zmm0") _, out("zmm1") _, out("zmm2") _, out("zmm3") _,
                out("zmm4") _, out("zmm5") _, out("zmm6") _, out("zmm7") _,
                out("zmm8") _, out("zmm9") _, out("zmm10") _, out("zmm11") _,
                out("zmm12") _, out("zmm13") _, out("zmm14") _, out("zmm15") _,
                options(nostack, nomem),
            )
        };
    }

    pub(crate) unsafe fn flops_loop(kind: ComputeKind, repeat: u64) {
        match kind {
            ComputeKind::Add => flops_asm!("vaddpd", "vaddpd", repeat),
            ComputeKind::Mul => flops_asm!("vmulpd", "vmulpd", repeat),
            ComputeKind::MulAdd => flops_asm!("vmulpd", "vaddpd", repeat),
            // EVEX-encoded FMA is part of AVX-512F itself.
            ComputeKind::Fma => flops_asm!("vfmadd132pd", "vfmadd132pd", repeat),
        }
    }

    macro_rules! stream_asm {
        ($base:expr, $len:expr, $repeat:expr, [$($line:literal),+ $(,)?], $($opts:ident),+) => {
            asm!(
                "2:",
                "mov {ptr}, {base}",
                "mov {cnt}, {len}",
                "3:",
                $(concat!($line),)+
                "add {ptr}, 768",
                "sub {cnt}, 768",
                "jnz 3b",
                "sub {n}, 1",
                "jnz 2b",
                base = in(reg) $base,
                len = in(reg) $len,
                n = inout(reg) $repeat => _,
                ptr = out(reg) _,
                cnt = out(reg) _,
                out("zmm0") _, out("zmm1") _, out("zmm2") _, out("zmm3") _,
                out("zmm4") _, out("zmm5") _, out("zmm6") _, out("zmm7") _,
                out("zmm8") _, out("zmm9") _, out("zmm10") _, out("zmm11") _,
                options($($opts),+),
            )
        };
    }

    pub(crate) unsafe fn stream_loop(
        pattern: AccessPattern,
        base: *mut u8,
        slice_bytes: usize,
        repeat: u64,
    ) {
        match pattern {
            AccessPattern::Load => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "vmovapd zmm0, [{ptr}]",
                    "vmovapd zmm1, [{ptr} + 64]",
                    "vmovapd zmm2, [{ptr} + 128]",
                    "vmovapd zmm3, [{ptr} + 192]",
                    "vmovapd zmm4, [{ptr} + 256]",
                    "vmovapd zmm5, [{ptr} + 320]",
                    "vmovapd zmm6, [{ptr} + 384]",
                    "vmovapd zmm7, [{ptr} + 448]",
                    "vmovapd zmm8, [{ptr} + 512]",
                    "vmovapd zmm9, [{ptr} + 576]",
                    "vmovapd zmm10, [{ptr} + 640]",
                    "vmovapd zmm11, [{ptr} + 704]",
                ],
                nostack, readonly
            ),
            AccessPattern::Store => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "vmovapd [{ptr}], zmm0",
                    "vmovapd [{ptr} + 64], zmm1",
                    "vmovapd [{ptr} + 128], zmm2",
                    "vmovapd [{ptr} + 192], zmm3",
                    "vmovapd [{ptr} + 256], zmm4",
                    "vmovapd [{ptr} + 320], zmm5",
                    "vmovapd [{ptr} + 384], zmm6",
                    "vmovapd [{ptr} + 448], zmm7",
                    "vmovapd [{ptr} + 512], zmm8",
                    "vmovapd [{ptr} + 576], zmm9",
                    "vmovapd [{ptr} + 640], zmm10",
                    "vmovapd [{ptr} + 704], zmm11",
                ],
                nostack
            ),
            AccessPattern::LoadStore => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "vmovapd zmm0, [{ptr}]",
                    "vmovapd zmm1, [{ptr} + 64]",
                    "vmovapd [{ptr} + 128], zmm2",
                    "vmovapd zmm3, [{ptr} + 192]",
                    "vmovapd zmm4, [{ptr} + 256]",
                    "vmovapd [{ptr} + 320], zmm5",
                    "vmovapd zmm6, [{ptr} + 384]",
                    "vmovapd zmm7, [{ptr} + 448]",
                    "vmovapd [{ptr} + 512], zmm8",
                    "vmovapd zmm9, [{ptr} + 576]",
                    "vmovapd zmm10, [{ptr} + 640]",
                    "vmovapd [{ptr} + 704], zmm11",
                ],
                nostack
            ),
            AccessPattern::Copy => stream_asm!(
                base, slice_bytes, repeat,
                [
                    "vmovntdqa zmm0, [{ptr}]",
                    "vmovntpd [{ptr} + 64], zmm1",
                    "vmovntdqa zmm2, [{ptr} + 128]",
                    "vmovntpd [{ptr} + 192], zmm3",
                    "vmovntdqa zmm4, [{ptr} + 256]",
                    "vmovntpd [{ptr} + 320], zmm5",
                    "vmovntdqa zmm6, [{ptr} + 384]",
                    "vmovntpd [{ptr} + 448], zmm7",
                    "vmovntdqa zmm8, [{ptr} + 512]",
                    "vmovntpd [{ptr} + 576], zmm9",
                    "vmovntdqa zmm10, [{ptr} + 640]",
                    "vmovntpd [{ptr} + 704], zmm11",
                ],
                nostack
            ),
        }
    }
}
