//! NEON loop bodies (aarch64).
//!
//! Twin of the x86_64 backend: 32 x 128-bit v-registers, two f64 lanes.
//!
//! Register allocation:
//!   v0-v15 : flop-rate unit (`.2d` arrangement), one op per register
//!   q0-q11 : memory unit, `ldr`/`str` at ascending 16-byte offsets,
//!            192-byte chunk
//!
//! aarch64 has no single-register non-temporal form, so the Copy pattern
//! runs cached transfers, as the profile's mnemonic table records.

use crate::sequence::{AccessPattern, ComputeKind};
use core::arch::asm;

pub(crate) unsafe fn zero_regs() {
    asm!(
        "movi v0.16b, #0",
        "movi v1.16b, #0",
        "movi v2.16b, #0",
        "movi v3.16b, #0",
        "movi v4.16b, #0",
        "movi v5.16b, #0",
        "movi v6.16b, #0",
        "movi v7.16b, #0",
        "movi v8.16b, #0",
        "movi v9.16b, #0",
        "movi v10.16b, #0",
        "movi v11.16b, #0",
        "movi v12.16b, #0",
        "movi v13.16b, #0",
        "movi v14.16b, #0",
        "movi v15.16b, #0",
        out("v0") _, out("v1") _, out("v2") _, out("v3") _,
        out("v4") _, out("v5") _, out("v6") _, out("v7") _,
        out("v8") _, out("v9") _, out("v10") _, out("v11") _,
        out("v12") _, out("v13") _, out("v14") _, out("v15") _,
        options(nostack, nomem),
    );
}

macro_rules! flops_asm {
    ($op1:literal, $op2:literal, $repeat:expr) => {
        asm!(
            "2:",
            concat!($op1, " v0.2d, v0.2d, v0.2d"),
            concat!($op2, " v1.2d, v1.2d, v1.2d"),
            concat!($op1, " v2.2d, v2.2d, v2.2d"),
            concat!($op2, " v3.2d, v3.2d, v3.2d"),
            concat!($op1, " v4.2d, v4.2d, v4.2d"),
            concat!($op2, " v5.2d, v5.2d, v5.2d"),
            concat!($op1, " v6.2d, v6.2d, v6.2d"),
            concat!($op2, " v7.2d, v7.2d, v7.2d"),
            concat!($op1, " v8.2d, v8.2d, v8.2d"),
            concat!($op2, " v9.2d, v9.2d, v9.2d"),
            concat!($op1, " v10.2d, v10.2d, v10.2d"),
            concat!($op2, " v11.2d, v11.2d, v11.2d"),
            concat!($op1, " v12.2d, v12.2d, v12.2d"),
            concat!($op2, " v13.2d, v13.2d, v13.2d"),
            concat!($op1, " v14.2d, v14.2d, v14.2d"),
            concat!($op2, " v15.2d, v15.2d, v15.2d"),
            "subs {n}, {n}, #1",
            "b.ne 2b",
            n = inout(reg) $repeat => _,
            out("v0") _, out("v1") _, out("v2") _, out("v3") _,
            out("v4") _, out("v5") _, out("v6") _, out("v7") _,
            out("v8") _, out("v9") _, out("v10") _, out("v11") _,
            out("v12") _, out("v13") _, out("v14") _, out("v15") _,
            options(nostack, nomem),
        )
    };
}

pub(crate) unsafe fn flops_loop(kind: ComputeKind, repeat: u64) {
    match kind {
        ComputeKind::Add => flops_asm!("fadd", "fadd", repeat),
        ComputeKind::Mul => flops_asm!("fmul", "fmul", repeat),
        ComputeKind::MulAdd => flops_asm!("fmul", "fadd", repeat),
        ComputeKind::Fma => flops_asm!("fmla", "fmla", repeat),
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
            "add {ptr}, {ptr}, #192",
            "subs {cnt}, {cnt}, #192",
            "b.ne 3b",
            "subs {n}, {n}, #1",
            "b.ne 2b",
            base = in(reg) $base,
            len = in(reg) $len,
            n = inout(reg) $repeat => _,
            ptr = out(reg) _,
            cnt = out(reg) _,
            out("v0") _, out("v1") _, out("v2") _, out("v3") _,
            out("v4") _, out("v5") _, out("v6") _, out("v7") _,
            out("v8") _, out("v9") _, out("v10") _, out("v11") _,
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
                "ldr q0, [{ptr}]",
                "ldr q1, [{ptr}, #16]",
                "ldr q2, [{ptr}, #32]",
                "ldr q3, [{ptr}, #48]",
                "ldr q4, [{ptr}, #64]",
                "ldr q5, [{ptr}, #80]",
                "ldr q6, [{ptr}, #96]",
                "ldr q7, [{ptr}, #112]",
                "ldr q8, [{ptr}, #128]",
                "ldr q9, [{ptr}, #144]",
                "ldr q10, [{ptr}, #160]",
                "ldr q11, [{ptr}, #176]",
            ],
            nostack, readonly
        ),
        AccessPattern::Store => stream_asm!(
            base, slice_bytes, repeat,
            [
                "str q0, [{ptr}]",
                "str q1, [{ptr}, #16]",
                "str q2, [{ptr}, #32]",
                "str q3, [{ptr}, #48]",
                "str q4, [{ptr}, #64]",
                "str q5, [{ptr}, #80]",
                "str q6, [{ptr}, #96]",
                "str q7, [{ptr}, #112]",
                "str q8, [{ptr}, #128]",
                "str q9, [{ptr}, #144]",
                "str q10, [{ptr}, #160]",
                "str q11, [{ptr}, #176]",
            ],
            nostack
        ),
        AccessPattern::LoadStore => stream_asm!(
            base, slice_bytes, repeat,
            [
                "ldr q0, [{ptr}]",
                "ldr q1, [{ptr}, #16]",
                "str q2, [{ptr}, #32]",
                "ldr q3, [{ptr}, #48]",
                "ldr q4, [{ptr}, #64]",
                "str q5, [{ptr}, #80]",
                "ldr q6, [{ptr}, #96]",
                "ldr q7, [{ptr}, #112]",
                "str q8, [{ptr}, #128]",
                "ldr q9, [{ptr}, #144]",
                "ldr q10, [{ptr}, #160]",
                "str q11, [{ptr}, #176]",
            ],
            nostack
        ),
        AccessPattern::Copy => stream_asm!(
            base, slice_bytes, repeat,
            [
                "ldr q0, [{ptr}]",
                "str q1, [{ptr}, #16]",
                "ldr q2, [{ptr}, #32]",
                "str q3, [{ptr}, #48]",
                "ldr q4, [{ptr}, #64]",
                "str q5, [{ptr}, #80]",
                "ldr q6, [{ptr}, #96]",
                "str q7, [{ptr}, #112]",
                "ldr q8, [{ptr}, #128]",
                "str q9, [{ptr}, #144]",
                "ldr q10, [{ptr}, #160]",
                "str q11, [{ptr}, #176]",
            ],
            nostack
        ),
    }
}
