//! Executable loop bodies for the timed kernels.
//!
//! Hand-written inline assembly, one implementation per vector extension,
//! selected by the same `cfg(target_feature)` ladder that selects the ISA
//! profile. Each body realizes the corresponding `sequence` description
//! one-for-one; the module docs in each backend carry the register
//! allocation the sequences promise.

#[cfg(target_arch = "x86_64")]
mod x86_64;
#[cfg(target_arch = "x86_64")]
pub(crate) use x86_64::{flops_loop, stream_loop, zero_regs};

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "aarch64")]
pub(crate) use aarch64::{flops_loop, stream_loop, zero_regs};

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
mod stub {
    use crate::sequence::{AccessPattern, ComputeKind};

    // No profile resolves on these targets, so the entry points reject every
    // call before reaching a loop body. The symbols exist only to keep the
    // crate building.
    pub(crate) unsafe fn zero_regs() {}

    pub(crate) unsafe fn flops_loop(_kind: ComputeKind, _repeat: u64) {
        unreachable!("no ISA profile resolves on this target")
    }

    pub(crate) unsafe fn stream_loop(
        _pattern: AccessPattern,
        _base: *mut u8,
        _slice_bytes: usize,
        _repeat: u64,
    ) {
        unreachable!("no ISA profile resolves on this target")
    }
}
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) use stub::{flops_loop, stream_loop, zero_regs};
