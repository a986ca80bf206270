//! ISA profile resolution.
//!
//! The vector extension is a build-time property: the loop bodies in
//! `kernels/` are compiled for exactly one extension, so the profile is
//! resolved from `cfg!(target_feature)` once and cached for the process.
//! Priority is strict, most capable extension first, and identical everywhere
//! in the process — compiling with `-C target-feature=+avx512f` and asking
//! for the profile can only ever yield the AVX-512 profile.

use std::sync::OnceLock;

use crate::error::{Result, RooflineError};

/// Closed set of supported vector extensions, most capable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IsaExt {
    Avx512,
    Avx2,
    Avx,
    Sse41,
    Sse2,
    Neon,
}

/// Register geometry and per-operation mnemonics for one vector extension.
///
/// Immutable once resolved; shared read-only by every kernel in the process.
/// The mnemonic fields name the double-precision instruction family the loop
/// bodies are built from; `sequence::render` uses them to describe the exact
/// instruction stream a kernel executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsaProfile {
    pub ext: IsaExt,
    /// Architectural register class as spelled in assembly ("zmm", "ymm", "xmm", "v").
    pub reg_class: &'static str,
    /// Number of architectural vector registers.
    pub n_regs: usize,
    /// Bytes per vector register.
    pub reg_bytes: usize,
    /// f64 lanes per vector register (FLOPs per vector op).
    pub lanes: usize,
    pub load: &'static str,
    /// Non-temporal load; falls back to the cached load below SSE4.1/AVX2.
    pub load_nt: &'static str,
    pub store: &'static str,
    pub store_nt: &'static str,
    pub mul: &'static str,
    pub add: &'static str,
    /// Fused multiply-add, absent when the build target lacks FMA.
    pub fma: Option<&'static str>,
}

impl IsaProfile {
    /// True for three-operand (VEX/EVEX/NEON) encodings, false for the
    /// destructive two-operand SSE forms.
    pub fn three_operand(&self) -> bool {
        !matches!(self.ext, IsaExt::Sse2 | IsaExt::Sse41)
    }
}

static PROFILE: OnceLock<Option<IsaProfile>> = OnceLock::new();

/// The process-wide profile for the build target.
///
/// `Err(NoVectorIsa)` when the target declares no supported extension; this
/// is a configuration error, not something a run can recover from.
pub fn profile() -> Result<&'static IsaProfile> {
    PROFILE
        .get_or_init(|| {
            let p = resolve();
            match &p {
                Some(p) => log::debug!(
                    "resolved ISA profile: {:?} ({} x {}B {} registers)",
                    p.ext,
                    p.n_regs,
                    p.reg_bytes,
                    p.reg_class
                ),
                None => log::warn!("no vector extension declared for this build target"),
            }
            p
        })
        .as_ref()
        .ok_or(RooflineError::NoVectorIsa)
}

fn resolve() -> Option<IsaProfile> {
    // cfg! keeps every arm type-checked while the selection stays a
    // build-time constant, mirroring the mutually-exclusive #ifdef ladder
    // this table descends from.
    if cfg!(all(target_arch = "x86_64", target_feature = "avx512f")) {
        Some(IsaProfile {
            ext: IsaExt::Avx512,
            reg_class: "zmm",
            n_regs: 32,
            reg_bytes: 64,
            lanes: 8,
            load: "vmovapd",
            load_nt: "vmovntdqa",
            store: "vmovapd",
            store_nt: "vmovntpd",
            mul: "vmulpd",
            add: "vaddpd",
            // AVX-512F implies FMA on every shipping implementation.
            fma: Some("vfmadd132pd"),
        })
    } else if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) {
        Some(IsaProfile {
            ext: IsaExt::Avx2,
            reg_class: "ymm",
            n_regs: 16,
            reg_bytes: 32,
            lanes: 4,
            load: "vmovapd",
            load_nt: "vmovntdqa",
            store: "vmovapd",
            store_nt: "vmovntpd",
            mul: "vmulpd",
            add: "vaddpd",
            fma: if cfg!(target_feature = "fma") {
                Some("vfmadd132pd")
            } else {
                None
            },
        })
    } else if cfg!(all(target_arch = "x86_64", target_feature = "avx")) {
        Some(IsaProfile {
            ext: IsaExt::Avx,
            reg_class: "ymm",
            n_regs: 16,
            reg_bytes: 32,
            lanes: 4,
            load: "vmovapd",
            // ymm-wide vmovntdqa needs AVX2; stay on the cached load.
            load_nt: "vmovapd",
            store: "vmovapd",
            store_nt: "vmovntpd",
            mul: "vmulpd",
            add: "vaddpd",
            fma: if cfg!(target_feature = "fma") {
                Some("vfmadd132pd")
            } else {
                None
            },
        })
    } else if cfg!(all(target_arch = "x86_64", target_feature = "sse4.1")) {
        Some(IsaProfile {
            ext: IsaExt::Sse41,
            reg_class: "xmm",
            n_regs: 16,
            reg_bytes: 16,
            lanes: 2,
            load: "movapd",
            load_nt: "movapd",
            store: "movapd",
            store_nt: "movntpd",
            mul: "mulpd",
            add: "addpd",
            fma: None,
        })
    } else if cfg!(target_arch = "x86_64") {
        // SSE2 is part of the x86_64 baseline, so x86_64 always resolves.
        Some(IsaProfile {
            ext: IsaExt::Sse2,
            reg_class: "xmm",
            n_regs: 16,
            reg_bytes: 16,
            lanes: 2,
            load: "movapd",
            load_nt: "movapd",
            store: "movapd",
            store_nt: "movntpd",
            mul: "mulpd",
            add: "addpd",
            fma: None,
        })
    } else if cfg!(target_arch = "aarch64") {
        Some(IsaProfile {
            ext: IsaExt::Neon,
            reg_class: "v",
            n_regs: 32,
            reg_bytes: 16,
            lanes: 2,
            load: "ldr",
            // No non-temporal single-register form; cached ops stand in,
            // as they do below SSE4.1.
            load_nt: "ldr",
            store: "str",
            store_nt: "str",
            mul: "fmul",
            add: "fadd",
            fma: Some("fmla"),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_exactly_once_and_consistently() {
        let a = profile();
        let b = profile();
        assert_eq!(a.ok().map(|p| p.ext), b.ok().map(|p| p.ext));
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn x86_64_always_has_a_profile() {
        let p = profile().expect("SSE2 baseline must resolve");
        assert_eq!(p.reg_bytes * 8, p.lanes * 64);
        assert!(p.n_regs >= 16);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn priority_is_most_capable_first() {
        let p = profile().unwrap();
        // Whatever the build enables, the resolved extension must be the
        // highest one the target declares.
        if cfg!(target_feature = "avx512f") {
            assert_eq!(p.ext, IsaExt::Avx512);
        } else if cfg!(target_feature = "avx2") {
            assert_eq!(p.ext, IsaExt::Avx2);
        } else if cfg!(target_feature = "avx") {
            assert_eq!(p.ext, IsaExt::Avx);
        } else if cfg!(target_feature = "sse4.1") {
            assert_eq!(p.ext, IsaExt::Sse41);
        } else {
            assert_eq!(p.ext, IsaExt::Sse2);
        }
    }

    #[test]
    fn sse_profiles_are_two_operand() {
        for ext in [IsaExt::Sse2, IsaExt::Sse41] {
            let p = IsaProfile {
                ext,
                reg_class: "xmm",
                n_regs: 16,
                reg_bytes: 16,
                lanes: 2,
                load: "movapd",
                load_nt: "movapd",
                store: "movapd",
                store_nt: "movntpd",
                mul: "mulpd",
                add: "addpd",
                fma: None,
            };
            assert!(!p.three_operand());
        }
    }
}
