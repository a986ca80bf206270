//! roofline-kernels: cycle-accurate peak-FLOPS and memory-bandwidth
//! micro-kernels.
//!
//! Empirically locates a core's compute and memory ceilings by timing
//! architecture-tuned busy-loops:
//!
//! - **Build-time ISA profile**: one vector extension per build
//!   (AVX-512/AVX2/AVX/SSE4.1/SSE2/NEON), resolved once, strict
//!   most-capable-first priority
//! - **Full-register-file unrolling**: 16-op arithmetic units and 12-register
//!   streaming units, described as testable sequences and realized in
//!   hand-written inline assembly
//! - **Serialized timing**: fenced cycle-counter reads bracketing a closed
//!   busy-loop with no calls, allocation, or I/O
//! - **Fork-join workers**: barrier-synchronized scoped threads, a single
//!   coordinating worker capturing both timestamps
//!
//! # Quick start
//!
//! ```no_run
//! use roofline_kernels::{isa, measure_flops, ComputeKind};
//!
//! let profile = isa::profile()?;
//! let out = measure_flops(profile, 1_000_000, ComputeKind::MulAdd, 1)?;
//! println!("{:.1} GFLOP/s over {} cycles", out.gflops(), out.elapsed_cycles());
//! # Ok::<(), roofline_kernels::RooflineError>(())
//! ```
//!
//! Result records are single deterministic samples; run repeatedly and
//! discard outliers externally. Buffer allocation, core pinning, and report
//! formatting are caller concerns.

pub mod bandwidth;
pub mod error;
pub mod flops;
pub mod isa;
pub mod output;
pub mod sequence;
pub mod timer;

mod kernels;
mod parallel;

pub use bandwidth::measure_bandwidth;
pub use error::{Result, RooflineError};
pub use flops::measure_flops;
pub use isa::{IsaExt, IsaProfile};
pub use output::BenchmarkOutput;
pub use sequence::{AccessPattern, ComputeKind};
