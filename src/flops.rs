//! Peak floating-point throughput measurement.

use crate::error::{Result, RooflineError};
use crate::isa::IsaProfile;
use crate::kernels;
use crate::output::BenchmarkOutput;
use crate::parallel;
use crate::sequence::{ComputeKind, COMPUTE_UNIT_OPS};

/// Measure sustained issue-bound arithmetic throughput.
///
/// Every worker zeroes its vector registers, then runs `loop_repeat`
/// iterations of the 16-op unit for `kind`. The timed interval contains only
/// the unrolled arithmetic loop — no memory traffic, no calls — so
/// `elapsed_cycles / instructions` approximates the core's peak issue rate.
///
/// One timed run, no retries: repeat externally for statistical confidence.
///
/// Exact accounting, independent of wall time:
/// `instructions = 16 * loop_repeat * workers`,
/// `flops = instructions * lanes`.
pub fn measure_flops(
    profile: &IsaProfile,
    loop_repeat: u64,
    kind: ComputeKind,
    workers: usize,
) -> Result<BenchmarkOutput> {
    if loop_repeat == 0 {
        return Err(RooflineError::ZeroRepeat);
    }
    if kind == ComputeKind::Fma && profile.fma.is_none() {
        return Err(RooflineError::FmaUnavailable { ext: profile.ext });
    }

    let ts = parallel::run_timed(
        workers,
        |_| unsafe { kernels::zero_regs() },
        |_| unsafe { kernels::flops_loop(kind, loop_repeat) },
    )?;

    let instructions = COMPUTE_UNIT_OPS as u64 * loop_repeat * workers as u64;
    Ok(BenchmarkOutput {
        ts_start: ts.start,
        ts_end: ts.end,
        instructions,
        flops: instructions * profile.lanes as u64,
        bytes: 0,
    })
}
