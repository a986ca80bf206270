//! Sustained memory throughput measurement.

use crate::error::{Result, RooflineError};
use crate::isa::IsaProfile;
use crate::kernels;
use crate::output::BenchmarkOutput;
use crate::parallel::{self, SendPtr};
use crate::sequence::{chunk_bytes, AccessPattern};

/// Measure sustained memory throughput over a caller-owned stream.
///
/// The stream is split into `workers` contiguous, non-overlapping slices;
/// worker `w` owns `[w * slice_bytes, (w + 1) * slice_bytes)`. Each worker
/// independently traverses its slice `loop_repeat` times in chunk-sized
/// units of `pattern`'s instruction mix; the only synchronization points are
/// the two barriers bracketing the timed region.
///
/// Pre-flight rejections (nothing is timed on failure):
/// - zero `loop_repeat`, zero workers, empty stream
/// - stream bytes not evenly divisible across the workers
/// - per-worker slice not a multiple of the profile's chunk size
/// - stream base not aligned to the register width (all patterns use the
///   aligned instruction forms)
///
/// Accounting is worker-count invariant: `bytes = stream_bytes *
/// loop_repeat` and `instructions = bytes / reg_bytes`, whatever `workers`.
pub fn measure_bandwidth(
    profile: &IsaProfile,
    stream: &mut [f64],
    loop_repeat: u64,
    pattern: AccessPattern,
    workers: usize,
) -> Result<BenchmarkOutput> {
    if loop_repeat == 0 {
        return Err(RooflineError::ZeroRepeat);
    }
    if workers == 0 {
        return Err(RooflineError::ZeroWorkers);
    }
    let stream_bytes = std::mem::size_of_val(stream);
    if stream_bytes == 0 {
        return Err(RooflineError::EmptyStream);
    }
    if stream_bytes % workers != 0 {
        return Err(RooflineError::UnevenPartition {
            stream_bytes,
            workers,
        });
    }
    let slice_bytes = stream_bytes / workers;
    let chunk = chunk_bytes(profile);
    if slice_bytes % chunk != 0 {
        return Err(RooflineError::ChunkMisfit {
            slice_bytes,
            chunk_bytes: chunk,
        });
    }
    let addr = stream.as_ptr() as usize;
    let required = pattern.required_alignment(profile);
    if addr % required != 0 {
        return Err(RooflineError::MisalignedStream { addr, required });
    }

    log::debug!(
        "partitioned {stream_bytes} B across {workers} workers ({slice_bytes} B per slice)"
    );

    // Slice bases inherit the stream's alignment: slice_bytes is a chunk
    // multiple and the chunk is a register-width multiple.
    let base = SendPtr(stream.as_mut_ptr().cast::<u8>());
    let ts = parallel::run_timed(workers, |_| {}, move |w| {
        // Rebind so the closure captures the whole wrapper, not the raw
        // pointer field (disjoint capture would lose Send/Sync).
        let base = base;
        unsafe {
            kernels::stream_loop(pattern, base.0.add(w * slice_bytes), slice_bytes, loop_repeat);
        }
    })?;

    let bytes = stream_bytes as u64 * loop_repeat;
    Ok(BenchmarkOutput {
        ts_start: ts.start,
        ts_end: ts.end,
        instructions: bytes / profile.reg_bytes as u64,
        flops: 0,
        bytes,
    })
}
