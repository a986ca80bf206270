use crate::timer;

/// Result record for one measurement, written once by the coordinating
/// worker. `instructions`, `flops` and `bytes` are exact integer functions
/// of the inputs and the profile geometry — only the two timestamps carry
/// measurement noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkOutput {
    /// Serialized counter read taken before the kernel bodies start.
    pub ts_start: u64,
    /// Serialized counter read taken after every body has finished.
    pub ts_end: u64,
    /// Vector instructions executed across all workers.
    pub instructions: u64,
    /// Double-precision FLOPs (compute kernels; zero for bandwidth runs).
    pub flops: u64,
    /// Bytes transferred (bandwidth kernels; zero for compute runs).
    pub bytes: u64,
}

impl BenchmarkOutput {
    /// Elapsed cycles. A disturbed sample where `ts_end < ts_start` comes
    /// back wrapped-huge rather than corrected; discard such samples across
    /// repeated runs.
    #[inline]
    pub fn elapsed_cycles(&self) -> u64 {
        timer::elapsed(self.ts_end, self.ts_start)
    }

    /// Elapsed wall time derived from the detected counter frequency.
    pub fn seconds(&self) -> f64 {
        timer::cycles_to_secs(self.elapsed_cycles())
    }

    /// Sustained GFLOP/s over the measured interval.
    pub fn gflops(&self) -> f64 {
        let s = self.seconds();
        if s > 0.0 {
            self.flops as f64 / s / 1e9
        } else {
            0.0
        }
    }

    /// Sustained GB/s over the measured interval.
    pub fn gbytes_per_sec(&self) -> f64 {
        let s = self.seconds();
        if s > 0.0 {
            self.bytes as f64 / s / 1e9
        } else {
            0.0
        }
    }
}
