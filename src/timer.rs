//! Serialized cycle-counter reads and TSC frequency detection.
//!
//! A roofline measurement brackets a busy-loop with two counter reads. Both
//! reads use the identical fencing sequence (`lfence; rdtsc` on x86_64,
//! `isb; mrs cntvct_el0` on aarch64) so the pipeline disturbance the fence
//! causes cancels in the difference. `lfence` dispatch-serializes on Intel
//! and on AMD Zen+ without the GPR clobber and hypervisor exit a `cpuid`
//! fence would cost.

use std::sync::OnceLock;

/// Read the cycle counter behind a pipeline-serializing fence.
///
/// No instruction issued after the fence begins before every prior
/// instruction has dispatched, so the read cannot drift into the measured
/// region and the measured region cannot drift past the read. The counter's
/// high and low halves are read separately and reassembled here.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub fn serialized_rdtsc() -> u64 {
    let lo: u32;
    let hi: u32;
    unsafe {
        core::arch::asm!(
            "lfence",
            "rdtsc",
            out("eax") lo,
            out("edx") hi,
            options(nostack, nomem),
        );
    }
    ((hi as u64) << 32) | (lo as u64)
}

#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub fn serialized_rdtsc() -> u64 {
    let ticks: u64;
    unsafe {
        core::arch::asm!(
            "isb",
            "mrs {t}, cntvct_el0",
            t = out(reg) ticks,
            options(nostack, nomem),
        );
    }
    ticks
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub fn serialized_rdtsc() -> u64 {
    // Targets without a resolvable profile never reach a timed region, but
    // the symbol still has to exist for the crate to build.
    static EPOCH: OnceLock<std::time::Instant> = OnceLock::new();
    let epoch = *EPOCH.get_or_init(std::time::Instant::now);
    epoch.elapsed().as_nanos() as u64
}

/// Elapsed cycles between two [`serialized_rdtsc`] reads.
///
/// Straight 64-bit subtraction. A 64-bit TSC at realistic core frequencies
/// wraps after decades, so a single benchmark run cannot span a wrap and no
/// wrap correction is applied; if `later < earlier` the counter was disturbed
/// and the (huge) wrapped value is returned as-is so callers can discard the
/// sample, per the measurement-anomaly policy.
#[inline(always)]
pub fn elapsed(later: u64, earlier: u64) -> u64 {
    later.wrapping_sub(earlier)
}

// ---------------------------------------------------------------------------
// Counter frequency
// ---------------------------------------------------------------------------

static TSC_FREQ_HZ: OnceLock<u64> = OnceLock::new();

/// Counter frequency in Hz, detected once and cached. Never called from
/// inside a timed region.
pub fn tsc_freq_hz() -> u64 {
    *TSC_FREQ_HZ.get_or_init(detect_tsc_freq)
}

/// Convert a cycle delta to seconds.
#[inline]
pub fn cycles_to_secs(cycles: u64) -> f64 {
    cycles as f64 / tsc_freq_hz() as f64
}

#[cfg(target_arch = "aarch64")]
fn detect_tsc_freq() -> u64 {
    // The generic timer architecturally reports its own frequency.
    let hz: u64;
    unsafe {
        core::arch::asm!("mrs {f}, cntfrq_el0", f = out(reg) hz, options(nostack, nomem));
    }
    if hz > 0 {
        hz
    } else {
        calibrate_by_sleep()
    }
}

#[cfg(not(target_arch = "aarch64"))]
fn detect_tsc_freq() -> u64 {
    #[cfg(target_arch = "x86_64")]
    if let Some(hz) = tsc_freq_from_cpuid() {
        return hz;
    }
    #[cfg(target_os = "linux")]
    if let Some(hz) = tsc_freq_from_proc_cpuinfo() {
        return hz;
    }
    calibrate_by_sleep()
}

#[cfg(target_arch = "x86_64")]
fn tsc_freq_from_cpuid() -> Option<u64> {
    // Leaf 0x15: eax=denominator, ebx=numerator, ecx=crystal Hz.
    let info = core::arch::x86_64::__cpuid(0x15);
    let denom = info.eax as u64;
    let numer = info.ebx as u64;
    let crystal = info.ecx as u64;
    if denom == 0 || numer == 0 {
        return None;
    }
    if crystal != 0 {
        return Some(crystal * numer / denom);
    }
    // Crystal unreported: leaf 0x16 carries the base frequency in MHz and
    // the TSC runs at base frequency on modern parts.
    let base_mhz = core::arch::x86_64::__cpuid(0x16).eax as u64 & 0xFFFF;
    if base_mhz > 0 {
        Some(base_mhz * 1_000_000)
    } else {
        None
    }
}

#[cfg(target_os = "linux")]
fn tsc_freq_from_proc_cpuinfo() -> Option<u64> {
    let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    for line in content.lines() {
        if line.starts_with("cpu MHz") {
            let mhz: f64 = line.split(':').nth(1)?.trim().parse().ok()?;
            return Some((mhz * 1e6) as u64);
        }
    }
    None
}

fn calibrate_by_sleep() -> u64 {
    let c0 = serialized_rdtsc();
    let t0 = std::time::Instant::now();
    std::thread::sleep(std::time::Duration::from_millis(10));
    let c1 = serialized_rdtsc();
    let secs = t0.elapsed().as_secs_f64();
    if secs > 0.0 {
        (elapsed(c1, c0) as f64 / secs) as u64
    } else {
        3_000_000_000
    }
}
