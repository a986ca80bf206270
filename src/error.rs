use crate::isa::IsaExt;
use thiserror::Error;

/// Pre-flight failures. Every variant is detected before the timed region
/// starts; once timing begins a measurement runs to completion and is
/// returned as-is, outliers included.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RooflineError {
    #[error("build target declares no supported vector extension")]
    NoVectorIsa,

    #[error("loop_repeat must be positive")]
    ZeroRepeat,

    #[error("worker count must be positive")]
    ZeroWorkers,

    #[error("stream buffer is empty")]
    EmptyStream,

    #[error("stream of {stream_bytes} bytes does not split evenly across {workers} workers")]
    UnevenPartition { stream_bytes: usize, workers: usize },

    #[error(
        "per-worker slice of {slice_bytes} bytes is not a multiple of the {chunk_bytes}-byte chunk"
    )]
    ChunkMisfit { slice_bytes: usize, chunk_bytes: usize },

    #[error("stream at {addr:#x} is not {required}-byte aligned as the access pattern requires")]
    MisalignedStream { addr: usize, required: usize },

    #[error("fused multiply-add is not available under {ext:?}")]
    FmaUnavailable { ext: IsaExt },
}

pub type Result<T> = std::result::Result<T, RooflineError>;
