//! Shared test helpers.

/// Cache-line-sized, 64-byte-aligned storage block. A `Vec` of these gives a
/// stream aligned for every supported register width (16/32/64 bytes).
#[repr(align(64))]
#[derive(Clone, Copy)]
struct CacheLine([f64; 8]);

/// Caller-owned, 64-byte-aligned stream buffer for bandwidth tests.
pub struct AlignedStream {
    lines: Vec<CacheLine>,
}

impl AlignedStream {
    /// Allocate `len` doubles (must be a multiple of 8 so whole cache lines
    /// back the slice), initialized to 1.0.
    pub fn new(len: usize) -> Self {
        assert_eq!(len % 8, 0, "length must be a whole number of cache lines");
        Self {
            lines: vec![CacheLine([1.0; 8]); len / 8],
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        let len = self.lines.len() * 8;
        unsafe { std::slice::from_raw_parts_mut(self.lines.as_mut_ptr().cast::<f64>(), len) }
    }
}
