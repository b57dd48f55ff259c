//! Checksums used to protect frame payloads.

/// A 16-bit checksum that can be computed incrementally or in one shot.
///
/// The encoder folds payload bytes into a running value with [`update`](Checksum::update),
/// the decoder recomputes the value over a complete payload with
/// [`compute`](Checksum::compute). Implement this trait to swap the algorithm
/// without touching the framing code; both ends of a link must agree on it.
pub trait Checksum: Default {
    /// Restart the running computation.
    fn reset(&mut self);

    /// Fold `bytes` into the running computation and return the current value.
    fn update(&mut self, bytes: &[u8]) -> u16;

    /// Compute the checksum of `bytes` from a fresh state.
    fn compute(bytes: &[u8]) -> u16 {
        let mut checksum = Self::default();
        checksum.update(bytes)
    }
}

/// Fletcher-16: two running sums modulo 255, packed as `sum2 << 8 | sum1`.
///
/// ```
/// use frameline::{Checksum, Fletcher16};
///
/// assert_eq!(Fletcher16::compute(b"abcde"), 0xC8F0);
///
/// let mut running = Fletcher16::new();
/// running.update(b"abc");
/// assert_eq!(running.update(b"de"), 0xC8F0);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Fletcher16 {
    sum1: u16,
    sum2: u16,
}

impl Fletcher16 {
    /// Construct a checksum in its initial state.
    pub const fn new() -> Self {
        Self { sum1: 0, sum2: 0 }
    }

    /// Current value without folding in further bytes.
    pub const fn value(&self) -> u16 {
        (self.sum2 << 8) | self.sum1
    }
}

impl Checksum for Fletcher16 {
    fn reset(&mut self) {
        *self = Self::new();
    }

    fn update(&mut self, bytes: &[u8]) -> u16 {
        for &byte in bytes {
            // Both sums stay below 255, so the additions cannot overflow a u16.
            self.sum1 = (self.sum1 + u16::from(byte)) % 255;
            self.sum2 = (self.sum2 + self.sum1) % 255;
        }
        self.value()
    }
}
