use memchr::memchr2_iter;
use tracing::{debug, trace};

use crate::checksum::{Checksum, Fletcher16};
use crate::{payload_capacity, ESC, ESC_MASK, FLAG};

/// Builds complete frames in a fixed buffer of `N` bytes.
///
/// `N` is the buffer length, not the payload capacity; use
/// [`frame_capacity`] to size it for a given payload:
///
/// ```
/// use frameline::{frame_capacity, FrameEncoder, FLAG};
///
/// let mut encoder = FrameEncoder::<{ frame_capacity(100) }>::new();
/// assert_eq!(encoder.write(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]), 10);
/// assert_eq!(encoder.size(), 14);
/// assert_eq!(encoder.data()[0], FLAG);
/// assert_eq!(encoder.data()[13], FLAG);
/// ```
#[derive(Debug, Clone)]
pub struct FrameEncoder<const N: usize, C = Fletcher16> {
    buffer: [u8; N],
    frame_pos: usize,
    checksum: C,
}

impl<const N: usize, C: Checksum> FrameEncoder<N, C> {
    /// Largest payload a single [`write`](Self::write) accepts.
    pub const PAYLOAD_CAPACITY: usize = payload_capacity(N);

    /// Construct an encoder with an empty frame buffer.
    pub fn new() -> Self {
        Self {
            buffer: [0; N],
            frame_pos: 0,
            checksum: C::default(),
        }
    }

    /// Encode `payload` as a frame, replacing the previously encoded one.
    ///
    /// Returns the number of payload bytes consumed: `payload.len()` on success,
    /// `0` when the payload is empty or exceeds [`PAYLOAD_CAPACITY`](Self::PAYLOAD_CAPACITY).
    /// A rejected payload leaves the previous frame in place.
    pub fn write(&mut self, payload: &[u8]) -> usize {
        if payload.is_empty() || payload.len() > Self::PAYLOAD_CAPACITY {
            debug!(
                len = payload.len(),
                capacity = Self::PAYLOAD_CAPACITY,
                "rejecting payload"
            );
            return 0;
        }

        self.frame_pos = 0;
        self.checksum.reset();
        self.push(FLAG);

        // Copy plain runs in one go and stuff the reserved bytes between them.
        let mut start = 0usize;
        for pos in memchr2_iter(FLAG, ESC, payload) {
            self.checksum.update(&payload[start..=pos]);
            self.push_slice(&payload[start..pos]);
            self.push_escaped(payload[pos]);
            start = pos + 1;
        }
        let value = self.checksum.update(&payload[start..]);
        self.push_slice(&payload[start..]);

        for byte in value.to_le_bytes() {
            self.push_stuffed(byte);
        }
        self.push(FLAG);

        trace!(
            payload_len = payload.len(),
            wire_len = self.frame_pos,
            checksum = value,
            "encoded frame"
        );
        payload.len()
    }

    /// Number of wire bytes in the current frame, delimiters and escapes included.
    pub fn size(&self) -> usize {
        self.frame_pos
    }

    /// Wire bytes of the current frame; empty before the first successful write.
    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.frame_pos]
    }

    // Writes below never exceed `N`: `write` only runs them for payloads that
    // fit `PAYLOAD_CAPACITY`, whose worst case is exactly `frame_capacity`.

    fn push(&mut self, byte: u8) {
        self.buffer[self.frame_pos] = byte;
        self.frame_pos += 1;
    }

    fn push_slice(&mut self, bytes: &[u8]) {
        let end = self.frame_pos + bytes.len();
        self.buffer[self.frame_pos..end].copy_from_slice(bytes);
        self.frame_pos = end;
    }

    fn push_escaped(&mut self, byte: u8) {
        self.push(ESC);
        self.push(byte ^ ESC_MASK);
    }

    fn push_stuffed(&mut self, byte: u8) {
        match byte {
            FLAG | ESC => self.push_escaped(byte),
            value => self.push(value),
        }
    }
}

impl<const N: usize, C: Checksum> Default for FrameEncoder<N, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the exact wire length of the frame `payload` encodes to, without encoding it.
///
/// ```
/// use frameline::{encoded_len, Fletcher16, ESC, FLAG};
///
/// assert_eq!(encoded_len::<Fletcher16>(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]), 14);
/// assert_eq!(encoded_len::<Fletcher16>(&[FLAG, ESC]), 1 + 4 + 2 + 1);
/// ```
pub fn encoded_len<C: Checksum>(payload: &[u8]) -> usize {
    let escapes = memchr2_iter(FLAG, ESC, payload).count();
    let checksum_len: usize = C::compute(payload)
        .to_le_bytes()
        .iter()
        .map(|&byte| match byte {
            FLAG | ESC => 2,
            _ => 1,
        })
        .sum();
    // Start and end delimiters.
    2 + payload.len() + escapes + checksum_len
}
