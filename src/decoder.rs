use std::marker::PhantomData;

use memchr::memchr;
use tracing::{debug, trace};

use crate::checksum::{Checksum, Fletcher16};
use crate::{ESC, ESC_MASK, FLAG, FOOTER_LEN, HEADER_LEN};

/// Why the decoder abandoned an in-progress frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The closing delimiter arrived before the two checksum bytes.
    Undersized {
        /// Unescaped bytes accumulated, opening delimiter included.
        len: usize,
    },
    /// The trailing checksum did not match the payload.
    ChecksumMismatch {
        /// Checksum recomputed over the received payload.
        computed: u16,
        /// Checksum carried by the frame.
        received: u16,
    },
    /// The frame did not fit the decoder buffer.
    Overflow,
}

/// Counters describing what a [`FrameDecoder`] has seen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecoderStats {
    /// Frames that passed the checksum.
    pub frames: u64,
    /// Frames closed before they could hold a checksum.
    pub undersized: u64,
    /// Frames whose checksum did not match.
    pub checksum_mismatches: u64,
    /// Frames abandoned because they outgrew the buffer.
    pub overflows: u64,
}

impl DecoderStats {
    /// Total number of frames dropped for any reason.
    pub fn dropped(&self) -> u64 {
        self.undersized + self.checksum_mismatches + self.overflows
    }

    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::Undersized { .. } => self.undersized += 1,
            DropReason::ChecksumMismatch { .. } => self.checksum_mismatches += 1,
            DropReason::Overflow => self.overflows += 1,
        }
    }
}

/// Unescaped bytes of the frame currently on the wire.
///
/// `buffer[0]` holds the opening delimiter once a frame is in progress;
/// `frame_pos == 0` means idle.
#[derive(Debug, Clone)]
struct Accumulator<const N: usize> {
    buffer: [u8; N],
    frame_pos: usize,
    in_escape: bool,
}

impl<const N: usize> Accumulator<N> {
    const fn new() -> Self {
        Self {
            buffer: [0; N],
            frame_pos: 0,
            in_escape: false,
        }
    }

    fn push(&mut self, byte: u8) -> bool {
        if self.frame_pos >= N {
            return false;
        }
        self.buffer[self.frame_pos] = byte;
        self.frame_pos += 1;
        true
    }

    fn reset(&mut self) {
        self.frame_pos = 0;
        self.in_escape = false;
    }
}

/// Payload of the last good frame, drained independently of accumulation.
#[derive(Debug, Clone)]
struct ReadyPayload<const N: usize> {
    buffer: [u8; N],
    read_pos: usize,
    available: usize,
}

impl<const N: usize> ReadyPayload<N> {
    const fn new() -> Self {
        Self {
            buffer: [0; N],
            read_pos: 0,
            available: 0,
        }
    }

    fn load(&mut self, payload: &[u8]) {
        self.buffer[..payload.len()].copy_from_slice(payload);
        self.read_pos = 0;
        self.available = payload.len();
    }

    fn as_slice(&self) -> &[u8] {
        &self.buffer[self.read_pos..self.read_pos + self.available]
    }

    fn pop(&mut self) -> Option<u8> {
        if self.available == 0 {
            return None;
        }
        let byte = self.buffer[self.read_pos];
        self.read_pos += 1;
        self.available -= 1;
        Some(byte)
    }

    fn drain_into(&mut self, out: &mut [u8]) -> usize {
        let len = out.len().min(self.available);
        out[..len].copy_from_slice(&self.buffer[self.read_pos..self.read_pos + len]);
        self.read_pos += len;
        self.available -= len;
        len
    }
}

/// Incremental frame decoder over a fixed buffer of `N` bytes.
///
/// Feed it bytes with [`feed_byte`](Self::feed_byte) (or chunks with
/// [`feed`](Self::feed)); when it returns `true` the payload of a checksum-valid
/// frame is ready to drain with [`read`](Self::read), [`read_byte`](Self::read_byte)
/// or [`data`](Self::data). The ready payload stays put while the next frame
/// accumulates and is only replaced by the next good frame.
///
/// Malformed, oversized and corrupted frames are dropped silently and the
/// decoder goes back to hunting for the next delimiter. [`stats`](Self::stats)
/// tells the drop reasons apart and [`last_drop`](Self::last_drop) names the
/// most recent one.
///
/// A decoder holds two `N`-byte regions, one for the frame being accumulated
/// and one for the ready payload, so it occupies roughly `2 * N` bytes.
///
/// ```
/// use frameline::{frame_capacity, FrameDecoder, FrameEncoder};
///
/// let mut encoder = FrameEncoder::<{ frame_capacity(32) }>::new();
/// encoder.write(b"hello");
///
/// let mut decoder = FrameDecoder::<{ frame_capacity(32) }>::new();
/// let mut found = false;
/// for &byte in encoder.data() {
///     found = decoder.feed_byte(byte);
/// }
/// assert!(found);
/// assert_eq!(decoder.data(), b"hello");
/// ```
#[derive(Debug, Clone)]
pub struct FrameDecoder<const N: usize, C = Fletcher16> {
    frame: Accumulator<N>,
    ready: ReadyPayload<N>,
    stats: DecoderStats,
    last_drop: Option<DropReason>,
    _checksum: PhantomData<C>,
}

impl<const N: usize, C: Checksum> FrameDecoder<N, C> {
    /// Largest payload a frame can carry and still fit the buffer.
    pub const MAX_PAYLOAD_LEN: usize = N.saturating_sub(HEADER_LEN + FOOTER_LEN - 1);

    /// Construct an idle decoder with no payload available.
    pub const fn new() -> Self {
        Self {
            frame: Accumulator::new(),
            ready: ReadyPayload::new(),
            stats: DecoderStats {
                frames: 0,
                undersized: 0,
                checksum_mismatches: 0,
                overflows: 0,
            },
            last_drop: None,
            _checksum: PhantomData,
        }
    }

    /// Process one byte from the stream.
    ///
    /// Returns `true` exactly when `byte` closed a checksum-valid frame; its
    /// payload is then available to drain.
    pub fn feed_byte(&mut self, byte: u8) -> bool {
        if self.frame.frame_pos == 0 {
            if byte == FLAG && self.frame.push(byte) {
                trace!("frame start");
            }
            return false;
        }

        if byte == FLAG {
            return self.close_frame();
        }

        if byte == ESC && !self.frame.in_escape {
            self.frame.in_escape = true;
            return false;
        }

        let value = if self.frame.in_escape {
            self.frame.in_escape = false;
            byte ^ ESC_MASK
        } else {
            byte
        };
        if !self.frame.push(value) {
            self.drop_frame(DropReason::Overflow);
        }
        false
    }

    /// Process a chunk of the stream, stopping right after the first completed frame.
    ///
    /// Returns how many bytes of `input` were consumed and whether a frame
    /// completed. Feed the rest of `input` after draining the payload. Bytes
    /// before the next opening delimiter are skipped without inspection.
    ///
    /// ```
    /// use frameline::{frame_capacity, FrameDecoder, FrameEncoder};
    ///
    /// let mut encoder = FrameEncoder::<{ frame_capacity(16) }>::new();
    /// encoder.write(b"one");
    /// let mut stream = vec![0x00, 0x11];
    /// stream.extend_from_slice(encoder.data());
    /// encoder.write(b"two");
    /// stream.extend_from_slice(encoder.data());
    ///
    /// let mut decoder = FrameDecoder::<{ frame_capacity(16) }>::new();
    /// let (consumed, complete) = decoder.feed(&stream);
    /// assert!(complete);
    /// assert_eq!(decoder.data(), b"one");
    /// let (rest, complete) = decoder.feed(&stream[consumed..]);
    /// assert!(complete);
    /// assert_eq!(consumed + rest, stream.len());
    /// assert_eq!(decoder.data(), b"two");
    /// ```
    pub fn feed(&mut self, input: &[u8]) -> (usize, bool) {
        let mut consumed = 0usize;
        while consumed < input.len() {
            if self.frame.frame_pos == 0 {
                match memchr(FLAG, &input[consumed..]) {
                    Some(offset) => consumed += offset,
                    None => return (input.len(), false),
                }
            }
            let byte = input[consumed];
            consumed += 1;
            if self.feed_byte(byte) {
                return (consumed, true);
            }
        }
        (consumed, false)
    }

    /// Number of payload bytes not yet drained.
    pub fn available(&self) -> usize {
        self.ready.available
    }

    /// Alias of [`available`](Self::available).
    pub fn size(&self) -> usize {
        self.ready.available
    }

    /// Undrained payload bytes, starting at the read cursor.
    pub fn data(&self) -> &[u8] {
        self.ready.as_slice()
    }

    /// Drain one payload byte.
    ///
    /// Returns `0` once the payload is exhausted; check
    /// [`available`](Self::available) to tell that apart from a zero byte.
    pub fn read_byte(&mut self) -> u8 {
        self.ready.pop().unwrap_or(0)
    }

    /// Drain up to `buf.len()` payload bytes into `buf`, returning how many were copied.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        self.ready.drain_into(buf)
    }

    /// `true` once an opening delimiter has been seen and no frame has closed since.
    pub fn in_frame(&self) -> bool {
        self.frame.frame_pos > 0
    }

    /// `true` if frame content has arrived after the opening delimiter.
    ///
    /// A lone delimiter (idle fill, or the closing delimiter of a frame sent
    /// twice) is not a partial frame.
    pub fn has_partial(&self) -> bool {
        self.frame.frame_pos > HEADER_LEN || self.frame.in_escape
    }

    /// Abandon the frame in progress, if any. The ready payload is kept.
    pub fn reset(&mut self) {
        self.frame.reset();
    }

    /// Counters for accepted and dropped frames.
    pub fn stats(&self) -> &DecoderStats {
        &self.stats
    }

    /// Zero all counters and forget the last drop reason.
    pub fn reset_stats(&mut self) {
        self.stats = DecoderStats::default();
        self.last_drop = None;
    }

    /// Why the most recently abandoned frame was dropped.
    pub fn last_drop(&self) -> Option<DropReason> {
        self.last_drop
    }

    fn close_frame(&mut self) -> bool {
        let frame_pos = self.frame.frame_pos;
        if frame_pos == 1 {
            // Back-to-back delimiters: keep the latest one as the opening delimiter.
            self.frame.in_escape = false;
            return false;
        }
        if frame_pos < HEADER_LEN + FOOTER_LEN - 1 {
            self.drop_frame(DropReason::Undersized { len: frame_pos });
            return false;
        }

        let payload_end = frame_pos - (FOOTER_LEN - 1);
        let payload = &self.frame.buffer[HEADER_LEN..payload_end];
        let computed = C::compute(payload);
        let received = u16::from_le_bytes([
            self.frame.buffer[payload_end],
            self.frame.buffer[payload_end + 1],
        ]);
        if computed != received {
            self.drop_frame(DropReason::ChecksumMismatch { computed, received });
            return false;
        }

        self.ready.load(payload);
        self.frame.reset();
        self.stats.frames += 1;
        trace!(payload_len = self.ready.available, "frame complete");
        true
    }

    fn drop_frame(&mut self, reason: DropReason) {
        debug!(?reason, frame_pos = self.frame.frame_pos, "dropping frame");
        self.stats.record(reason);
        self.last_drop = Some(reason);
        self.frame.reset();
    }
}

impl<const N: usize, C: Checksum> Default for FrameDecoder<N, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{frame_capacity, FrameEncoder};

    const CAP: usize = frame_capacity(100);

    fn encode(payload: &[u8]) -> Vec<u8> {
        let mut encoder = FrameEncoder::<CAP>::new();
        assert_eq!(encoder.write(payload), payload.len());
        encoder.data().to_vec()
    }

    /// Feed every byte and collect the payloads of completed frames.
    fn decode_all(decoder: &mut FrameDecoder<CAP>, stream: &[u8]) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        for &byte in stream {
            if decoder.feed_byte(byte) {
                frames.push(decoder.data().to_vec());
                let mut sink = vec![0; decoder.available()];
                decoder.read(&mut sink);
            }
        }
        frames
    }

    #[test]
    fn decode_counting_payload() {
        let data: Vec<u8> = (1..=10).collect();
        let wire = encode(&data);
        assert_eq!(wire.len(), 14);

        let mut decoder = FrameDecoder::<CAP>::new();
        for &byte in &wire[..13] {
            assert!(!decoder.feed_byte(byte));
        }
        assert!(decoder.feed_byte(wire[13]));
        assert_eq!(decoder.available(), 10);
        assert_eq!(decoder.size(), 10);

        let mut out = [0u8; 20];
        assert_eq!(decoder.read(&mut out), 10);
        assert_eq!(&out[..10], &data[..]);
        assert_eq!(decoder.available(), 0);
    }

    #[test]
    fn partial_drain() {
        let data: Vec<u8> = (1..=10).collect();
        let mut decoder = FrameDecoder::<CAP>::new();
        let (_, complete) = decoder.feed(&encode(&data));
        assert!(complete);

        let mut out = [0u8; 5];
        assert_eq!(decoder.read(&mut out), 5);
        assert_eq!(out, [1, 2, 3, 4, 5]);
        assert_eq!(decoder.available(), 5);
        assert_eq!(decoder.data(), &[6, 7, 8, 9, 10]);
        for expected in 6..=10u8 {
            assert_eq!(decoder.read_byte(), expected);
        }
        assert_eq!(decoder.available(), 0);
        assert_eq!(decoder.read_byte(), 0);
        assert_eq!(decoder.read(&mut out), 0);
    }

    #[test]
    fn empty_decoder() {
        let mut decoder = FrameDecoder::<CAP>::new();
        let mut out = [0u8; 10];
        assert_eq!(decoder.available(), 0);
        assert_eq!(decoder.read_byte(), 0);
        assert_eq!(decoder.read(&mut out), 0);
        assert!(decoder.data().is_empty());
    }

    #[test]
    fn read_into_empty_buffer_keeps_state() {
        let mut decoder = FrameDecoder::<CAP>::new();
        decoder.feed(&encode(b"abc"));
        assert_eq!(decoder.read(&mut []), 0);
        assert_eq!(decoder.available(), 3);
    }

    #[test]
    fn round_trip_reserved_bytes() {
        let payloads: [&[u8]; 5] = [
            &[FLAG],
            &[ESC],
            &[FLAG, ESC, FLAG, ESC],
            &[0x00, FLAG, 0x20, ESC, 0x5E, 0x5D],
            &[ESC; 100],
        ];
        for payload in payloads {
            let mut decoder = FrameDecoder::<CAP>::new();
            let frames = decode_all(&mut decoder, &encode(payload));
            assert_eq!(frames, vec![payload.to_vec()]);
        }
    }

    #[test]
    fn round_trip_every_byte_value() {
        let payload: Vec<u8> = (0..=255u8).collect();
        let mut encoder = FrameEncoder::<{ frame_capacity(256) }>::new();
        assert_eq!(encoder.write(&payload), 256);
        let mut decoder = FrameDecoder::<{ frame_capacity(256) }>::new();
        let (consumed, complete) = decoder.feed(encoder.data());
        assert!(complete);
        assert_eq!(consumed, encoder.size());
        assert_eq!(decoder.data(), &payload[..]);
    }

    #[test]
    fn back_to_back_frames() {
        let stream = [encode(b"first"), encode(&[FLAG]), encode(b"third")].concat();
        let mut decoder = FrameDecoder::<CAP>::new();
        let frames = decode_all(&mut decoder, &stream);
        assert_eq!(frames, vec![b"first".to_vec(), vec![FLAG], b"third".to_vec()]);
        assert_eq!(decoder.stats().frames, 3);
        assert_eq!(decoder.stats().dropped(), 0);
    }

    #[test]
    fn resync_after_garbage() {
        let garbage: Vec<u8> = (0..200u32)
            .map(|i| (i * 37 % 251) as u8)
            .filter(|&b| b != FLAG)
            .collect();
        let stream = [garbage, encode(b"payload")].concat();
        let mut decoder = FrameDecoder::<CAP>::new();
        assert_eq!(decode_all(&mut decoder, &stream), vec![b"payload".to_vec()]);
    }

    #[test]
    fn recovers_after_spurious_delimiter() {
        // A stray delimiter makes the decoder misread the next frame, which is
        // dropped; the frame after it decodes normally.
        let frame = encode(b"data");
        let stream = [vec![FLAG, 0x01, 0x02], frame.clone(), frame].concat();
        let mut decoder = FrameDecoder::<CAP>::new();
        assert_eq!(decode_all(&mut decoder, &stream), vec![b"data".to_vec()]);
        assert_eq!(decoder.stats().checksum_mismatches, 1);
    }

    #[test]
    fn stream_starting_mid_frame() {
        let first = encode(b"lost frame");
        let stream = [&first[4..], &encode(b"x")[..], &encode(b"kept")[..]].concat();
        let mut decoder = FrameDecoder::<CAP>::new();
        let frames = decode_all(&mut decoder, &stream);
        assert_eq!(frames.last(), Some(&b"kept".to_vec()));
        assert!(!decoder.in_frame());
    }

    #[test]
    fn single_bit_flips_are_rejected() {
        let payload: Vec<u8> = (1..=10).collect();
        let wire = encode(&payload);
        for index in 1..=10 {
            for bit in 0..8 {
                let mut corrupted = wire.clone();
                corrupted[index] ^= 1 << bit;
                if corrupted[index] == FLAG || corrupted[index] == ESC {
                    continue;
                }
                let mut decoder = FrameDecoder::<CAP>::new();
                let frames = decode_all(&mut decoder, &corrupted);
                assert!(frames.is_empty(), "flip of bit {bit} in byte {index} went unnoticed");
                assert_eq!(decoder.stats().checksum_mismatches, 1);
            }
        }
    }

    #[test]
    fn undersized_frame_dropped() {
        let mut decoder = FrameDecoder::<CAP>::new();
        assert!(!decoder.feed_byte(FLAG));
        assert!(!decoder.feed_byte(0x01));
        assert!(!decoder.feed_byte(FLAG));
        assert!(!decoder.in_frame());
        assert_eq!(decoder.stats().undersized, 1);
        assert_eq!(decoder.available(), 0);
    }

    #[test]
    fn repeated_delimiter_keeps_frame_open() {
        let mut decoder = FrameDecoder::<CAP>::new();
        for _ in 0..5 {
            assert!(!decoder.feed_byte(FLAG));
            assert!(decoder.in_frame());
        }
        let frames = decode_all(&mut decoder, &encode(b"abc")[1..]);
        assert_eq!(frames, vec![b"abc".to_vec()]);
        assert_eq!(decoder.stats().dropped(), 0);
    }

    #[test]
    fn lone_delimiter_is_not_partial() {
        let mut decoder = FrameDecoder::<CAP>::new();
        assert!(!decoder.has_partial());
        decoder.feed_byte(FLAG);
        assert!(decoder.in_frame());
        assert!(!decoder.has_partial());
        decoder.feed_byte(ESC);
        assert!(decoder.has_partial());
        decoder.feed_byte(FLAG);
        assert!(!decoder.has_partial());
        decoder.feed_byte(0x42);
        assert!(decoder.has_partial());
    }

    #[test]
    fn doubled_escape_stores_escaped_escape() {
        // ESC ESC yields 0x7D ^ 0x20; the following byte is stored raw.
        let payload = [0x5D, 0x01];
        let encoded = encode(&payload);
        assert_eq!(encoded[1], 0x5D);
        let wire = [&[FLAG, ESC, ESC][..], &encoded[2..]].concat();

        let mut decoder = FrameDecoder::<CAP>::new();
        assert_eq!(decode_all(&mut decoder, &wire), vec![payload.to_vec()]);
        assert_eq!(decoder.stats().dropped(), 0);
    }

    #[test]
    fn escape_before_delimiter_is_cleared() {
        // A dangling escape followed by a fresh frame must not unescape its first byte.
        let payload = [0x5E, 0x01, 0x02];
        let wire = [&[FLAG, ESC][..], &encode(&payload)].concat();

        let mut decoder = FrameDecoder::<CAP>::new();
        assert_eq!(decode_all(&mut decoder, &wire), vec![payload.to_vec()]);
        assert_eq!(decoder.stats().dropped(), 0);
    }

    #[test]
    fn last_drop_reports_most_recent_reason() {
        let mut decoder = FrameDecoder::<CAP>::new();
        assert_eq!(decoder.last_drop(), None);

        decoder.feed(&[FLAG, 0x01, FLAG]);
        assert_eq!(decoder.last_drop(), Some(DropReason::Undersized { len: 2 }));

        let mut corrupted = encode(b"abc");
        corrupted[1] ^= 0x01;
        decoder.feed(&corrupted);
        assert!(matches!(
            decoder.last_drop(),
            Some(DropReason::ChecksumMismatch { .. })
        ));

        decoder.feed(&encode(b"fine"));
        assert!(matches!(
            decoder.last_drop(),
            Some(DropReason::ChecksumMismatch { .. })
        ));
        decoder.reset_stats();
        assert_eq!(decoder.last_drop(), None);
    }

    #[test]
    fn decoder_holds_two_buffers() {
        assert!(std::mem::size_of::<FrameDecoder<CAP>>() >= 2 * CAP);
    }

    #[test]
    fn empty_payload_frame_is_accepted() {
        // Checksum of nothing is zero.
        let mut decoder = FrameDecoder::<CAP>::new();
        let (consumed, complete) = decoder.feed(&[FLAG, 0x00, 0x00, FLAG]);
        assert_eq!(consumed, 4);
        assert!(complete);
        assert_eq!(decoder.available(), 0);
    }

    #[test]
    fn overflow_drops_frame_and_resyncs() {
        let mut decoder = FrameDecoder::<{ frame_capacity(4) }>::new();
        assert_eq!(FrameDecoder::<{ frame_capacity(4) }>::MAX_PAYLOAD_LEN, 11);
        let mut stream = vec![FLAG];
        stream.extend(std::iter::repeat(0x11).take(40));
        let mut encoder = FrameEncoder::<{ frame_capacity(4) }>::new();
        encoder.write(b"fit");
        stream.extend_from_slice(encoder.data());

        let mut found = Vec::new();
        for &byte in &stream {
            if decoder.feed_byte(byte) {
                found.push(decoder.data().to_vec());
            }
        }
        assert_eq!(found, vec![b"fit".to_vec()]);
        assert_eq!(decoder.stats().overflows, 1);
    }

    #[test]
    fn escaped_bytes_cannot_overflow() {
        let mut decoder = FrameDecoder::<8>::new();
        decoder.feed_byte(FLAG);
        for _ in 0..20 {
            decoder.feed_byte(ESC);
            decoder.feed_byte(0x5E);
        }
        assert!(decoder.stats().overflows > 0);
    }

    #[test]
    fn ready_payload_survives_next_frame() {
        let stream = [encode(b"keep me"), encode(b"next")].concat();
        let mut decoder = FrameDecoder::<CAP>::new();
        let (consumed, complete) = decoder.feed(&stream);
        assert!(complete);
        // Start accumulating the next frame without draining.
        let (_, complete) = decoder.feed(&stream[consumed..stream.len() - 1]);
        assert!(!complete);
        assert!(decoder.in_frame());
        assert_eq!(decoder.data(), b"keep me");
        assert!(decoder.feed_byte(FLAG));
        assert_eq!(decoder.data(), b"next");
    }

    #[test]
    fn feed_skips_idle_garbage() {
        let mut decoder = FrameDecoder::<CAP>::new();
        assert_eq!(decoder.feed(&[0x01, 0x02, 0x03]), (3, false));
        assert!(!decoder.in_frame());
        assert_eq!(decoder.feed(&[0x01, FLAG, 0x03]), (3, false));
        assert!(decoder.in_frame());
    }

    #[test]
    fn reset_abandons_frame_only() {
        let mut decoder = FrameDecoder::<CAP>::new();
        decoder.feed(&encode(b"ready"));
        decoder.feed(&[FLAG, 0x01, 0x02]);
        decoder.reset();
        assert!(!decoder.in_frame());
        assert_eq!(decoder.data(), b"ready");
        decoder.reset_stats();
        assert_eq!(*decoder.stats(), DecoderStats::default());
    }

    #[derive(Default)]
    struct Xor16(u16);

    impl Checksum for Xor16 {
        fn reset(&mut self) {
            self.0 = 0;
        }

        fn update(&mut self, bytes: &[u8]) -> u16 {
            for &byte in bytes {
                self.0 = self.0.rotate_left(3) ^ u16::from(byte);
            }
            self.0
        }
    }

    #[test]
    fn custom_checksum() {
        let mut encoder = FrameEncoder::<CAP, Xor16>::new();
        encoder.write(b"custom");
        let mut decoder = FrameDecoder::<CAP, Xor16>::new();
        assert_eq!(decoder.feed(encoder.data()), (encoder.size(), true));
        assert_eq!(decoder.data(), b"custom");

        let mut mismatched = FrameDecoder::<CAP>::new();
        let (_, complete) = mismatched.feed(encoder.data());
        assert!(!complete);
    }
}
