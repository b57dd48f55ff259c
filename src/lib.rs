#![doc = include_str!("../README.md")]

use std::error::Error;
use std::fmt;
use std::io::{self, Read, Write};

mod checksum;
mod decoder;
mod encoder;

#[cfg(feature = "async-codec")]
pub mod async_codec;
#[cfg(feature = "tokio-codec")]
pub mod tokio_codec;

pub use checksum::{Checksum, Fletcher16};
pub use decoder::{DecoderStats, DropReason, FrameDecoder};
pub use encoder::{encoded_len, FrameEncoder};

/// Frame delimiter (0x7E), used for both the start and the end of a frame.
pub const FLAG: u8 = 0x7E;
/// Escape byte (0x7D); the byte after it is XORed with [`ESC_MASK`].
pub const ESC: u8 = 0x7D;
/// Mask applied to escaped bytes (0x20).
pub const ESC_MASK: u8 = 0x20;

/// Bytes before the payload: the opening [`FLAG`].
pub const HEADER_LEN: usize = 1;
/// Bytes after the payload before escaping: two checksum bytes and the closing [`FLAG`].
pub const FOOTER_LEN: usize = 3;
/// Bytes after the payload when both checksum bytes need escaping.
pub const MAX_FOOTER_LEN: usize = 5;

/// Buffer length an encoder or decoder needs to carry payloads of up to `payload` bytes.
///
/// ```
/// use frameline::{frame_capacity, FrameEncoder};
///
/// assert_eq!(frame_capacity(100), 206);
/// assert_eq!(FrameEncoder::<{ frame_capacity(100) }>::PAYLOAD_CAPACITY, 100);
/// ```
pub const fn frame_capacity(payload: usize) -> usize {
    2 * payload + HEADER_LEN + MAX_FOOTER_LEN
}

/// Largest payload guaranteed to fit a frame buffer of `buffer` bytes.
pub const fn payload_capacity(buffer: usize) -> usize {
    buffer.saturating_sub(HEADER_LEN + MAX_FOOTER_LEN) / 2
}

/// Convenient result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FrameError>;

/// Error type for the I/O adapters and codecs.
///
/// The encoder and decoder themselves never fail; they report through return
/// values and [`DecoderStats`].
#[derive(Debug)]
#[non_exhaustive]
pub enum FrameError {
    /// Wrapper around [`std::io::Error`] originating from the underlying reader or writer.
    Io(io::Error),
    /// Tried to send a frame without payload.
    EmptyPayload,
    /// The payload does not fit the encoder buffer.
    PayloadTooLarge {
        /// Length of the rejected payload.
        len: usize,
        /// Largest payload the encoder accepts.
        capacity: usize,
    },
    /// The stream ended while a frame was still open.
    UnexpectedEndOfFrame,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Io(err) => write!(f, "I/O error: {err}"),
            FrameError::EmptyPayload => write!(f, "refusing to frame an empty payload"),
            FrameError::PayloadTooLarge { len, capacity } => {
                write!(f, "payload of {len} bytes exceeds frame capacity of {capacity}")
            }
            FrameError::UnexpectedEndOfFrame => write!(f, "stream ended inside a frame"),
        }
    }
}

impl Error for FrameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FrameError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FrameError {
    fn from(value: io::Error) -> Self {
        FrameError::Io(value)
    }
}

/// Encode `payload` with `encoder`, mapping a rejected payload to an error.
pub(crate) fn encode_payload<'a, const N: usize, C: Checksum>(
    encoder: &'a mut FrameEncoder<N, C>,
    payload: &[u8],
) -> Result<&'a [u8]> {
    if payload.is_empty() {
        return Err(FrameError::EmptyPayload);
    }
    if encoder.write(payload) == 0 {
        return Err(FrameError::PayloadTooLarge {
            len: payload.len(),
            capacity: FrameEncoder::<N, C>::PAYLOAD_CAPACITY,
        });
    }
    Ok(encoder.data())
}

/// Writer wrapper that frames outgoing payloads before forwarding them to the underlying writer.
///
/// Each call to [`write_frame`](FrameWriter::write_frame) appends one complete
/// frame to the wrapped writer with a single `write_all`. See `demos/stream.rs`
/// for a runnable demonstration.
pub struct FrameWriter<W, const N: usize, C = Fletcher16> {
    inner: W,
    encoder: FrameEncoder<N, C>,
}

impl<W, const N: usize, C: Checksum> FrameWriter<W, N, C> {
    /// Construct a new frame writer around the provided sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            encoder: FrameEncoder::new(),
        }
    }

    /// Retrieve an immutable reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Retrieve a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the wrapper and return the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write, const N: usize, C: Checksum> FrameWriter<W, N, C> {
    /// Frame the provided payload and write it to the underlying sink.
    ///
    /// # Errors
    ///
    /// * [`FrameError::EmptyPayload`] for an empty payload.
    /// * [`FrameError::PayloadTooLarge`] if the payload exceeds the encoder capacity.
    /// * [`FrameError::Io`] if the sink fails.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<()> {
        let frame = encode_payload(&mut self.encoder, payload)?;
        self.inner.write_all(frame).map_err(FrameError::from)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(FrameError::from)
    }
}

const READ_CHUNK: usize = 256;

/// Reader wrapper that decodes frames from an underlying byte stream.
///
/// Corrupted and malformed frames are skipped; [`stats`](FrameReader::stats)
/// counts them. A full streaming example is provided in `demos/stream.rs`.
///
/// ```
/// use frameline::{frame_capacity, FrameReader, FrameWriter, Result};
/// use std::io::Cursor;
///
/// # fn main() -> Result<()> {
/// const CAP: usize = frame_capacity(64);
/// let mut writer = FrameWriter::<_, CAP>::new(Vec::new());
/// writer.write_frame(b"foo")?;
/// writer.write_frame(&[1])?;
///
/// let mut reader = FrameReader::<_, CAP>::new(Cursor::new(writer.into_inner()));
/// assert_eq!(reader.read_frame()?, Some(b"foo".to_vec()));
/// assert_eq!(reader.read_frame()?, Some(vec![1]));
/// assert!(reader.read_frame()?.is_none());
/// # Ok(())
/// # }
/// ```
pub struct FrameReader<R, const N: usize, C = Fletcher16> {
    inner: R,
    decoder: FrameDecoder<N, C>,
    chunk: [u8; READ_CHUNK],
    start: usize,
    end: usize,
}

impl<R, const N: usize, C: Checksum> FrameReader<R, N, C> {
    /// Construct a new `FrameReader` around the provided source.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            decoder: FrameDecoder::new(),
            chunk: [0; READ_CHUNK],
            start: 0,
            end: 0,
        }
    }

    /// Borrow the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Borrow the underlying reader mutably.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the wrapper and return the inner reader.
    ///
    /// Bytes already pulled from the reader but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Check if an incomplete frame is currently buffered.
    pub fn has_remainder(&self) -> bool {
        self.decoder.has_partial()
    }

    /// Drop the incomplete frame, if any, and hunt for the next delimiter.
    pub fn discard_remainder(&mut self) {
        self.decoder.reset();
    }

    /// Counters for frames accepted and dropped so far.
    pub fn stats(&self) -> &DecoderStats {
        self.decoder.stats()
    }
}

impl<R: Read, const N: usize, C: Checksum> FrameReader<R, N, C> {
    /// Read the next good frame into the supplied buffer.
    ///
    /// On success the buffer holds the decoded payload and the function returns its length.
    /// When the underlying reader ends between frames, `Ok(None)` is returned; when it ends
    /// inside a frame, [`FrameError::UnexpectedEndOfFrame`] is returned and the partial frame
    /// stays buffered (see [`has_remainder`](Self::has_remainder)).
    pub fn read_frame_into(&mut self, buffer: &mut Vec<u8>) -> Result<Option<usize>> {
        buffer.clear();

        loop {
            if self.start == self.end {
                match self.inner.read(&mut self.chunk) {
                    Ok(0) => {
                        if self.decoder.has_partial() {
                            return Err(FrameError::UnexpectedEndOfFrame);
                        }
                        return Ok(None);
                    }
                    Ok(n) => {
                        self.start = 0;
                        self.end = n;
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(FrameError::Io(err)),
                }
            }

            let (consumed, complete) = self.decoder.feed(&self.chunk[self.start..self.end]);
            self.start += consumed;
            if complete {
                buffer.resize(self.decoder.available(), 0);
                let len = self.decoder.read(buffer);
                return Ok(Some(len));
            }
        }
    }

    /// Read the next good frame and return it as a freshly allocated [`Vec`].
    pub fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let mut frame = Vec::new();
        match self.read_frame_into(&mut frame)? {
            Some(_) => Ok(Some(frame)),
            None => Ok(None),
        }
    }
}
