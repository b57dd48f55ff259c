use asynchronous_codec::{Decoder, Encoder};
use bytes::{Buf, BytesMut};

use crate::{
    encode_payload, Checksum, DecoderStats, Fletcher16, FrameDecoder, FrameEncoder, FrameError,
    Result,
};

/// Frame codec for [`asynchronous_codec`]'s `Framed`, `FramedRead` and `FramedWrite`.
///
/// Encodes `Vec<u8>` payloads and yields decoded payloads as `Vec<u8>`.
pub struct FrameCodec<const N: usize, C = Fletcher16> {
    encoder: FrameEncoder<N, C>,
    decoder: FrameDecoder<N, C>,
}

impl<const N: usize, C: Checksum> FrameCodec<N, C> {
    /// Construct a new frame codec.
    pub fn new() -> Self {
        Self {
            encoder: FrameEncoder::new(),
            decoder: FrameDecoder::new(),
        }
    }

    /// Counters for frames accepted and dropped by the decode side.
    pub fn stats(&self) -> &DecoderStats {
        self.decoder.stats()
    }
}

impl<const N: usize, C: Checksum> Default for FrameCodec<N, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, C: Checksum> Encoder for FrameCodec<N, C> {
    type Item = Vec<u8>;
    type Error = FrameError;

    fn encode(&mut self, item: Self::Item, dst: &mut BytesMut) -> Result<()> {
        let frame = encode_payload(&mut self.encoder, &item)?;
        dst.extend_from_slice(frame);
        Ok(())
    }
}

impl<const N: usize, C: Checksum> Decoder for FrameCodec<N, C> {
    type Item = Vec<u8>;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        let (consumed, complete) = self.decoder.feed(src);
        src.advance(consumed);
        if !complete {
            return Ok(None);
        }
        let mut frame = vec![0; self.decoder.available()];
        self.decoder.read(&mut frame);
        Ok(Some(frame))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if self.decoder.has_partial() {
            self.decoder.reset();
            return Err(FrameError::UnexpectedEndOfFrame);
        }
        Ok(None)
    }
}
