use bytes::{Buf, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::{
    encode_payload, Checksum, DecoderStats, Fletcher16, FrameDecoder, FrameEncoder, FrameError,
    Result,
};

/// Frame codec implementing [`tokio_util::codec::Decoder`] and [`Encoder`].
///
/// `N` sizes both the encoder and the decoder buffer; see [`crate::frame_capacity`].
/// Bad frames on the decode side are skipped, not reported as errors.
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

    /// Encode a byte slice without allocating an intermediate frame.
    pub fn encode_slice(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<()> {
        let frame = encode_payload(&mut self.encoder, item)?;
        dst.extend_from_slice(frame);
        Ok(())
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

impl<const N: usize, C: Checksum> Encoder<Vec<u8>> for FrameCodec<N, C> {
    type Error = FrameError;

    fn encode(&mut self, item: Vec<u8>, dst: &mut BytesMut) -> Result<()> {
        self.encode_slice(&item, dst)
    }
}

impl<const N: usize, C: Checksum> Encoder<&[u8]> for FrameCodec<N, C> {
    type Error = FrameError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<()> {
        self.encode_slice(item, dst)
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
