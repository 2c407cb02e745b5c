use super::{CodecId, Compressor};
use crate::error::Result;
use crate::options::MAX_LEVEL;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

/// zlib-wrapped deflate, the stream format `deflateInit` produces.
pub struct DeflateCompressor;

impl Compressor for DeflateCompressor {
    fn id(&self) -> CodecId {
        CodecId::Deflate
    }

    fn compress(&self, src: &[u8], level: u32) -> Result<Vec<u8>> {
        let mut enc = ZlibEncoder::new(
            Vec::with_capacity(src.len() / 2 + 16),
            Compression::new(level.min(MAX_LEVEL)),
        );
        enc.write_all(src)?;
        Ok(enc.finish()?)
    }
}
