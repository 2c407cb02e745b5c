use crate::error::Result;

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CodecId {
    Deflate = 1,
}

/// One-shot compressor: the whole input in, the whole encoded stream out.
pub trait Compressor: Send + Sync {
    fn id(&self) -> CodecId;
    fn compress(&self, src: &[u8], level: u32) -> Result<Vec<u8>>;
}

pub mod deflate;
