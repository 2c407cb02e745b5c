use crate::error::{Result, TzipError};
use crate::pack::partition::PartitionPolicy;

/// Worker count used by the reference tool.
pub const DEFAULT_WORKERS: usize = 2;
/// Per-file read ceiling; longer files are truncated to this many bytes.
pub const DEFAULT_READ_CAP: usize = 1 << 20;
pub const DEFAULT_SUFFIX: &str = ".txt";
/// zlib's best-compression level.
pub const MAX_LEVEL: u32 = 9;

#[derive(Clone, Debug)]
pub struct PackOptions {
    /// Number of worker threads; each owns one contiguous index range.
    pub workers: usize,
    /// Deflate level, clamped to 0..=9.
    pub level: u32,
    /// Bytes read from each source file before truncation.
    pub read_cap: usize,
    /// Name suffix a directory entry must carry to be packed.
    pub suffix: String,
    pub partition: PartitionPolicy,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            level: MAX_LEVEL,
            read_cap: DEFAULT_READ_CAP,
            suffix: DEFAULT_SUFFIX.to_string(),
            partition: PartitionPolicy::default(),
        }
    }
}

impl PackOptions {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(TzipError::InvalidOptions(
                "worker count must be at least 1".into(),
            ));
        }
        if self.suffix.is_empty() {
            return Err(TzipError::InvalidOptions("suffix must not be empty".into()));
        }
        Ok(())
    }
}
