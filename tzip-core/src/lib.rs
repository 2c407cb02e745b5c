#![forbid(unsafe_code)]

pub mod error;
pub mod options;
pub mod stats;

pub mod codec;

pub mod pack {
    pub mod partition;
    pub mod pool;
    pub mod walker;
    pub mod worker;
    pub mod writer;
}

pub mod read {
    pub mod records;
}

// Re-exports: stable API surface
pub use error::{Result, TzipError};
pub use options::PackOptions;
pub use pack::partition::PartitionPolicy;
pub use pack::pool::{PackReport, pack};
pub use read::records::{ArchiveReader, read_records};
pub use stats::PackStats;
