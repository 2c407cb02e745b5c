use crate::codec::Compressor;
use crate::error::{Result, TzipError};
use crate::pack::partition::WorkRange;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Compressed bytes of one source file. Built once by the worker owning its
/// index, then moved out by the archive writer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompressedRecord {
    data: Vec<u8>,
}

impl CompressedRecord {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Placeholder for an index no worker owned (equal-slices mode).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Read-only inputs every worker shares.
pub struct WorkerCtx<'a> {
    pub dir: &'a Path,
    pub names: &'a [OsString],
    pub codec: &'a dyn Compressor,
    pub level: u32,
    pub read_cap: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub files: u64,
    pub bytes_in: u64,
    pub bytes_out: u64,
    pub truncated: u64,
}

/// Reads up to `cap` bytes; the flag is set when the file had more.
pub fn read_bounded(path: &Path, cap: usize) -> io::Result<(Vec<u8>, bool)> {
    let f = File::open(path)?;
    let mut buf = Vec::new();
    f.take((cap as u64).saturating_add(1)).read_to_end(&mut buf)?;
    let truncated = buf.len() > cap;
    buf.truncate(cap);
    Ok((buf, truncated))
}

/// Compress every file in `range` into `slots`, where `slots[k]` belongs to
/// index `range.start + k`. The slice is this worker's exclusive share of the
/// results table.
pub fn compress_range(
    ctx: &WorkerCtx<'_>,
    range: WorkRange,
    slots: &mut [Option<CompressedRecord>],
) -> Result<WorkerReport> {
    debug_assert_eq!(slots.len(), range.len());
    let end = range.end.min(ctx.names.len());
    let mut report = WorkerReport::default();

    for (index, slot) in (range.start..end).zip(slots.iter_mut()) {
        let path = ctx.dir.join(&ctx.names[index]);
        debug!(index, path = %path.display(), "compressing");

        let (raw, truncated) =
            read_bounded(&path, ctx.read_cap).map_err(|source| TzipError::FileRead {
                path: path.clone(),
                source,
            })?;
        if truncated {
            warn!(path = %path.display(), cap = ctx.read_cap, "file truncated at read cap");
            report.truncated += 1;
        }

        let data = ctx
            .codec
            .compress(&raw, ctx.level)
            .map_err(|e| TzipError::Codec {
                path: path.clone(),
                message: e.to_string(),
            })?;

        report.files += 1;
        report.bytes_in += raw.len() as u64;
        report.bytes_out += data.len() as u64;
        *slot = Some(CompressedRecord::new(data));
    }
    Ok(report)
}
