use crate::codec::Compressor;
use crate::codec::deflate::DeflateCompressor;
use crate::error::{Result, TzipError};
use crate::options::PackOptions;
use crate::pack::partition::{PartitionPolicy, WorkRange, partition, unassigned};
use crate::pack::walker::list_sources;
use crate::pack::worker::{CompressedRecord, WorkerCtx, WorkerReport, compress_range};
use crate::pack::writer::{ArchiveSummary, write_archive};
use crate::stats::PackStats;
use rayon::prelude::*;
use std::ffi::OsString;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Clone, Debug)]
pub struct PackReport {
    /// Source names in archive order.
    pub names: Vec<OsString>,
    pub stats: PackStats,
    pub archive: ArchiveSummary,
}

/// Hand each range its own disjoint `&mut` window of the table. Whatever is
/// left after the last range (indices no worker owns) is returned separately.
fn split_by_ranges<'t, T>(
    table: &'t mut [T],
    ranges: &[WorkRange],
) -> (Vec<(WorkRange, &'t mut [T])>, &'t mut [T]) {
    let mut tasks = Vec::with_capacity(ranges.len());
    let mut rest = table;
    for r in ranges {
        let (mine, tail) = std::mem::take(&mut rest).split_at_mut(r.len());
        tasks.push((*r, mine));
        rest = tail;
    }
    (tasks, rest)
}

/// Fan the sorted `names` out over `opts.workers` threads and return the
/// filled results table, indexed like `names`.
pub fn compress_all(
    dir: &Path,
    names: &[OsString],
    opts: &PackOptions,
    codec: &dyn Compressor,
) -> Result<(Vec<Option<CompressedRecord>>, PackStats)> {
    opts.validate()?;
    let n = names.len();
    let ranges = partition(n, opts.workers, opts.partition)?;

    let mut table: Vec<Option<CompressedRecord>> = (0..n).map(|_| None).collect();
    let (tasks, orphans) = split_by_ranges(&mut table, &ranges);

    let ctx = WorkerCtx {
        dir,
        names,
        codec,
        level: opts.level,
        read_cap: opts.read_cap,
    };
    debug!(codec = ?codec.id(), level = opts.level, ranges = ?ranges, "partitioned");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.workers)
        .thread_name(|i| format!("tzip-worker-{i}"))
        .build()
        .map_err(|e| TzipError::Io(std::io::Error::other(e)))?;

    // Each (range, slots) pair is one indivisible job; install() returning is the join barrier.
    let reports: Vec<WorkerReport> = pool.install(|| {
        tasks
            .into_par_iter()
            .with_max_len(1)
            .map(|(range, slots)| compress_range(&ctx, range, slots))
            .collect::<Result<Vec<_>>>()
    })?;

    let mut stats = PackStats::default();
    for r in &reports {
        stats.files += r.files;
        stats.bytes_in += r.bytes_in;
        stats.bytes_out += r.bytes_out;
        stats.truncated += r.truncated;
    }

    if !orphans.is_empty() {
        debug_assert_eq!(opts.partition, PartitionPolicy::EqualSlices);
        warn!(
            dropped = orphans.len(),
            total = n,
            workers = opts.workers,
            "equal-slices partition left trailing files unassigned; writing empty records"
        );
        stats.dropped = unassigned(n, &ranges) as u64;
        for slot in orphans.iter_mut() {
            *slot = Some(CompressedRecord::empty());
        }
    }

    Ok((table, stats))
}

/// Compress every matching file directly inside `dir` into one archive at `out`.
pub fn pack(dir: &Path, out: &Path, opts: Option<&PackOptions>) -> Result<PackReport> {
    let defaults = PackOptions::default();
    let opts = opts.unwrap_or(&defaults);
    opts.validate()?;

    let names = list_sources(dir, &opts.suffix)?;
    info!(
        dir = %dir.display(),
        files = names.len(),
        workers = opts.workers,
        "packing directory"
    );

    let (table, stats) = compress_all(dir, &names, opts, &DeflateCompressor)?;
    let archive = write_archive(out, table)?;
    info!(
        out = %out.display(),
        records = archive.records,
        bytes = archive.bytes_written,
        "archive written"
    );

    Ok(PackReport {
        names,
        stats,
        archive,
    })
}
