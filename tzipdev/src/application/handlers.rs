use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::warn;

use tzip_core::error::{Result, TzipError};
use tzip_core::pack::walker::list_sources;
use tzip_core::{ArchiveReader, PackOptions, PartitionPolicy, pack};

#[allow(clippy::too_many_arguments)]
pub fn handle_pack(
    dir: PathBuf,
    out: PathBuf,
    workers: usize,
    level: u32,
    read_cap: usize,
    suffix: String,
    equal_slices: bool,
    json: bool,
) -> Result<()> {
    let opts = PackOptions {
        workers,
        level,
        read_cap,
        suffix,
        partition: if equal_slices {
            PartitionPolicy::EqualSlices
        } else {
            PartitionPolicy::RemainderToLast
        },
    };
    let report = pack(&dir, &out, Some(&opts))?;

    if json {
        let s = serde_json::to_string_pretty(&report.stats)
            .map_err(|e| TzipError::Format(format!("stats encode: {e}")))?;
        println!("{s}");
    } else {
        println!(
            "{} files -> {} ({} bytes)",
            report.stats.files,
            out.display(),
            report.archive.bytes_written
        );
        println!("Compression rate: {:.2}%", report.stats.compression_rate());
    }
    Ok(())
}

pub fn handle_inspect(archive: PathBuf, dir: Option<PathBuf>, suffix: String) -> Result<()> {
    let names = match dir {
        Some(d) => list_sources(&d, &suffix)?,
        None => Vec::new(),
    };
    let f = File::open(&archive).map_err(|source| TzipError::FileRead {
        path: archive.clone(),
        source,
    })?;

    let mut count = 0usize;
    for rec in ArchiveReader::new(BufReader::new(f)) {
        let (i, data) = rec?;
        match names.get(i) {
            Some(n) => println!("#{:<5} c={:<8} {}", i, data.len(), n.to_string_lossy()),
            None => println!("#{:<5} c={}", i, data.len()),
        }
        count += 1;
    }
    if !names.is_empty() && names.len() != count {
        warn!(
            records = count,
            names = names.len(),
            "record count does not match the directory listing"
        );
    }
    Ok(())
}
