use crate::error::{Result, TzipError};
use crate::pack::worker::CompressedRecord;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

/// Width of the little-endian `i32` size field preceding each record.
pub const SIZE_FIELD_LEN: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub records: usize,
    pub bytes_written: u64,
}

/// Small Write adapter that counts bytes written
struct CountingWriter<W: Write> {
    inner: W,
    n: u64,
}
impl<W: Write> CountingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, n: 0 }
    }
    fn into_inner(self) -> W {
        self.inner
    }
}
impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let k = self.inner.write(buf)?;
        self.n += k as u64;
        Ok(k)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// Temp file beside the archive. On unix it is opened with 0o666 so the
/// process umask decides the final mode, as a plain `File::create` would.
fn create_temp(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut b = Builder::new();
    b.prefix(".tzip-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        b.permissions(std::fs::Permissions::from_mode(0o666));
    }
    b.tempfile_in(dir)
}

/// Serialize `table` in index order as `size:i32le || data` records.
/// Each record is dropped as soon as it has been written.
pub fn write_records<W: Write>(w: &mut W, table: Vec<Option<CompressedRecord>>) -> Result<usize> {
    let count = table.len();
    for (index, slot) in table.into_iter().enumerate() {
        let rec = slot.ok_or(TzipError::MissingRecord { index })?;
        let size = i32::try_from(rec.size()).map_err(|_| TzipError::RecordTooLarge {
            index,
            size: rec.size(),
        })?;
        w.write_all(&size.to_le_bytes()).map_err(TzipError::Write)?;
        w.write_all(rec.data()).map_err(TzipError::Write)?;
    }
    Ok(count)
}

/// Write the archive to a temp file beside `out` and rename it into place
/// only once every record is on disk.
pub fn write_archive(out: &Path, table: Vec<Option<CompressedRecord>>) -> Result<ArchiveSummary> {
    let unavailable = |source| TzipError::OutputUnavailable {
        path: out.to_path_buf(),
        source,
    };
    let parent = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = create_temp(parent).map_err(unavailable)?;

    let mut w = CountingWriter::new(BufWriter::new(tmp));
    let records = write_records(&mut w, table)?;
    let bytes_written = w.n;
    let tmp = w
        .into_inner()
        .into_inner()
        .map_err(|e| TzipError::Write(e.into_error()))?;
    tmp.as_file().sync_all().map_err(TzipError::Write)?;
    tmp.persist(out).map_err(|e| unavailable(e.error))?;

    Ok(ArchiveSummary {
        records,
        bytes_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use tempfile::tempdir;

    struct Broken;
    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn rec(bytes: &[u8]) -> Option<CompressedRecord> {
        Some(CompressedRecord::new(bytes.to_vec()))
    }

    #[test]
    fn records_are_length_prefixed_in_index_order() {
        let mut out = Vec::new();
        let n = write_records(&mut out, vec![rec(b"xy"), rec(b""), rec(b"abc")]).unwrap();
        assert_eq!(n, 3);
        let mut expected = Vec::new();
        expected.extend_from_slice(&2i32.to_le_bytes());
        expected.extend_from_slice(b"xy");
        expected.extend_from_slice(&0i32.to_le_bytes());
        expected.extend_from_slice(&3i32.to_le_bytes());
        expected.extend_from_slice(b"abc");
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_table_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("empty.tzip");
        let summary = write_archive(&out, Vec::new()).unwrap();
        assert_eq!(summary, ArchiveSummary::default());
        assert_eq!(fs::read(&out).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn summary_counts_header_and_payload_bytes() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("two.tzip");
        let summary = write_archive(&out, vec![rec(b"12345"), rec(b"6")]).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.bytes_written, (2 * SIZE_FIELD_LEN + 6) as u64);
        assert_eq!(fs::metadata(&out).unwrap().len(), summary.bytes_written);
    }

    #[test]
    fn missing_slot_leaves_no_archive() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("hole.tzip");
        let err = write_archive(&out, vec![rec(b"a"), None]).unwrap_err();
        assert!(matches!(err, TzipError::MissingRecord { index: 1 }));
        assert!(!out.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn replaces_existing_archive() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("old.tzip");
        fs::write(&out, b"stale contents").unwrap();
        write_archive(&out, vec![rec(b"z")]).unwrap();
        assert_eq!(fs::read(&out).unwrap(), [1, 0, 0, 0, b'z']);
    }

    #[cfg(unix)]
    #[test]
    fn archive_mode_follows_umask_like_plain_create() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let plain = dir.path().join("plain");
        fs::write(&plain, b"").unwrap();
        let out = dir.path().join("text.tzip");
        write_archive(&out, vec![rec(b"a")]).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&out), mode(&plain));
    }

    #[test]
    fn output_in_missing_directory_is_unavailable() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("no/such/dir/out.tzip");
        let err = write_archive(&out, vec![rec(b"a")]).unwrap_err();
        assert!(matches!(err, TzipError::OutputUnavailable { .. }));
    }

    #[test]
    fn sink_failure_is_write_error() {
        let err = write_records(&mut Broken, vec![rec(b"a")]).unwrap_err();
        assert!(matches!(err, TzipError::Write(_)));
    }
}
