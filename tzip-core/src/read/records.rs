use crate::error::{Result, TzipError};
use crate::pack::writer::SIZE_FIELD_LEN;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Walks `size || data` records front to back. Carries no names: record `i`
/// belongs to the `i`-th source name in sorted order.
pub struct ArchiveReader<R: Read> {
    inner: R,
    index: usize,
    done: bool,
}

impl<R: Read> ArchiveReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            index: 0,
            done: false,
        }
    }

    /// `None` on a clean end of stream; a partially read field is an error.
    fn read_size(&mut self) -> Result<Option<usize>> {
        let mut buf = [0u8; SIZE_FIELD_LEN];
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(TzipError::Format(format!(
                        "record {}: truncated size field",
                        self.index
                    )));
                }
                Ok(k) => filled += k,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        let size = i32::from_le_bytes(buf);
        usize::try_from(size)
            .map(Some)
            .map_err(|_| TzipError::Format(format!("record {}: negative size {size}", self.index)))
    }

    fn read_record(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(size) = self.read_size()? else {
            return Ok(None);
        };
        // grow with the bytes actually present, not with the claimed size
        let mut data = Vec::new();
        (&mut self.inner)
            .take(size as u64)
            .read_to_end(&mut data)?;
        if data.len() != size {
            return Err(TzipError::Format(format!(
                "record {}: expected {size} bytes of data, found {}",
                self.index,
                data.len()
            )));
        }
        Ok(Some(data))
    }
}

impl<R: Read> Iterator for ArchiveReader<R> {
    type Item = Result<(usize, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_record() {
            Ok(Some(data)) => {
                let i = self.index;
                self.index += 1;
                Some(Ok((i, data)))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// All record payloads of the archive at `path`, in order.
pub fn read_records(path: &Path) -> Result<Vec<Vec<u8>>> {
    let f = File::open(path)?;
    ArchiveReader::new(BufReader::new(f))
        .map(|r| r.map(|(_, data)| data))
        .collect()
}
