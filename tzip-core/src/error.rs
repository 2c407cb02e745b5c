use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TzipError {
    #[error("cannot open directory {}: {source}", .path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("compression failed for {}: {message}", .path.display())]
    Codec { path: PathBuf, message: String },

    #[error("cannot create archive {}: {source}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write error: {0}")]
    Write(#[source] std::io::Error),

    #[error("no record was produced for index {index}")]
    MissingRecord { index: usize },

    #[error("record {index} is {size} bytes, larger than the 32-bit size field allows")]
    RecordTooLarge { index: usize, size: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, TzipError>;
