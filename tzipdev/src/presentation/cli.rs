use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "tzipdev: parallel deflate packer for text directories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compress every matching file in a directory into one archive
    Pack {
        /// directory whose direct children are packed
        dir: PathBuf,

        /// archive path to create (replaced atomically)
        #[arg(short, long, default_value = "text.tzip")]
        out: PathBuf,

        /// worker threads, each owning one contiguous slice of the sorted names
        #[arg(long, default_value_t = tzip_core::options::DEFAULT_WORKERS)]
        workers: usize,

        /// deflate level (0-9)
        #[arg(long, default_value_t = tzip_core::options::MAX_LEVEL)]
        level: u32,

        /// bytes read per file; longer files are truncated
        #[arg(long, default_value_t = tzip_core::options::DEFAULT_READ_CAP)]
        read_cap: usize,

        /// file name suffix to select
        #[arg(long, default_value = tzip_core::options::DEFAULT_SUFFIX)]
        suffix: String,

        /// legacy partition: trailing files beyond workers * (n / workers) get empty records
        #[arg(long)]
        equal_slices: bool,

        /// print run statistics as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Print the record table of an archive
    Inspect {
        archive: PathBuf,

        /// source directory, to label records with the file names they came from
        #[arg(long)]
        dir: Option<PathBuf>,

        /// suffix used when the archive was packed
        #[arg(long, default_value = tzip_core::options::DEFAULT_SUFFIX)]
        suffix: String,
    },
}
