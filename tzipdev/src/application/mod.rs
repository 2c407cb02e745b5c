pub mod handlers;

use crate::presentation::cli::{Cli, Commands};
use clap::Parser;
use tzip_core::error::Result;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Pack {
            dir,
            out,
            workers,
            level,
            read_cap,
            suffix,
            equal_slices,
            json,
        } => handlers::handle_pack(
            dir,
            out,
            workers,
            level,
            read_cap,
            suffix,
            equal_slices,
            json,
        ),
        Commands::Inspect {
            archive,
            dir,
            suffix,
        } => handlers::handle_inspect(archive, dir, suffix),
    }
}
