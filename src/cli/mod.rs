// CLI module
// Argument parsing, the interactive menu and its text rendering

mod args;
mod menu;
pub mod render;

pub use args::CliArgs;
pub use menu::{Menu, MenuChoice};

use crate::core::Library;
use crate::io::export_ledger;
use crate::types::LibraryError;
use clap::Parser;
use std::io::{BufRead, Write};

/// Parse command-line arguments using clap
///
/// On invalid arguments or `--help`, clap prints the message and exits the
/// process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Run one complete menu session
///
/// Builds the catalog from `args`, drives the menu over `input`/`output`
/// until exit, then exports the ledger if `--ledger-out` was given.
///
/// # Returns
///
/// The library in its final state
pub fn run_session<R: BufRead, W: Write>(
    args: &CliArgs,
    input: R,
    output: W,
) -> Result<Library, LibraryError> {
    let mut library = args.build_library()?;

    Menu::new(&mut library, input, output).run()?;

    if let Some(path) = &args.ledger_out {
        export_ledger(path, library.ledger())?;
    }

    Ok(library)
}
