//! pxe - command-line front end for the pxedit sprite editor core

use std::process::ExitCode;

use pxedit::cli;

fn main() -> ExitCode {
    cli::run()
}
