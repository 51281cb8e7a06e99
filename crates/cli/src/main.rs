//! arsync CLI application entry point
//!
//! This is the minimal main entry point that delegates to the library.

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = arsync::Cli::parse();

    match arsync::run(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
