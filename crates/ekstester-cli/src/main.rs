//! ekstester CLI
//!
//! Creates, resolves, and validates EKS test cluster configurations.

use std::process::ExitCode;

use clap::Parser;

use ekstester_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
