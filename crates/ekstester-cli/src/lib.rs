//! ekstester CLI library

pub mod commands;
pub mod error;
pub mod logging;

pub use error::{Error, Result};

use clap::{Parser, Subcommand};
use ekstester_config::HostEnv;

/// ekstester - EKS test cluster configuration
#[derive(Parser, Debug)]
#[command(name = "ekstester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a resolved default configuration
    CreateConfig(commands::create_config::CreateConfigArgs),
    /// Load, resolve, and persist an existing configuration
    Check(commands::check::CheckArgs),
    /// Print the JSON Schema of the configuration document
    Schema,
}

impl Cli {
    /// Run the CLI command
    ///
    /// The host precondition is checked before any command runs.
    pub fn run(self) -> Result<()> {
        let host = HostEnv::detect()?;
        match self.command {
            Commands::CreateConfig(args) => commands::create_config::run(args, &host),
            Commands::Check(args) => commands::check::run(args, &host),
            Commands::Schema => commands::schema::run(),
        }
    }
}
