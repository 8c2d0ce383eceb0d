//! Check command

use std::path::PathBuf;

use clap::Args;
use ekstester_config::loader::load_config;
use ekstester_config::HostEnv;

use crate::Result;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file to load, resolve, and rewrite in place
    #[arg(long)]
    pub path: PathBuf,
}

pub fn run(args: CheckArgs, host: &HostEnv) -> Result<()> {
    let cfg = load_config(Some(&args.path), host)?;
    super::resolve_and_report(cfg, host)
}
