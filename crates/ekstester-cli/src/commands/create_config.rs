//! Create-config command

use std::path::PathBuf;

use clap::Args;
use ekstester_config::loader::load_config;
use ekstester_config::{Config, HostEnv};

use crate::Result;

#[derive(Args, Debug)]
pub struct CreateConfigArgs {
    /// Where to write the configuration (defaults to `./<name>-config.yaml`)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

pub fn run(args: CreateConfigArgs, host: &HostEnv) -> Result<()> {
    let cfg = load(&args, host)?;
    super::resolve_and_report(cfg, host)
}

/// Default document with environment overrides, targeted at `--path`
fn load(args: &CreateConfigArgs, host: &HostEnv) -> Result<Config> {
    let mut cfg = load_config(None, host)?;
    if let Some(path) = &args.path {
        cfg.config_path = path.to_string_lossy().into_owned();
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::resolve_and_sync;
    use crate::commands::test_fixtures::linux_host;

    /// Story: A new user gets a complete configuration to edit
    #[test]
    fn story_create_config_writes_resolved_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.yaml");
        let args = CreateConfigArgs {
            path: Some(path.clone()),
        };
        let host = linux_host();

        let cfg = resolve_and_sync(load(&args, &host).unwrap(), &host).unwrap();

        assert_eq!(PathBuf::from(&cfg.config_path), path);
        let written = Config::from_yaml(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, cfg);
        assert!(!written.add_on_nlb_hello_world.namespace.is_empty());
    }
}
