//! CLI command implementations

pub mod check;
pub mod create_config;
pub mod schema;

use ekstester_config::{Config, HostEnv, Resolver};
use tracing::info;

use crate::Result;

/// Install logging from the loaded document, then resolve, persist, and print it
fn resolve_and_report(cfg: Config, host: &HostEnv) -> Result<()> {
    crate::logging::init(&cfg.log_level, &cfg.log_outputs)?;
    let cfg = resolve_and_sync(cfg, host)?;
    print!("{}", cfg.to_yaml()?);
    Ok(())
}

/// Shared tail of `create-config` and `check`
fn resolve_and_sync(mut cfg: Config, host: &HostEnv) -> Result<Config> {
    Resolver::new(host.clone()).resolve(&mut cfg)?;
    cfg.sync()?;
    info!(path = %cfg.config_path, "wrote resolved configuration");
    Ok(cfg)
}
