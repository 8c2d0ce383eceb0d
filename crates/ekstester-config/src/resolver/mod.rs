//! Configuration resolution: defaulting and validation passes
//!
//! Passes run in a fixed order over one mutable document:
//!
//! 1. identity checks (region, name, log sinks)
//! 2. host defaults (aws CLI, kubectl download URL)
//! 3. artifact paths
//! 4. cross-field pairing checks
//! 5. managed node groups (defaults, limits, replica propagation)
//! 6. add-ons (derived names, format checks, disabled-feature closure)
//!
//! The first violation aborts resolution. Mutations made by earlier passes are
//! not rolled back; a failed document is meant to be discarded and re-derived
//! from its source. Resolving an already-resolved document changes nothing.

mod addons;
mod cross_field;
mod node_groups;
mod paths;

use tracing::{debug, info};

use crate::config::Config;
use crate::defaults::{DEFAULT_KUBECTL_DOWNLOAD_URL, DEFAULT_LOG_LEVEL};
use crate::host::HostEnv;
use crate::{Error, Result};

/// Resolves configuration documents against a host environment
#[derive(Clone, Debug)]
pub struct Resolver {
    host: HostEnv,
}

impl Resolver {
    /// Create a resolver for the given host
    pub fn new(host: HostEnv) -> Self {
        Self { host }
    }

    /// Fill every omitted field and validate the document
    ///
    /// Creates the config file's parent directory; no other side effects.
    pub fn resolve(&self, cfg: &mut Config) -> Result<()> {
        debug!(name = %cfg.name, "resolving configuration");

        if cfg.log_level.is_empty() {
            cfg.log_level = DEFAULT_LOG_LEVEL.to_string();
        }
        cross_field::check_identity(cfg)?;
        self.apply_host_defaults(cfg)?;
        paths::resolve(cfg)?;
        cross_field::check(cfg)?;
        node_groups::resolve(cfg)?;
        addons::resolve(cfg)?;

        info!(
            name = %cfg.name,
            region = %cfg.region,
            config_path = %cfg.config_path,
            node_groups = cfg.add_on_managed_node_groups.mngs.len(),
            add_ons = ?cfg.enabled_add_ons(),
            "configuration resolved"
        );
        Ok(())
    }

    fn apply_host_defaults(&self, cfg: &mut Config) -> Result<()> {
        if cfg.aws_cli_path.is_empty() {
            cfg.aws_cli_path = self.host.aws_cli_path.to_string_lossy().into_owned();
        }
        if cfg.kubectl_download_url.is_empty() {
            cfg.kubectl_download_url = self.host.platform.rewrite_url(DEFAULT_KUBECTL_DOWNLOAD_URL);
        }

        let token = self.host.platform.url_token();
        if !cfg.kubectl_download_url.contains(token) {
            return Err(Error::validation_for_field(
                "kubectl-download-url",
                format!(
                    "kubectl-download-url {:?} build OS mismatch, expected {:?}",
                    cfg.kubectl_download_url, token
                ),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Resolve this document in place against `host`
    ///
    /// Convenience for `Resolver::new(host.clone()).resolve(self)`.
    pub fn validate_and_set_defaults(&mut self, host: &HostEnv) -> Result<()> {
        Resolver::new(host.clone()).resolve(self)
    }
}
