//! Add-on resolution
//!
//! Dependent names are derived only for enabled add-ons. Payload ceilings are
//! checked regardless of the toggle so a disabled add-on cannot carry a value
//! that would fail once it is switched on.

use std::path::Path;

use tracing::debug;

use crate::config::{AddOn, Config};
use crate::{Error, Result, JOB_ECHO_SIZE_LIMIT, SECRET_SIZE_LIMIT};

pub(super) fn resolve(cfg: &mut Config) -> Result<()> {
    check_payload_limits(cfg)?;

    if !cfg.add_on_managed_node_groups.enable {
        if let Some(add_on) = cfg.enabled_add_ons().first() {
            let field = add_on.field();
            return Err(Error::validation_for_field(
                format!("{field}.enable"),
                format!("add-on-managed-node-groups.enable false, but got {field}.enable true"),
            ));
        }
        return Ok(());
    }

    for add_on in cfg.enabled_add_ons() {
        resolve_namespace(cfg, add_on)?;
        match add_on {
            AddOn::Alb2048 => resolve_alb_2048(cfg),
            AddOn::Secrets => resolve_secrets(cfg)?,
            AddOn::Irsa => resolve_irsa(cfg),
            AddOn::NlbHelloWorld | AddOn::JobPerl | AddOn::JobEcho => {}
        }
        debug!(%add_on, "resolved add-on");
    }
    Ok(())
}

fn check_payload_limits(cfg: &Config) -> Result<()> {
    if cfg.add_on_job_echo.size > JOB_ECHO_SIZE_LIMIT {
        return Err(Error::limit(
            "add-on-job-echo.size",
            cfg.add_on_job_echo.size,
            JOB_ECHO_SIZE_LIMIT,
        ));
    }
    if cfg.add_on_secrets.size > SECRET_SIZE_LIMIT {
        return Err(Error::limit(
            "add-on-secrets.size",
            cfg.add_on_secrets.size,
            SECRET_SIZE_LIMIT,
        ));
    }
    Ok(())
}

fn resolve_namespace(cfg: &mut Config, add_on: AddOn) -> Result<()> {
    let name = cfg.name.clone();
    let default = cfg.derived_name(add_on.slug());
    let namespace = add_on.namespace_mut(cfg);
    if namespace.is_empty() {
        *namespace = default;
    }
    if *namespace == name {
        let field = add_on.field();
        return Err(Error::validation_for_field(
            format!("{field}.namespace"),
            format!("{field}.namespace {namespace:?} conflicts with name {name:?}"),
        ));
    }
    Ok(())
}

fn resolve_alb_2048(cfg: &mut Config) {
    if cfg.add_on_alb_2048.policy_name.is_empty() {
        cfg.add_on_alb_2048.policy_name = cfg.derived_name("alb-ingress-controller-policy");
    }
}

fn resolve_secrets(cfg: &mut Config) -> Result<()> {
    if cfg.add_on_secrets.writes_result_path.is_empty() {
        cfg.add_on_secrets.writes_result_path = cfg.derived_path("secret-writes.csv");
    }
    if cfg.add_on_secrets.reads_result_path.is_empty() {
        cfg.add_on_secrets.reads_result_path = cfg.derived_path("secret-reads.csv");
    }
    require_extension(
        "add-on-secrets.writes-result-path",
        &cfg.add_on_secrets.writes_result_path,
        "csv",
    )?;
    require_extension(
        "add-on-secrets.reads-result-path",
        &cfg.add_on_secrets.reads_result_path,
        "csv",
    )
}

fn resolve_irsa(cfg: &mut Config) {
    let derived = |suffix: &str| cfg.derived_name(suffix);
    let role = derived("irsa-role");
    let service_account = derived("irsa-service-account");
    let config_map = derived("irsa-configmap");
    let script = derived("irsa-configmap.sh");
    let bucket = derived("irsa-s3-bucket");
    let key = derived("irsa-s3-key");
    let deployment = derived("irsa-deployment");
    let result_path = cfg.derived_path("irsa-deployment-result.log");

    let irsa = &mut cfg.add_on_irsa;
    fill(&mut irsa.role_name, role);
    fill(&mut irsa.service_account_name, service_account);
    fill(&mut irsa.config_map_name, config_map);
    fill(&mut irsa.config_map_script_file_name, script);
    fill(&mut irsa.s3_bucket_name, bucket);
    fill(&mut irsa.s3_key, key);
    fill(&mut irsa.deployment_name, deployment);
    fill(&mut irsa.deployment_result_path, result_path);
}

fn fill(value: &mut String, default: String) {
    if value.is_empty() {
        *value = default;
    }
}

fn require_extension(field: &str, path: &str, ext: &str) -> Result<()> {
    if Path::new(path).extension().and_then(|e| e.to_str()) != Some(ext) {
        return Err(Error::validation_for_field(
            field,
            format!("expected .{ext} extension for {field}, got {path:?}"),
        ));
    }
    Ok(())
}
