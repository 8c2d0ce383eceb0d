//! Managed node group resolution
//!
//! For each node group, in order: volume size default, instance type default
//! by AMI type, older-generation rejection when a load-balanced add-on is
//! enabled, auto-scaling defaulting and ordering checks, and finally raising
//! load-balanced replica counts to the group's desired capacity.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::{AddOn, AmiType, Config, ManagedNodeGroup, DEFAULT_NODE_VOLUME_SIZE};
use crate::{Error, Result, MNG_MAX_LIMIT, MNG_NODES_MAX_LIMIT};

pub(super) fn resolve(cfg: &mut Config) -> Result<()> {
    let name = cfg.name.clone();
    let mngs = &mut cfg.add_on_managed_node_groups;
    if mngs.role_name.is_empty() {
        mngs.role_name = format!("{name}-mng-role");
    }
    if mngs.ssh_key_pair_name.is_empty() {
        mngs.ssh_key_pair_name = format!("{name}-ssh");
    }
    if !mngs.enable {
        return Ok(());
    }

    let load_balanced: Vec<AddOn> = cfg
        .enabled_add_ons()
        .into_iter()
        .filter(AddOn::is_load_balanced)
        .collect();

    let mngs = &mut cfg.add_on_managed_node_groups;
    if mngs.remote_access_private_key_path.is_empty() {
        return Err(Error::validation_for_field(
            "add-on-managed-node-groups.remote-access-private-key-path",
            "empty add-on-managed-node-groups.remote-access-private-key-path",
        ));
    }
    if mngs.remote_access_user_name.is_empty() {
        return Err(Error::validation_for_field(
            "add-on-managed-node-groups.remote-access-user-name",
            "empty add-on-managed-node-groups.remote-access-user-name",
        ));
    }

    let n = mngs.mngs.len();
    if n == 0 {
        return Err(Error::validation_for_field(
            "add-on-managed-node-groups.mngs",
            "add-on-managed-node-groups.enable but empty add-on-managed-node-groups.mngs",
        ));
    }
    if n > MNG_MAX_LIMIT {
        return Err(Error::limit(
            "add-on-managed-node-groups.mngs",
            n as u64,
            MNG_MAX_LIMIT as u64,
        ));
    }

    let mut names = BTreeSet::new();
    for (key, mng) in mngs.mngs.iter_mut() {
        let field = format!("add-on-managed-node-groups.mngs[{key:?}]");
        if mng.name.is_empty() {
            return Err(Error::validation_for_field(
                format!("{field}.name"),
                format!("{field}.name is empty"),
            ));
        }
        if *key != mng.name {
            return Err(Error::validation_for_field(
                format!("{field}.name"),
                format!("{field}.name has different name field {:?}", mng.name),
            ));
        }
        if !names.insert(mng.name.clone()) {
            return Err(Error::validation_for_field(
                format!("{field}.name"),
                format!("{field}.name {:?} is redundant", mng.name),
            ));
        }

        resolve_node_group(&field, mng, &load_balanced)?;

        // never lowers an explicit replica count
        let desired = mng.asg_desired_capacity;
        raise_replicas(
            &mut cfg.add_on_nlb_hello_world.deployment_replicas,
            cfg.add_on_nlb_hello_world.enable,
            desired,
            "add-on-nlb-hello-world.deployment-replicas",
        );
        raise_replicas(
            &mut cfg.add_on_alb_2048.deployment_replicas_alb,
            cfg.add_on_alb_2048.enable,
            desired,
            "add-on-alb-2048.deployment-replicas-alb",
        );
        raise_replicas(
            &mut cfg.add_on_alb_2048.deployment_replicas_2048,
            cfg.add_on_alb_2048.enable,
            desired,
            "add-on-alb-2048.deployment-replicas-2048",
        );
    }

    Ok(())
}

fn resolve_node_group(field: &str, mng: &mut ManagedNodeGroup, load_balanced: &[AddOn]) -> Result<()> {
    if mng.volume_size == 0 {
        mng.volume_size = DEFAULT_NODE_VOLUME_SIZE;
    }

    let ami_type: AmiType = mng.ami_type.parse().map_err(|_| {
        Error::validation_for_field(
            format!("{field}.ami-type"),
            format!("unknown {field}.ami-type {:?}", mng.ami_type),
        )
    })?;
    if mng.instance_types.is_empty() {
        mng.instance_types = vec![ami_type.default_instance_type().to_string()];
    }

    // Older generations fail as load balancer targets ("InvalidTarget")
    if let (Some(add_on), Some(itp)) = (load_balanced.first(), mng.older_instance_type()) {
        return Err(Error::validation_for_field(
            format!("{field}.instance-types"),
            format!("{} enabled, but older instance type {itp:?} for {:?}", add_on.field(), mng.name),
        ));
    }

    if mng.asg_desired_capacity > 0 && mng.asg_min_size == 0 && mng.asg_max_size == 0 {
        mng.asg_min_size = mng.asg_desired_capacity;
        mng.asg_max_size = mng.asg_desired_capacity;
    }
    check_auto_scaling(field, mng)?;

    debug!(
        node_group = %mng.name,
        %ami_type,
        gpu = ami_type.is_gpu(),
        instance_types = ?mng.instance_types,
        min = mng.asg_min_size,
        max = mng.asg_max_size,
        desired = mng.asg_desired_capacity,
        "resolved node group"
    );
    Ok(())
}

/// `min <= max`, `desired <= max`, both within the per-group node ceiling
///
/// A zero desired capacity lets the group start at its minimum, so
/// `min <= desired` only applies once desired is set.
fn check_auto_scaling(field: &str, mng: &ManagedNodeGroup) -> Result<()> {
    let (min, max, desired) = (
        mng.asg_min_size,
        mng.asg_max_size,
        mng.asg_desired_capacity,
    );
    if min > max {
        return Err(Error::validation_for_field(
            format!("{field}.asg-min-size"),
            format!("{field}.asg-min-size {min} > asg-max-size {max}"),
        ));
    }
    if desired > max {
        return Err(Error::validation_for_field(
            format!("{field}.asg-desired-capacity"),
            format!("{field}.asg-desired-capacity {desired} > asg-max-size {max}"),
        ));
    }
    if max > MNG_NODES_MAX_LIMIT {
        return Err(Error::limit(
            format!("{field}.asg-max-size"),
            max.into(),
            MNG_NODES_MAX_LIMIT.into(),
        ));
    }
    if desired > MNG_NODES_MAX_LIMIT {
        return Err(Error::limit(
            format!("{field}.asg-desired-capacity"),
            desired.into(),
            MNG_NODES_MAX_LIMIT.into(),
        ));
    }
    if desired > 0 && min > desired {
        return Err(Error::validation_for_field(
            format!("{field}.asg-min-size"),
            format!("{field}.asg-min-size {min} > asg-desired-capacity {desired}"),
        ));
    }
    Ok(())
}

fn raise_replicas(replicas: &mut u32, enabled: bool, desired: u32, field: &str) {
    if enabled && *replicas < desired {
        warn!(field, from = *replicas, to = desired, "raising replicas to node group desired capacity");
        *replicas = desired;
    }
}
