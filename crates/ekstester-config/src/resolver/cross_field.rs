//! Cross-field validation
//!
//! Pure predicates over small groups of related fields. Each check fails fast
//! with an error naming the offending fields and their values.

use std::str::FromStr;

use crate::config::Config;
use crate::{regions, Error, Result};

/// Region, name, and log sink checks; run before anything is derived from the name
pub(super) fn check_identity(cfg: &Config) -> Result<()> {
    if !regions::is_known(&cfg.region) {
        return Err(Error::validation_for_field(
            "region",
            format!("region {:?} not found", cfg.region),
        ));
    }
    if cfg.name.is_empty() {
        return Err(Error::validation_for_field("name", "name is empty"));
    }
    if cfg.name != cfg.name.to_lowercase() {
        return Err(Error::validation_for_field(
            "name",
            format!("name {:?} must be in lower-case", cfg.name),
        ));
    }
    if cfg.log_outputs.is_empty() {
        return Err(Error::validation_for_field(
            "log-outputs",
            "log-outputs is empty",
        ));
    }
    if tracing::Level::from_str(&cfg.log_level).is_err() {
        return Err(Error::validation_for_field(
            "log-level",
            format!(
                "log-level {:?} is not one of trace, debug, info, warn, error",
                cfg.log_level
            ),
        ));
    }
    Ok(())
}

/// Role, networking, version, and status pairing checks
pub(super) fn check(cfg: &Config) -> Result<()> {
    let params = &cfg.parameters;
    let status = &cfg.status;

    // cluster role
    if params.creates_cluster_role() && !params.cluster_role_arn.is_empty() {
        return Err(Error::validation_for_field(
            "parameters.cluster-role-arn",
            format!(
                "non-empty parameters.cluster-role-service-principals {:?} or parameters.cluster-role-managed-policy-arns {:?}, but got parameters.cluster-role-arn {:?}",
                params.cluster_role_service_principals,
                params.cluster_role_managed_policy_arns,
                params.cluster_role_arn,
            ),
        ));
    }
    require_all_or_nothing(&[
        Member::text(
            "status.cluster-role-cfn-stack-id",
            &status.cluster_role_cfn_stack_id,
        ),
        Member::text("status.cluster-role-name", &status.cluster_role_name),
        Member::text("status.cluster-role-arn", &status.cluster_role_arn),
    ])?;

    // VPC
    require_all_or_nothing(&[
        Member::text("parameters.vpc-cidr", &params.vpc_cidr),
        Member::text(
            "parameters.private-subnet-cidr-1",
            &params.private_subnet_cidr_1,
        ),
        Member::text(
            "parameters.private-subnet-cidr-2",
            &params.private_subnet_cidr_2,
        ),
        Member::text(
            "parameters.private-subnet-cidr-3",
            &params.private_subnet_cidr_3,
        ),
    ])?;
    require_all_or_nothing(&[
        Member::text("status.vpc-cfn-stack-id", &status.vpc_cfn_stack_id),
        Member::text("status.vpc-id", &status.vpc_id),
        Member::list("status.private-subnet-ids", &status.private_subnet_ids),
        Member::text(
            "status.control-plane-security-group-id",
            &status.control_plane_security_group_id,
        ),
    ])?;

    // cluster
    if params.version.is_empty() {
        return Err(Error::validation_for_field(
            "parameters.version",
            "empty parameters.version",
        ));
    }
    require_all_or_nothing(&[
        Member::list("parameters.private-subnet-ids", &params.private_subnet_ids),
        Member::text(
            "parameters.control-plane-security-group-id",
            &params.control_plane_security_group_id,
        ),
    ])?;
    require_all_or_nothing(&[
        Member::text("status.cluster-cfn-stack-id", &status.cluster_cfn_stack_id),
        Member::text("status.cluster-arn", &status.cluster_arn),
        Member::text("status.cluster-ca", &status.cluster_ca),
        Member::text("status.cluster-ca-decoded", &status.cluster_ca_decoded),
    ])?;

    Ok(())
}

/// One field of a paired group
struct Member<'a> {
    field: &'a str,
    value: String,
    present: bool,
}

impl<'a> Member<'a> {
    fn text(field: &'a str, value: &str) -> Self {
        Self {
            field,
            value: format!("{value:?}"),
            present: !value.is_empty(),
        }
    }

    fn list(field: &'a str, value: &[String]) -> Self {
        Self {
            field,
            value: format!("{value:?}"),
            present: !value.is_empty(),
        }
    }
}

/// Fail if some but not all members of a group are set
fn require_all_or_nothing(group: &[Member<'_>]) -> Result<()> {
    let Some(set) = group.iter().find(|m| m.present) else {
        return Ok(());
    };
    match group.iter().find(|m| !m.present) {
        Some(missing) => Err(Error::validation_for_field(
            missing.field,
            format!(
                "non-empty {} {}, but empty {}",
                set.field, set.value, missing.field
            ),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn valid() -> Config {
        Config {
            name: "eks-test".to_string(),
            region: "us-west-2".to_string(),
            log_level: "info".to_string(),
            log_outputs: vec!["stderr".to_string()],
            parameters: crate::config::Parameters {
                version: "1.14".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn valid_document_passes() {
        check_identity(&valid()).unwrap();
        check(&valid()).unwrap();
    }

    #[rstest]
    #[case::unknown_region(|c: &mut Config| c.region = "mars-east-1".to_string(), "region")]
    #[case::empty_name(|c: &mut Config| c.name.clear(), "name")]
    #[case::upper_case_name(|c: &mut Config| c.name = "EKS-Test".to_string(), "name")]
    #[case::no_log_outputs(|c: &mut Config| c.log_outputs.clear(), "log-outputs")]
    #[case::bad_log_level(|c: &mut Config| c.log_level = "loud".to_string(), "log-level")]
    fn identity_violations_are_rejected(#[case] mutate: fn(&mut Config), #[case] field: &str) {
        let mut cfg = valid();
        mutate(&mut cfg);

        let err = check_identity(&cfg).unwrap_err();

        assert_eq!(err.field(), Some(field));
    }

    #[test]
    fn role_arn_is_exclusive_with_principals() {
        let mut cfg = valid();
        cfg.parameters.cluster_role_arn = "arn:aws:iam::123:role/eks".to_string();
        check(&cfg).unwrap();

        cfg.parameters.cluster_role_service_principals = vec!["eks.amazonaws.com".to_string()];
        let err = check(&cfg).unwrap_err();
        assert_eq!(err.field(), Some("parameters.cluster-role-arn"));

        cfg.parameters.cluster_role_service_principals.clear();
        cfg.parameters.cluster_role_managed_policy_arns = vec!["arn:policy".to_string()];
        assert!(check(&cfg).is_err());
    }

    #[test]
    fn missing_version_is_rejected() {
        let mut cfg = valid();
        cfg.parameters.version.clear();
        let err = check(&cfg).unwrap_err();
        assert_eq!(err.field(), Some("parameters.version"));
    }

    #[test]
    fn error_names_both_fields_and_the_value() {
        let mut cfg = valid();
        cfg.parameters.vpc_cidr = "192.168.0.0/16".to_string();

        let err = check(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("parameters.vpc-cidr"), "{msg}");
        assert!(msg.contains("\"192.168.0.0/16\""), "{msg}");
        assert!(msg.contains("parameters.private-subnet-cidr-1"), "{msg}");
    }

    /// Every non-empty, non-full subset of a paired group is rejected.
    fn assert_group_symmetric(setters: &[fn(&mut Config)]) {
        let n = setters.len();
        for mask in 0u32..(1 << n) {
            let mut cfg = valid();
            for (i, set) in setters.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    set(&mut cfg);
                }
            }
            let all = mask == (1 << n) - 1;
            let none = mask == 0;
            assert_eq!(
                check(&cfg).is_ok(),
                all || none,
                "subset mask {mask:#b} of {n} members"
            );
        }
    }

    #[test]
    fn cidr_group_is_all_or_nothing() {
        assert_group_symmetric(&[
            |c: &mut Config| c.parameters.vpc_cidr = "192.168.0.0/16".to_string(),
            |c: &mut Config| c.parameters.private_subnet_cidr_1 = "192.168.64.0/19".to_string(),
            |c: &mut Config| c.parameters.private_subnet_cidr_2 = "192.168.128.0/19".to_string(),
            |c: &mut Config| c.parameters.private_subnet_cidr_3 = "192.168.192.0/19".to_string(),
        ]);
    }

    #[test]
    fn subnet_ids_pair_with_security_group() {
        assert_group_symmetric(&[
            |c: &mut Config| c.parameters.private_subnet_ids = vec!["subnet-1".to_string()],
            |c: &mut Config| c.parameters.control_plane_security_group_id = "sg-1".to_string(),
        ]);
    }

    #[test]
    fn role_status_group_is_all_or_nothing() {
        assert_group_symmetric(&[
            |c: &mut Config| c.status.cluster_role_cfn_stack_id = "stack/role".to_string(),
            |c: &mut Config| c.status.cluster_role_name = "eks-test-role".to_string(),
            |c: &mut Config| c.status.cluster_role_arn = "arn:aws:iam::123:role/eks-test-role".to_string(),
        ]);
    }

    #[test]
    fn vpc_status_group_is_all_or_nothing() {
        assert_group_symmetric(&[
            |c: &mut Config| c.status.vpc_cfn_stack_id = "stack/vpc".to_string(),
            |c: &mut Config| c.status.vpc_id = "vpc-1".to_string(),
            |c: &mut Config| c.status.private_subnet_ids = vec!["subnet-1".to_string()],
            |c: &mut Config| c.status.control_plane_security_group_id = "sg-1".to_string(),
        ]);
    }

    #[test]
    fn cluster_status_group_is_all_or_nothing() {
        assert_group_symmetric(&[
            |c: &mut Config| c.status.cluster_cfn_stack_id = "stack/cluster".to_string(),
            |c: &mut Config| c.status.cluster_arn = "arn:aws:eks:us-west-2:123:cluster/eks-test".to_string(),
            |c: &mut Config| c.status.cluster_ca = "Y2E=".to_string(),
            |c: &mut Config| c.status.cluster_ca_decoded = "ca".to_string(),
        ]);
    }
}
