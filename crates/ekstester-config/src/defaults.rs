//! Default provider
//!
//! [`new_default`] builds a fresh, fully independent document on every call;
//! nothing is shared between successive documents.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Datelike, Local, Timelike};
use rand::Rng;

use crate::config::{
    AddOnAlb2048, AddOnIrsa, AddOnJobEcho, AddOnJobPerl, AddOnManagedNodeGroups,
    AddOnNlbHelloWorld, AddOnSecrets, AmiType, Config, ManagedNodeGroup, Parameters, Status,
    StatusManagedNodeGroups,
};
use crate::config::{DEFAULT_NODE_INSTANCE_TYPE_CPU, DEFAULT_NODE_VOLUME_SIZE};
use crate::host::{HostEnv, HostPlatform};

/// Default AWS region
pub const DEFAULT_REGION: &str = "us-west-2";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default kubectl download URL (Linux variant)
pub const DEFAULT_KUBECTL_DOWNLOAD_URL: &str =
    "https://storage.googleapis.com/kubernetes-release/release/v1.14.10/bin/linux/amd64/kubectl";

/// Default kubectl install path
pub const DEFAULT_KUBECTL_PATH: &str = "/tmp/ekstester/kubectl";

/// Default Kubernetes version
pub const DEFAULT_KUBERNETES_VERSION: &str = "1.14";

/// Default EKS signing name
pub const DEFAULT_SIGNING_NAME: &str = "eks";

/// Prefix of generated cluster names
pub const NAME_PREFIX: &str = "eks";

/// Length of the random suffix of generated cluster names
pub const NAME_SUFFIX_LEN: usize = 12;

const NAME_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Build the default configuration document for `host`
///
/// Seeds a single CPU node group keyed by `<name>-mng-cpu`. Paths and
/// add-on names are left empty; the resolver derives them.
pub fn new_default(host: &HostEnv) -> Config {
    let name = generate_name();
    let mng_name = format!("{name}-mng-cpu");

    let mngs = BTreeMap::from([(
        mng_name.clone(),
        ManagedNodeGroup {
            name: mng_name,
            release_version: String::new(),
            ami_type: AmiType::Al2X8664.to_string(),
            instance_types: vec![DEFAULT_NODE_INSTANCE_TYPE_CPU.to_string()],
            volume_size: DEFAULT_NODE_VOLUME_SIZE,
            asg_min_size: 2,
            asg_max_size: 2,
            asg_desired_capacity: 2,
        },
    )]);

    Config {
        name,
        region: DEFAULT_REGION.to_string(),
        aws_cli_path: host.aws_cli_path.to_string_lossy().into_owned(),
        log_level: DEFAULT_LOG_LEVEL.to_string(),
        log_outputs: vec!["stderr".to_string()],
        kubectl_download_url: host.platform.rewrite_url(DEFAULT_KUBECTL_DOWNLOAD_URL),
        kubectl_path: DEFAULT_KUBECTL_PATH.to_string(),
        on_failure_delete: true,
        on_failure_delete_wait_seconds: 60,

        parameters: Parameters {
            cluster_signing_name: DEFAULT_SIGNING_NAME.to_string(),
            version: DEFAULT_KUBERNETES_VERSION.to_string(),
            ..Default::default()
        },

        add_on_managed_node_groups: AddOnManagedNodeGroups {
            enable: true,
            signing_name: DEFAULT_SIGNING_NAME.to_string(),
            role_service_principals: vec![
                "ec2.amazonaws.com".to_string(),
                "eks.amazonaws.com".to_string(),
            ],
            role_managed_policy_arns: vec![
                "arn:aws:iam::aws:policy/AmazonEKSWorkerNodePolicy".to_string(),
                "arn:aws:iam::aws:policy/AmazonEKS_CNI_Policy".to_string(),
                "arn:aws:iam::aws:policy/AmazonEC2ContainerRegistryReadOnly".to_string(),
            ],
            remote_access_private_key_path: default_private_key_path(host.platform)
                .to_string_lossy()
                .into_owned(),
            // Amazon Linux 2
            remote_access_user_name: "ec2-user".to_string(),
            mngs,
            ..Default::default()
        },

        add_on_nlb_hello_world: AddOnNlbHelloWorld {
            enable: true,
            deployment_replicas: 3,
            ..Default::default()
        },
        add_on_alb_2048: AddOnAlb2048 {
            enable: false,
            deployment_replicas_alb: 3,
            deployment_replicas_2048: 3,
            ..Default::default()
        },
        add_on_job_perl: AddOnJobPerl {
            enable: false,
            completes: 30,
            parallels: 10,
            ..Default::default()
        },
        // 1000 x 100 KB writes about 100 MB to etcd
        add_on_job_echo: AddOnJobEcho {
            enable: false,
            completes: 1000,
            parallels: 100,
            size: 100 * 1024,
            ..Default::default()
        },
        add_on_secrets: AddOnSecrets {
            enable: false,
            objects: 1000,
            size: 10 * 1024,
            secret_qps: 1,
            secret_burst: 1,
            pod_qps: 100,
            pod_burst: 5,
            ..Default::default()
        },
        add_on_irsa: AddOnIrsa {
            enable: false,
            role_managed_policy_arns: vec![
                "arn:aws:iam::aws:policy/AmazonS3ReadOnlyAccess".to_string()
            ],
            deployment_replicas: 10,
            ..Default::default()
        },

        status: Status::default(),
        status_managed_node_groups: StatusManagedNodeGroups::default(),

        ..Default::default()
    }
}

/// Generate a practically unique cluster name
///
/// Format: `eks-YYYYMMDDHH-<12 lower-case alphanumerics>`.
pub fn generate_name() -> String {
    let now = Local::now();
    format!(
        "{}-{}{:02}{:02}{:02}-{}",
        NAME_PREFIX,
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        random_suffix(NAME_SUFFIX_LEN)
    )
}

/// Random lower-case alphanumeric string of length `n`
pub fn random_suffix(n: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| NAME_CHARSET[rng.gen_range(0..NAME_CHARSET.len())] as char)
        .collect()
}

/// SSH private key used for node remote access
///
/// On macOS a throwaway key in the temp directory is used instead of the
/// shared `~/.ssh/kube_aws_rsa`.
fn default_private_key_path(platform: HostPlatform) -> PathBuf {
    match platform {
        HostPlatform::Darwin => {
            std::env::temp_dir().join(format!("{}.insecure.key", random_suffix(10)))
        }
        HostPlatform::Linux => dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(".ssh")
            .join("kube_aws_rsa"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_host() -> HostEnv {
        HostEnv {
            platform: HostPlatform::Linux,
            aws_cli_path: PathBuf::from("/usr/local/bin/aws"),
        }
    }

    #[test]
    fn generated_names_follow_the_naming_scheme() {
        let name = generate_name();
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 3, "unexpected name {name}");
        assert_eq!(parts[0], "eks");
        assert_eq!(parts[1].len(), 10);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), NAME_SUFFIX_LEN);
        assert_eq!(name, name.to_lowercase());
    }

    #[test]
    fn generated_names_are_unique() {
        assert_ne!(generate_name(), generate_name());
    }

    #[test]
    fn default_seeds_one_node_group_keyed_by_name() {
        let cfg = new_default(&linux_host());
        assert_eq!(cfg.add_on_managed_node_groups.mngs.len(), 1);

        let (key, mng) = cfg
            .add_on_managed_node_groups
            .mngs
            .iter()
            .next()
            .expect("seeded node group");
        assert_eq!(key, &format!("{}-mng-cpu", cfg.name));
        assert_eq!(&mng.name, key);
        assert_eq!(mng.ami_type, "AL2_x86_64");
        assert_eq!(mng.instance_types, vec!["c5.xlarge".to_string()]);
        assert_eq!(
            (mng.asg_min_size, mng.asg_max_size, mng.asg_desired_capacity),
            (2, 2, 2)
        );
    }

    #[test]
    fn default_carries_static_baseline() {
        let cfg = new_default(&linux_host());
        assert_eq!(cfg.region, "us-west-2");
        assert_eq!(cfg.log_outputs, vec!["stderr".to_string()]);
        assert_eq!(cfg.parameters.version, "1.14");
        assert_eq!(cfg.aws_cli_path, "/usr/local/bin/aws");
        assert!(cfg.kubectl_download_url.contains("/linux/"));
        assert!(cfg.add_on_nlb_hello_world.enable);
        assert!(!cfg.add_on_secrets.enable);
        assert!(cfg.config_path.is_empty());
    }

    #[test]
    fn darwin_host_gets_darwin_download_url() {
        let host = HostEnv {
            platform: HostPlatform::Darwin,
            ..linux_host()
        };
        let cfg = new_default(&host);
        assert!(cfg.kubectl_download_url.contains("/darwin/"));
        assert!(cfg
            .add_on_managed_node_groups
            .remote_access_private_key_path
            .ends_with(".insecure.key"));
    }

    /// Story: Successive defaults never alias each other
    ///
    /// Mutating one document's nested maps must not leak into another.
    #[test]
    fn story_successive_defaults_are_independent() {
        let host = linux_host();
        let mut first = new_default(&host);
        let second = new_default(&host);

        first.add_on_managed_node_groups.mngs.clear();
        first.log_outputs.push("stdout".to_string());

        assert_eq!(second.add_on_managed_node_groups.mngs.len(), 1);
        assert_eq!(second.log_outputs.len(), 1);
        assert_ne!(first.name, second.name);
    }
}
