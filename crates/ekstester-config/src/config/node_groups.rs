//! Managed node group configuration

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default EC2 instance type for CPU worker nodes
pub const DEFAULT_NODE_INSTANCE_TYPE_CPU: &str = "c5.xlarge";

/// Default EC2 instance type for GPU worker nodes
pub const DEFAULT_NODE_INSTANCE_TYPE_GPU: &str = "p3.8xlarge";

/// Default root volume size for a worker node in GiB
pub const DEFAULT_NODE_VOLUME_SIZE: u32 = 40;

/// Managed node groups add-on
///
/// `mngs` is keyed by node group name and every entry's `name` must equal its
/// key; the resolver enforces this rather than relying on construction.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AddOnManagedNodeGroups {
    /// Whether node groups are created; dependent workloads require it
    pub enable: bool,

    /// Signing name for EKS node group API requests
    pub signing_name: String,

    /// Node group IAM role name (`<name>-mng-role` when empty)
    pub role_name: String,

    /// Service principals trusted by the node group role
    pub role_service_principals: Vec<String>,

    /// Managed policies attached to the node group role
    pub role_managed_policy_arns: Vec<String>,

    /// EC2 key pair for SSH access (`<name>-ssh` when empty)
    pub ssh_key_pair_name: String,

    /// Private key used to SSH into worker nodes
    pub remote_access_private_key_path: String,

    /// SSH user name on worker nodes
    pub remote_access_user_name: String,

    /// Directory for node logs (`<config-dir>/<name>-mng-logs` when empty)
    pub logs_dir: String,

    /// Node groups keyed by name
    pub mngs: BTreeMap<String, ManagedNodeGroup>,
}

/// A single managed node group
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ManagedNodeGroup {
    /// Node group name; must equal its key in `mngs`
    pub name: String,

    /// AMI release version; empty lets EKS pick the latest
    pub release_version: String,

    /// AMI type ("AL2_x86_64" or "AL2_x86_64_GPU")
    pub ami_type: String,

    /// EC2 instance types (defaulted from the AMI type when empty)
    pub instance_types: Vec<String>,

    /// Root volume size in GiB (defaulted when zero)
    pub volume_size: u32,

    /// Auto-scaling group minimum size
    pub asg_min_size: u32,

    /// Auto-scaling group maximum size
    pub asg_max_size: u32,

    /// Auto-scaling group desired capacity
    pub asg_desired_capacity: u32,
}

/// AMI family of a managed node group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmiType {
    /// Amazon Linux 2, x86_64
    Al2X8664,
    /// Amazon Linux 2 with GPU drivers, x86_64
    Al2X8664Gpu,
}

impl AmiType {
    /// Instance type used when a node group lists none
    pub fn default_instance_type(&self) -> &'static str {
        match self {
            Self::Al2X8664 => DEFAULT_NODE_INSTANCE_TYPE_CPU,
            Self::Al2X8664Gpu => DEFAULT_NODE_INSTANCE_TYPE_GPU,
        }
    }

    /// Returns true if nodes of this AMI type carry GPUs
    pub fn is_gpu(&self) -> bool {
        matches!(self, Self::Al2X8664Gpu)
    }
}

impl std::str::FromStr for AmiType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AL2_x86_64" => Ok(Self::Al2X8664),
            "AL2_x86_64_GPU" => Ok(Self::Al2X8664Gpu),
            _ => Err(crate::Error::validation(format!(
                "unknown AMI type {s:?}, expected one of: AL2_x86_64, AL2_x86_64_GPU"
            ))),
        }
    }
}

impl std::fmt::Display for AmiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Al2X8664 => write!(f, "AL2_x86_64"),
            Self::Al2X8664Gpu => write!(f, "AL2_x86_64_GPU"),
        }
    }
}

impl ManagedNodeGroup {
    /// First instance type from an older generation that load balancers
    /// cannot target ("m3." or "c4." families)
    pub fn older_instance_type(&self) -> Option<&str> {
        self.instance_types
            .iter()
            .map(String::as_str)
            .find(|t| t.starts_with("m3.") || t.starts_with("c4."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ami_type_parses_known_values() {
        assert_eq!("AL2_x86_64".parse::<AmiType>().unwrap(), AmiType::Al2X8664);
        assert_eq!(
            "AL2_x86_64_GPU".parse::<AmiType>().unwrap(),
            AmiType::Al2X8664Gpu
        );
        assert_eq!(AmiType::Al2X8664Gpu.to_string(), "AL2_x86_64_GPU");
    }

    #[test]
    fn ami_type_rejects_unknown_values() {
        let err = "AL2_ARM_64".parse::<AmiType>().unwrap_err();
        assert!(err.to_string().contains("AL2_ARM_64"));
    }

    #[test]
    fn default_instance_type_follows_ami_family() {
        assert_eq!(AmiType::Al2X8664.default_instance_type(), "c5.xlarge");
        assert_eq!(AmiType::Al2X8664Gpu.default_instance_type(), "p3.8xlarge");
        assert!(AmiType::Al2X8664Gpu.is_gpu());
        assert!(!AmiType::Al2X8664.is_gpu());
    }

    #[test]
    fn older_instance_types_are_detected() {
        let mut mng = ManagedNodeGroup {
            instance_types: vec!["c5.xlarge".to_string(), "m3.xlarge".to_string()],
            ..Default::default()
        };
        assert_eq!(mng.older_instance_type(), Some("m3.xlarge"));

        mng.instance_types = vec!["c4.large".to_string()];
        assert_eq!(mng.older_instance_type(), Some("c4.large"));

        mng.instance_types = vec!["m5.large".to_string()];
        assert_eq!(mng.older_instance_type(), None);
    }
}
