//! The configuration document
//!
//! Every struct deserializes absent fields to their zero value
//! (`#[serde(default)]`), which is how "unset" is represented throughout
//! resolution. Keyed collections are `BTreeMap`s so the serialized document is
//! deterministic.

mod addons;
mod node_groups;
mod parameters;
mod status;

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use addons::{
    AddOn, AddOnAlb2048, AddOnIrsa, AddOnJobEcho, AddOnJobPerl, AddOnNlbHelloWorld, AddOnSecrets,
};
pub use node_groups::{
    AddOnManagedNodeGroups, AmiType, ManagedNodeGroup, DEFAULT_NODE_INSTANCE_TYPE_CPU,
    DEFAULT_NODE_INSTANCE_TYPE_GPU, DEFAULT_NODE_VOLUME_SIZE,
};
pub use parameters::Parameters;
pub use status::{Status, StatusManagedNodeGroup, StatusManagedNodeGroups};

/// Root configuration document for one EKS test cluster
///
/// `name` is the root identity: every derived resource name and artifact path
/// is computed from it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Cluster name (lower-case); stem of every derived name
    pub name: String,

    /// AWS region (e.g. "us-west-2")
    pub region: String,

    // ==========================================================================
    // Output artifacts
    // ==========================================================================
    /// Absolute path of the persisted configuration file
    pub config_path: String,

    /// Generated script of useful kubectl commands (`<stem>.kubectl.sh`)
    pub kubectl_commands_output_path: String,

    /// Generated script of SSH commands to reach worker nodes (`<stem>.ssh.sh`)
    pub ssh_commands_output_path: String,

    /// Generated kubeconfig (`<stem>.kubeconfig.yaml`)
    pub kube_config_path: String,

    // ==========================================================================
    // Host tooling
    // ==========================================================================
    /// Path to the `aws` CLI, filled from the host when empty
    pub aws_cli_path: String,

    /// Log level ("debug", "info", "warn", "error", "trace")
    pub log_level: String,

    /// Log sinks: "stderr", "stdout", or file paths; must not be empty
    pub log_outputs: Vec<String>,

    /// kubectl binary download URL for the host platform
    pub kubectl_download_url: String,

    /// Where the downloaded kubectl binary is placed
    pub kubectl_path: String,

    /// Delete partially created resources when provisioning fails
    pub on_failure_delete: bool,

    /// Seconds to wait before deleting on failure
    pub on_failure_delete_wait_seconds: u64,

    // ==========================================================================
    // Cluster and add-ons
    // ==========================================================================
    /// EKS cluster parameters
    pub parameters: Parameters,

    /// Managed node groups
    pub add_on_managed_node_groups: AddOnManagedNodeGroups,

    /// NLB hello-world demo workload
    pub add_on_nlb_hello_world: AddOnNlbHelloWorld,

    /// ALB 2048 demo workload
    pub add_on_alb_2048: AddOnAlb2048,

    /// Perl batch job workload
    pub add_on_job_perl: AddOnJobPerl,

    /// Echo batch job workload
    pub add_on_job_echo: AddOnJobEcho,

    /// Secret-store stress test
    pub add_on_secrets: AddOnSecrets,

    /// IAM roles for service accounts workload
    pub add_on_irsa: AddOnIrsa,

    // ==========================================================================
    // Read-only status
    // ==========================================================================
    /// Cluster provisioning status
    pub status: Status,

    /// Managed node group provisioning status
    pub status_managed_node_groups: StatusManagedNodeGroups,
}

impl Config {
    /// Directory containing the configuration file
    ///
    /// Derived artifacts (logs, result files) are placed next to it.
    pub fn config_dir(&self) -> PathBuf {
        Path::new(&self.config_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Derive a resource name from the root name: `<name>-<suffix>`
    pub fn derived_name(&self, suffix: &str) -> String {
        format!("{}-{}", self.name, suffix)
    }

    /// Derive an artifact path next to the config file: `<config-dir>/<name>-<suffix>`
    pub fn derived_path(&self, suffix: &str) -> String {
        self.config_dir()
            .join(self.derived_name(suffix))
            .to_string_lossy()
            .into_owned()
    }

    /// Add-ons that are currently enabled
    pub fn enabled_add_ons(&self) -> Vec<AddOn> {
        AddOn::ALL
            .into_iter()
            .filter(|a| a.is_enabled(self))
            .collect()
    }
}
