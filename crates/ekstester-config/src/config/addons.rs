//! Workload add-ons that run on managed node groups
//!
//! Each add-on owns its namespace and sizing parameters. Dependent names are
//! only derived when the add-on is enabled.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Config;

/// NLB hello-world demo deployment
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AddOnNlbHelloWorld {
    /// Whether the add-on is deployed
    pub enable: bool,
    /// Namespace (`<name>-nlb-hello-world` when empty)
    pub namespace: String,
    /// Deployment replicas; raised to the largest node group desired capacity
    pub deployment_replicas: u32,
}

/// ALB ingress controller with the 2048 game
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AddOnAlb2048 {
    /// Whether the add-on is deployed
    pub enable: bool,
    /// Namespace (`<name>-alb-2048` when empty)
    pub namespace: String,
    /// IAM policy for the ALB ingress controller
    pub policy_name: String,
    /// ALB ingress controller replicas
    pub deployment_replicas_alb: u32,
    /// 2048 game replicas
    pub deployment_replicas_2048: u32,
}

/// Batch job computing digits of pi in perl
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AddOnJobPerl {
    /// Whether the add-on is deployed
    pub enable: bool,
    /// Namespace (`<name>-job-perl` when empty)
    pub namespace: String,
    /// Desired number of successfully finished pods
    pub completes: u32,
    /// Maximum number of pods running in parallel
    pub parallels: u32,
}

/// Batch job echoing a fixed-size payload, loading etcd with writes
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AddOnJobEcho {
    /// Whether the add-on is deployed
    pub enable: bool,
    /// Namespace (`<name>-job-echo` when empty)
    pub namespace: String,
    /// Desired number of successfully finished pods
    pub completes: u32,
    /// Maximum number of pods running in parallel
    pub parallels: u32,
    /// Payload size of each echo in bytes
    pub size: u64,
}

/// Secret write/read stress test
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AddOnSecrets {
    /// Whether the add-on is deployed
    pub enable: bool,
    /// Namespace (`<name>-secrets` when empty)
    pub namespace: String,
    /// Number of Secret objects to write
    pub objects: u32,
    /// Size of each Secret value in bytes
    pub size: u64,
    /// Client QPS for Secret writes
    pub secret_qps: u32,
    /// Client burst for Secret writes
    pub secret_burst: u32,
    /// Client QPS for Pod creation
    pub pod_qps: u32,
    /// Client burst for Pod creation
    pub pod_burst: u32,
    /// CSV file of write latencies
    pub writes_result_path: String,
    /// CSV file of read latencies
    pub reads_result_path: String,
}

/// IAM roles for service accounts test workload
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AddOnIrsa {
    /// Whether the add-on is deployed
    pub enable: bool,
    /// Namespace (`<name>-irsa` when empty)
    pub namespace: String,
    /// IAM role assumed by the service account
    pub role_name: String,
    /// Managed policies attached to the role
    pub role_managed_policy_arns: Vec<String>,
    /// Service account bound to the role
    pub service_account_name: String,
    /// ConfigMap holding the test script
    pub config_map_name: String,
    /// File name of the test script inside the ConfigMap
    pub config_map_script_file_name: String,
    /// S3 bucket the workload reads from
    pub s3_bucket_name: String,
    /// S3 object key the workload reads
    pub s3_key: String,
    /// Deployment name
    pub deployment_name: String,
    /// Where the deployment's output is collected
    pub deployment_result_path: String,
    /// Deployment replicas
    pub deployment_replicas: u32,
}

/// Add-ons that depend on managed node groups
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOn {
    /// NLB hello-world
    NlbHelloWorld,
    /// ALB 2048
    Alb2048,
    /// Perl job
    JobPerl,
    /// Echo job
    JobEcho,
    /// Secrets stress test
    Secrets,
    /// IRSA workload
    Irsa,
}

impl AddOn {
    /// Every dependent add-on, in resolution order
    pub const ALL: [AddOn; 6] = [
        AddOn::NlbHelloWorld,
        AddOn::Alb2048,
        AddOn::JobPerl,
        AddOn::JobEcho,
        AddOn::Secrets,
        AddOn::Irsa,
    ];

    /// Short name used to derive the add-on namespace
    pub fn slug(&self) -> &'static str {
        match self {
            Self::NlbHelloWorld => "nlb-hello-world",
            Self::Alb2048 => "alb-2048",
            Self::JobPerl => "job-perl",
            Self::JobEcho => "job-echo",
            Self::Secrets => "secrets",
            Self::Irsa => "irsa",
        }
    }

    /// Document key of the add-on section
    pub fn field(&self) -> String {
        format!("add-on-{}", self.slug())
    }

    /// Returns true if the add-on exposes a load-balanced service
    pub fn is_load_balanced(&self) -> bool {
        matches!(self, Self::NlbHelloWorld | Self::Alb2048)
    }

    /// Whether the add-on is enabled in `cfg`
    pub fn is_enabled(&self, cfg: &Config) -> bool {
        match self {
            Self::NlbHelloWorld => cfg.add_on_nlb_hello_world.enable,
            Self::Alb2048 => cfg.add_on_alb_2048.enable,
            Self::JobPerl => cfg.add_on_job_perl.enable,
            Self::JobEcho => cfg.add_on_job_echo.enable,
            Self::Secrets => cfg.add_on_secrets.enable,
            Self::Irsa => cfg.add_on_irsa.enable,
        }
    }

    /// Mutable access to the add-on namespace
    pub fn namespace_mut<'a>(&self, cfg: &'a mut Config) -> &'a mut String {
        match self {
            Self::NlbHelloWorld => &mut cfg.add_on_nlb_hello_world.namespace,
            Self::Alb2048 => &mut cfg.add_on_alb_2048.namespace,
            Self::JobPerl => &mut cfg.add_on_job_perl.namespace,
            Self::JobEcho => &mut cfg.add_on_job_echo.namespace,
            Self::Secrets => &mut cfg.add_on_secrets.namespace,
            Self::Irsa => &mut cfg.add_on_irsa.namespace,
        }
    }
}

impl std::fmt::Display for AddOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_matches_document_key() {
        let value = serde_json::to_value(Config::default()).expect("serialize");
        for add_on in AddOn::ALL {
            assert!(
                value.get(add_on.field()).is_some(),
                "missing document key for {add_on}"
            );
        }
    }

    #[test]
    fn only_service_add_ons_are_load_balanced() {
        let balanced: Vec<_> = AddOn::ALL
            .into_iter()
            .filter(AddOn::is_load_balanced)
            .collect();
        assert_eq!(balanced, vec![AddOn::NlbHelloWorld, AddOn::Alb2048]);
    }

    #[test]
    fn namespace_mut_targets_the_owning_section() {
        let mut cfg = Config::default();
        *AddOn::Secrets.namespace_mut(&mut cfg) = "ns".to_string();
        assert_eq!(cfg.add_on_secrets.namespace, "ns");
        assert!(cfg.add_on_irsa.namespace.is_empty());
    }
}
