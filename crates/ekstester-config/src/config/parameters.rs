//! EKS cluster parameters

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// EKS cluster parameters
///
/// The cluster role is configured either by service principals and managed
/// policies (a role is created) or by an explicit `cluster-role-arn`, never
/// both. The VPC CIDR and the three private subnet CIDRs are set together or
/// not at all.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Parameters {
    /// Signing name for EKS API requests
    pub cluster_signing_name: String,

    /// Kubernetes version; required, never defaulted implicitly during resolution
    pub version: String,

    // ==========================================================================
    // Cluster role
    // ==========================================================================
    /// Service principals trusted by a created cluster role
    pub cluster_role_service_principals: Vec<String>,

    /// Managed policies attached to a created cluster role
    pub cluster_role_managed_policy_arns: Vec<String>,

    /// Existing cluster role ARN
    pub cluster_role_arn: String,

    // ==========================================================================
    // Networking
    // ==========================================================================
    /// VPC CIDR block
    pub vpc_cidr: String,

    /// First private subnet CIDR block
    pub private_subnet_cidr_1: String,

    /// Second private subnet CIDR block
    pub private_subnet_cidr_2: String,

    /// Third private subnet CIDR block
    pub private_subnet_cidr_3: String,

    /// Existing private subnet IDs
    pub private_subnet_ids: Vec<String>,

    /// Existing control plane security group ID
    pub control_plane_security_group_id: String,
}

impl Parameters {
    /// Returns true if a cluster role should be created from principals/policies
    pub fn creates_cluster_role(&self) -> bool {
        !self.cluster_role_service_principals.is_empty()
            || !self.cluster_role_managed_policy_arns.is_empty()
    }
}
