//! Read-only provisioning status
//!
//! Populated by provisioning, never by resolution. Each CloudFormation stack
//! ID travels together with the resources it produced; the resolver rejects
//! a document where only part of a group is present.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cluster provisioning status
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Status {
    /// Whether the cluster is up
    pub up: bool,

    /// Cluster role stack
    pub cluster_role_cfn_stack_id: String,
    /// Cluster role name created by the role stack
    pub cluster_role_name: String,
    /// Cluster role ARN created by the role stack
    pub cluster_role_arn: String,

    /// VPC stack
    pub vpc_cfn_stack_id: String,
    /// VPC ID created by the VPC stack
    pub vpc_id: String,
    /// Private subnet IDs created by the VPC stack
    pub private_subnet_ids: Vec<String>,
    /// Control plane security group created by the VPC stack
    pub control_plane_security_group_id: String,

    /// Cluster stack
    pub cluster_cfn_stack_id: String,
    /// Cluster ARN created by the cluster stack
    pub cluster_arn: String,
    /// Base64 encoded cluster CA
    pub cluster_ca: String,
    /// Decoded cluster CA
    pub cluster_ca_decoded: String,

    /// Kubernetes API server endpoint
    pub cluster_api_server_endpoint: String,
}

/// Managed node group provisioning status
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct StatusManagedNodeGroups {
    /// Node group role stack
    pub role_cfn_stack_id: String,
    /// Node group role name
    pub role_name: String,
    /// Node group role ARN
    pub role_arn: String,

    /// Whether the NVIDIA device plugin has been installed
    pub nvidia_driver_installed: bool,

    /// Per node group status, keyed by node group name
    pub nodes: BTreeMap<String, StatusManagedNodeGroup>,
}

/// Status of a single managed node group
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct StatusManagedNodeGroup {
    /// Node group stack
    pub cfn_stack_id: String,
    /// Security group allowing remote access to the nodes
    pub remote_access_security_group_id: String,
    /// Last observed node group status (e.g. "ACTIVE")
    pub phase: String,
}
