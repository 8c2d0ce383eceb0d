//! Configuration document for ekstester clusters: defaults, validation, persistence
//!
//! A [`Config`] is built once (from [`defaults::new_default`] or a YAML file via
//! [`loader::load_config`]), passed through the [`Resolver`] exactly once, and
//! then handed to provisioning as a frozen, fully-populated snapshot.

#![deny(missing_docs)]

pub mod config;
pub mod defaults;
pub mod error;
pub mod host;
pub mod loader;
pub mod persist;
pub mod regions;
pub mod resolver;

pub use config::{AddOn, Config};
pub use error::Error;
pub use host::{HostEnv, HostPlatform};
pub use resolver::Resolver;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix for environment variables that override configuration fields
pub const ENV_PREFIX: &str = "EKSTESTER_";

/// Maximum number of managed node groups per EKS cluster
pub const MNG_MAX_LIMIT: usize = 10;

/// Maximum number of nodes per managed node group
pub const MNG_NODES_MAX_LIMIT: u32 = 100;

/// Maximum payload size of a single job-echo item in bytes (0.25 MB)
pub const JOB_ECHO_SIZE_LIMIT: u64 = 250_000;

/// Maximum size of a single Secret object in bytes
pub const SECRET_SIZE_LIMIT: u64 = 1024 * 1024;
