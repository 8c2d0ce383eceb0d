//! Artifact path resolution
//!
//! Every generated artifact shares the config file's stem:
//!
//! | Artifact | Path |
//! |---|---|
//! | kubectl commands | `<stem>.kubectl.sh` |
//! | SSH commands | `<stem>.ssh.sh` |
//! | kubeconfig | `<stem>.kubeconfig.yaml` |
//! | node group logs | `<config-dir>/<name>-mng-logs` |

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::persist::create_private_dir;
use crate::{Error, Result};

const CONFIG_EXTENSION: &str = "yaml";

pub(super) fn resolve(cfg: &mut Config) -> Result<()> {
    if cfg.config_path.is_empty() {
        let root_dir = root_dir(&cfg.name)?;
        cfg.config_path = root_dir
            .join(format!("{}-config.{CONFIG_EXTENSION}", cfg.name))
            .to_string_lossy()
            .into_owned();
    }
    let config_path = std::path::absolute(&cfg.config_path)
        .map_err(|e| Error::io(cfg.config_path.as_str(), e))?;
    cfg.config_path = config_path.to_string_lossy().into_owned();

    if let Some(dir) = config_path.parent() {
        create_private_dir(dir)?;
    }

    let stem = stem(&cfg.config_path);
    default_with_extension(
        &mut cfg.kubectl_commands_output_path,
        format!("{stem}.kubectl.sh"),
        "sh",
    );
    default_with_extension(
        &mut cfg.ssh_commands_output_path,
        format!("{stem}.ssh.sh"),
        "sh",
    );
    default_with_extension(
        &mut cfg.kube_config_path,
        format!("{stem}.kubeconfig.yaml"),
        CONFIG_EXTENSION,
    );

    if cfg.add_on_managed_node_groups.logs_dir.is_empty() {
        cfg.add_on_managed_node_groups.logs_dir = cfg.derived_path("mng-logs");
    }

    debug!(
        config_path = %cfg.config_path,
        kubectl = %cfg.kubectl_commands_output_path,
        ssh = %cfg.ssh_commands_output_path,
        kubeconfig = %cfg.kube_config_path,
        "resolved artifact paths"
    );
    Ok(())
}

/// Working directory, or a scratch directory owned by this process when the
/// working directory is unavailable
fn root_dir(name: &str) -> Result<PathBuf> {
    root_dir_from(std::env::current_dir(), name)
}

fn root_dir_from(cwd: std::io::Result<PathBuf>, name: &str) -> Result<PathBuf> {
    match cwd {
        Ok(dir) => Ok(dir),
        Err(e) => {
            let dir = std::env::temp_dir().join(name);
            warn!(error = %e, fallback = %dir.display(), "working directory unavailable");
            create_private_dir(&dir)?;
            Ok(dir)
        }
    }
}

/// Config path without its `.yaml` extension
fn stem(config_path: &str) -> &str {
    config_path
        .strip_suffix(&format!(".{CONFIG_EXTENSION}"))
        .unwrap_or(config_path)
}

/// Fill `value` with `default` when empty, then append `.<ext>` if missing
fn default_with_extension(value: &mut String, default: String, ext: &str) {
    if value.is_empty() {
        *value = default;
    }
    if Path::new(value.as_str()).extension().and_then(|e| e.to_str()) != Some(ext) {
        value.push('.');
        value.push_str(ext);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, config_path: &str) -> Config {
        Config {
            name: name.to_string(),
            config_path: config_path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn artifacts_derive_from_config_stem() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("eks-a-config.yaml");
        let mut cfg = named("eks-a", config_path.to_str().unwrap());

        resolve(&mut cfg).unwrap();

        let stem = dir.path().join("eks-a-config");
        let stem = stem.to_str().unwrap();
        assert_eq!(cfg.kubectl_commands_output_path, format!("{stem}.kubectl.sh"));
        assert_eq!(cfg.ssh_commands_output_path, format!("{stem}.ssh.sh"));
        assert_eq!(cfg.kube_config_path, format!("{stem}.kubeconfig.yaml"));
        assert_eq!(
            PathBuf::from(&cfg.add_on_managed_node_groups.logs_dir),
            dir.path().join("eks-a-mng-logs")
        );
    }

    #[test]
    fn empty_config_path_defaults_to_working_directory() {
        let mut cfg = named("eks-b", "");

        resolve(&mut cfg).unwrap();

        let expected = std::env::current_dir().unwrap().join("eks-b-config.yaml");
        assert_eq!(PathBuf::from(&cfg.config_path), expected);
        assert!(Path::new(&cfg.config_path).is_absolute());
    }

    #[test]
    fn unavailable_working_directory_falls_back_to_scratch_dir() {
        let name = format!("eks-paths-{}", crate::defaults::random_suffix(8));
        let gone = std::io::Error::new(std::io::ErrorKind::NotFound, "cwd removed");

        let dir = root_dir_from(Err(gone), &name).unwrap();

        assert_eq!(dir, std::env::temp_dir().join(&name));
        assert!(dir.is_dir());
        std::fs::remove_dir(&dir).unwrap();
    }

    #[test]
    fn available_working_directory_is_used_as_is() {
        let cwd = PathBuf::from("/work/clusters");
        assert_eq!(root_dir_from(Ok(cwd.clone()), "eks-x").unwrap(), cwd);
    }

    #[test]
    fn missing_extensions_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = named("eks-c", dir.path().join("c.yaml").to_str().unwrap());
        cfg.kubectl_commands_output_path = "/tmp/out/kubectl-cmds".to_string();
        cfg.ssh_commands_output_path = "/tmp/out/ssh.sh".to_string();
        cfg.kube_config_path = "/tmp/out/kubeconfig".to_string();

        resolve(&mut cfg).unwrap();

        assert_eq!(cfg.kubectl_commands_output_path, "/tmp/out/kubectl-cmds.sh");
        assert_eq!(cfg.ssh_commands_output_path, "/tmp/out/ssh.sh");
        assert_eq!(cfg.kube_config_path, "/tmp/out/kubeconfig.yaml");
    }

    #[test]
    fn resolving_twice_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = named("eks-d", dir.path().join("d.yaml").to_str().unwrap());
        cfg.kubectl_commands_output_path = "/tmp/out/kubectl".to_string();

        resolve(&mut cfg).unwrap();
        let first = cfg.clone();
        resolve(&mut cfg).unwrap();

        assert_eq!(cfg, first);
    }

    #[test]
    fn config_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("cfg.yaml");
        let mut cfg = named("eks-e", nested.to_str().unwrap());

        resolve(&mut cfg).unwrap();

        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn uncreatable_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();
        let mut cfg = named("eks-f", file.join("cfg.yaml").to_str().unwrap());

        let err = resolve(&mut cfg).unwrap_err();

        assert!(matches!(err, Error::Io { .. }), "got {err:?}");
    }
}
