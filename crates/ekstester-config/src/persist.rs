//! YAML persistence of configuration documents

use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::{Error, Result};

impl Config {
    /// Serialize the document as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::serialization(e.to_string()))
    }

    /// Parse a YAML document; absent keys take their zero value
    pub fn from_yaml(input: &str) -> Result<Self> {
        serde_yaml::from_str(input).map_err(|e| Error::serialization(e.to_string()))
    }

    /// Write the document to `config-path`, creating its directory
    pub fn sync(&self) -> Result<()> {
        if self.config_path.is_empty() {
            return Err(Error::validation_for_field(
                "config-path",
                "empty config-path, resolve the configuration before syncing",
            ));
        }
        let path = Path::new(&self.config_path);
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_private_dir(dir)?;
        }

        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| Error::io(path, e))?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

pub(crate) fn create_private_dir(dir: &Path) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir).map_err(|e| Error::io(dir, e))
}
