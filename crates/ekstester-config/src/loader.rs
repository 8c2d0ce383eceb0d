//! Configuration loader (defaults or file, then environment)
//!
//! Layers, later ones winning:
//! 1. The default document when no file is given, otherwise the YAML file
//!    alone (keys absent from the file stay at their zero value)
//! 2. `config-path` set to the loaded file's absolute path
//! 3. Environment variables prefixed `EKSTESTER_`, with `__` separating
//!    nested sections and `_` standing for `-` in keys
//!
//! `EKSTESTER_ADD_ON_SECRETS__ENABLE=true` sets `add-on-secrets.enable`.
//!
//! A variable whose key names a string field keeps its raw text, so
//! `EKSTESTER_PARAMETERS__VERSION=1.10` stays `"1.10"` instead of becoming a
//! float. Any other variable is parsed the way figment parses env values.

use std::path::Path;
use std::str::FromStr;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::value::Value;
use figment::Figment;
use tracing::debug;

use crate::config::Config;
use crate::defaults::new_default;
use crate::host::HostEnv;
use crate::{Error, Result, ENV_PREFIX};

/// Load a configuration document
///
/// The result is not resolved; pass it through
/// [`Resolver`](crate::Resolver) before use.
pub fn load_config(path: Option<&Path>, host: &HostEnv) -> Result<Config> {
    load_with_prefix(path, host, ENV_PREFIX)
}

fn load_with_prefix(path: Option<&Path>, host: &HostEnv, prefix: &str) -> Result<Config> {
    let figment = match path {
        Some(path) => {
            // figment treats a missing file as an empty layer
            std::fs::metadata(path).map_err(|e| Error::io(path, e))?;
            let absolute = std::path::absolute(path).map_err(|e| Error::io(path, e))?;
            debug!(path = %absolute.display(), "loading configuration file");
            Figment::from(Yaml::file(&absolute)).merge(Serialized::default(
                "config-path",
                absolute.to_string_lossy().into_owned(),
            ))
        }
        None => {
            debug!("loading default configuration");
            Figment::from(Serialized::defaults(new_default(host)))
        }
    };

    merge_env(figment, prefix)
        .extract()
        .map_err(|e| Error::serialization(e.to_string()))
}

/// Merge `<prefix>*` variables, typed by the field each one targets
fn merge_env(mut figment: Figment, prefix: &str) -> Figment {
    let shape = Figment::from(Serialized::defaults(Config::default()));
    let env = Env::prefixed(prefix)
        .split("__")
        .map(|key| key.as_str().replace('_', "-").into());

    for (key, raw) in env.iter() {
        let key = key.as_str().to_ascii_lowercase();
        let value = match shape.find_value(&key) {
            Ok(Value::String(..)) => Value::from(raw),
            _ => Value::from_str(&raw).unwrap_or_else(|_| Value::from(raw.clone())),
        };
        debug!(%key, "configuration override from environment");
        figment = figment.merge(Serialized::default(&key, value));
    }
    figment
}
