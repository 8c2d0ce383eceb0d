//! Subscriber setup from the configured log level and outputs
//!
//! `RUST_LOG` wins over `log-level` when set. Each entry of `log-outputs`
//! gets its own fmt layer: "stderr", "stdout", or a file path appended to.
//! A file output that cannot be opened is a `log-outputs` validation error.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::{Error, Result};

const FALLBACK_LEVEL: &str = "info";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber
pub fn init(level: &str, outputs: &[String]) -> Result<()> {
    let layers = layers(outputs)?;
    tracing_subscriber::registry()
        .with(layers)
        .with(filter(level))
        .try_init()
        .map_err(|e| Error::logging(e.to_string()))
}

fn filter(level: &str) -> EnvFilter {
    let level = if level.is_empty() { FALLBACK_LEVEL } else { level };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn layers(outputs: &[String]) -> Result<Vec<BoxedLayer>> {
    if outputs.is_empty() {
        return Ok(vec![layer(std::io::stderr, true)]);
    }
    outputs
        .iter()
        .map(|output| -> Result<BoxedLayer> {
            match output.as_str() {
                "stderr" => Ok(layer(std::io::stderr, true)),
                "stdout" => Ok(layer(std::io::stdout, true)),
                path => {
                    let file = OpenOptions::new()
                        .create(true)
                        .append(true)
                        .open(path)
                        .map_err(|e| {
                            ekstester_config::Error::validation_for_field(
                                "log-outputs",
                                format!("log-outputs {path:?} cannot be opened: {e}"),
                            )
                        })?;
                    Ok(layer(Mutex::new(file), false))
                }
            }
        })
        .collect()
}

fn layer<W>(writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_outputs_fall_back_to_stderr() {
        assert_eq!(layers(&[]).unwrap().len(), 1);
    }

    #[test]
    fn one_layer_per_output() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ekstester.log");
        let outputs = vec![
            "stderr".to_string(),
            "stdout".to_string(),
            file.to_string_lossy().into_owned(),
        ];

        assert_eq!(layers(&outputs).unwrap().len(), 3);
        assert!(file.exists());
    }

    #[test]
    fn unopenable_file_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("ekstester.log");

        let err = layers(&[path.to_string_lossy().into_owned()]).err().unwrap();

        match &err {
            Error::Config(inner) => assert_eq!(inner.field(), Some("log-outputs")),
            other => panic!("Expected Config variant, got {other:?}"),
        }
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("cannot be opened"));
    }
}
