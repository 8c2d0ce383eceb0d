//! Error types for the CLI

/// CLI Result type
pub type Result<T> = std::result::Result<T, Error>;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ekstester_config::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl Error {
    pub fn logging(message: impl Into<String>) -> Self {
        Error::Logging {
            message: message.into(),
        }
    }

    /// Process exit code: 2 for configuration the user must fix, 1 otherwise
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(e) if e.is_validation() => 2,
            _ => 1,
        }
    }
}
