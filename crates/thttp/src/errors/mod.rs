use std::path::PathBuf;

/// Result type for thttp operations
pub type ThttpResult<T> = Result<T, ThttpError>;

/// Custom error types for better error handling
#[derive(Debug, thiserror::Error)]
pub enum ThttpError {
    #[error("{message}")]
    Configuration { message: String },
    #[error("{url}: {message}")]
    Network { url: String, message: String },
    #[error("{url}: {detail}")]
    RemoteStatus { url: String, detail: String },
    /// The upload target answered a PUT with something other than 200
    #[error("put {url}: {detail}")]
    UploadRejected { url: String, detail: String },
    #[error("{}: {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    /// Logging initialization failed
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

impl ThttpError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn network(url: impl ToString, err: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalIo {
            path: path.into(),
            source,
        }
    }
}
