//! Error types for the audit engine

use thiserror::Error;

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while harvesting or serving audits
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to initialize a harvester backend
    #[error("Harvester initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load a URL (unreachable host, bad response, navigation timeout)
    #[error("Failed to load URL: {0}")]
    LoadError(String),

    /// Failed to capture a screenshot or other rendered output
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to build the element inventory from a loaded page
    #[error("Harvest failed: {0}")]
    HarvestError(String),

    /// Invalid configuration or request (malformed URL, bad request body)
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// CDP-specific error
    #[cfg(feature = "cdp")]
    #[error("CDP error: {0}")]
    CdpError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

#[cfg(feature = "cdp")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::CdpError(err.to_string())
    }
}
