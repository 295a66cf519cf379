use thiserror::Error;

/// Top-level error type for ExportDesk.
///
/// Crates with their own error enums implement `From<TheirError> for
/// ExportDeskError` so the binary can use `?` across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportDeskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ExportDeskError {
    fn from(err: toml::de::Error) -> Self {
        ExportDeskError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ExportDeskError {
    fn from(err: toml::ser::Error) -> Self {
        ExportDeskError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ExportDeskError {
    fn from(err: serde_json::Error) -> Self {
        ExportDeskError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for ExportDesk operations.
pub type Result<T> = std::result::Result<T, ExportDeskError>;
