//! Error types for opgen

use thiserror::Error;

/// Main error type for generation and export operations
#[derive(Error, Debug)]
pub enum Error {
    /// The credential-manager executable could not be located
    #[error("{0}")]
    ToolNotFound(String),

    /// The credential-manager ran and failed, or could not be spawned
    #[error("{0}")]
    ExternalProcess(String),

    /// Generation requested with unusable parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Credential record rejected before export
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Another export is still running on the same exporter
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// System clipboard unavailable or rejected the write
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<arboard::Error> for Error {
    fn from(err: arboard::Error) -> Self {
        Error::Clipboard(err.to_string())
    }
}

/// Result type alias for opgen operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ToolNotFound("install the tool".to_string());
        assert_eq!(err.to_string(), "install the tool");

        let err = Error::ExternalProcess("[ERROR] not signed in".to_string());
        assert!(err.to_string().contains("not signed in"));

        let err = Error::InvalidConfig("length must be at least 1".to_string());
        assert!(err.to_string().contains("length must be at least 1"));

        let err = Error::ExportInProgress;
        assert_eq!(err.to_string(), "An export is already in progress");
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("not = [valid").unwrap_err();
        let err: Error = toml_err.into();
        match err {
            Error::Config(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Config"),
        }
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing"));
    }
}
