//! Error types for the dictionary index.

use thiserror::Error;

/// Main error type for jdict operations.
#[derive(Error, Debug)]
pub enum JdictError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for jdict operations.
pub type Result<T> = std::result::Result<T, JdictError>;

impl JdictError {
    /// Create an invalid configuration error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        JdictError::InvalidConfig(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        JdictError::InvalidArgument(msg.into())
    }

    /// Create an index construction error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        JdictError::Index(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JdictError::invalid_config("kana window must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: kana window must be at least 1"
        );

        let err = JdictError::index("duplicate sequence number 1000220");
        assert_eq!(
            err.to_string(),
            "Index error: duplicate sequence number 1000220"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: JdictError = io.into();
        assert!(matches!(err, JdictError::Io(_)));
    }
}
