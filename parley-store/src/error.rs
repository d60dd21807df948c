//! Store error types.

use thiserror::Error;

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An environment override held a value that could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: String,
        /// Offending value.
        value: String,
    },

    /// Settings file already exists.
    #[error("Settings file already exists: {0}")]
    AlreadyExists(String),
}

impl StoreError {
    /// Returns true if the error means the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = StoreError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(err.is_not_found());
        let err = StoreError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_env_display() {
        let err = StoreError::InvalidEnv {
            var: "PARLEY_PRIMARY".into(),
            value: "mars".into(),
        };
        assert_eq!(err.to_string(), "Invalid value for PARLEY_PRIMARY: \"mars\"");
    }
}
