//! Error types for configuration resolution.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving configuration values
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A requested file or resource reference does not exist
    #[error("resource not found: {location}")]
    ResourceNotFound {
        location: String,
    },

    /// Unreadable file or directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corrupt or unreadable archive container
    #[error("corrupt archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A version string did not parse as `v{major}.{minor}`
    #[error("invalid version string: {input:?}")]
    InvalidVersion {
        input: String,
    },

    /// A value requested as an integer did not parse as one
    #[error("value {value:?} for key {key:?} is not an integer")]
    InvalidInt {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A lock guarding shared state was poisoned by a panicking thread
    #[error("lock poisoned: {0}")]
    Lock(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Maps a poisoned-lock error into the library error type.
pub(crate) fn lock_err<T>(err: std::sync::PoisonError<T>) -> ConfigError {
    ConfigError::Lock(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::ResourceNotFound {
            location: "res:app.properties".into(),
        };
        assert!(err.to_string().contains("res:app.properties"));

        let err = ConfigError::InvalidVersion {
            input: "v1".into(),
        };
        assert!(err.to_string().contains("v1"));
    }

    #[test]
    fn test_invalid_int_keeps_source() {
        use std::error::Error;

        let source = "abc".parse::<i64>().unwrap_err();
        let err = ConfigError::InvalidInt {
            key: "retries".into(),
            value: "abc".into(),
            source,
        };
        assert!(err.source().is_some());
    }
}
