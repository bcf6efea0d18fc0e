//! Error types
//!
//! The cleaner has no malformed-input failures: the only runtime error is
//! the downstream sink refusing the cleaned bytes.

use std::io;

use thiserror::Error;

/// Failure while handing a cleaned chunk to the sink
#[derive(Debug, Error)]
pub enum CleanerError {
    /// Sink returned an I/O error
    #[error("sink write failed: {0}")]
    Sink(#[from] io::Error),
    /// Sink accepted fewer bytes than offered
    #[error("short write: sink accepted {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },
}

impl From<CleanerError> for io::Error {
    fn from(err: CleanerError) -> Self {
        match err {
            CleanerError::Sink(e) => e,
            short @ CleanerError::ShortWrite { .. } => {
                io::Error::new(io::ErrorKind::WriteZero, short)
            }
        }
    }
}

/// Configuration parsing errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_write_maps_to_write_zero() {
        let err: io::Error = CleanerError::ShortWrite { written: 2, expected: 5 }.into();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert!(err.to_string().contains("2 of 5"));
    }

    #[test]
    fn test_sink_error_passes_through() {
        let inner = io::Error::new(io::ErrorKind::BrokenPipe, "gone");
        let err: io::Error = CleanerError::from(inner).into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(err.to_string(), "gone");
    }
}
