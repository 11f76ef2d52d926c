//! Error types for afreport.

use thiserror::Error;

/// Boxed error cause carried by wrapping variants.
type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for afreport operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while fetching and processing reports.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Malformed input: bad date format, unknown report name, or an HTML
    /// payload disguised as CSV.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing API key.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Non-200 HTTP status or network failure on the JSON fetch path.
    #[error("Communication error: {message}")]
    Communication {
        /// HTTP status code, if a response was received.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// Failure during CSV streaming, decoding, or file persistence.
    #[error("Processing error: {message}")]
    Processing {
        /// Description of the failure.
        message: String,
        /// The underlying cause.
        #[source]
        source: Option<Cause>,
    },

    /// Catch-all translation at the public entry point.
    #[error("Unknown error: {message}")]
    Unknown {
        /// Description of the failure.
        message: String,
        /// The underlying cause.
        #[source]
        source: Option<Cause>,
    },
}

impl ReportError {
    /// Creates a processing error wrapping the given cause.
    pub fn processing<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Processing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an unknown error wrapping the given cause.
    pub fn unknown<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unknown {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a communication error without a status code.
    pub fn communication(message: impl Into<String>) -> Self {
        Self::Communication {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a communication error for a non-200 HTTP status.
    pub fn status(status: u16) -> Self {
        Self::Communication {
            status: Some(status),
            message: format!("unexpected HTTP status {status}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_processing_preserves_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = ReportError::processing("writing report copy", io);

        assert!(err.to_string().contains("writing report copy"));
        let cause = err.source().expect("cause should be preserved");
        assert!(cause.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_status_message() {
        let err = ReportError::status(403);
        assert!(matches!(
            err,
            ReportError::Communication {
                status: Some(403),
                ..
            }
        ));
    }
}
