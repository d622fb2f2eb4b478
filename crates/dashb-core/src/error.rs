//! Centralized error types for the DashB pipeline.
//!
//! The refresh pipeline distinguishes three failure families:
//! - [`NetworkError`]: the request never produced a usable body
//! - [`DataShapeError`]: a JSON body arrived but lacked what we needed
//! - [`FeedParseError`]: an RSS/XML body could not be parsed
//!
//! None of them are shown to the end user by the pipeline; a failed source just
//! keeps its previous value. `user_message()` exists for the binary's startup
//! path and for any presentation layer that wants to show a hint.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Data shape error: {0}")]
    DataShape(#[from] DataShapeError),

    #[error("Feed parse error: {0}")]
    FeedParse(#[from] FeedParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

const DATA_SHAPE_MESSAGE: &str = "Received unexpected data. Showing the last known values.";
const FEED_PARSE_MESSAGE: &str = "The news feed could not be read. Showing the last headlines.";
const IO_MESSAGE: &str = "A file operation failed. Please try again.";
const OTHER_MESSAGE: &str = "An unexpected error occurred. Please try again.";

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// For `Other`, the first known error type in the cause chain decides.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::DataShape(_) => DATA_SHAPE_MESSAGE,
            AppError::FeedParse(_) => FEED_PARSE_MESSAGE,
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => IO_MESSAGE,
            AppError::Other(e) => chain_message(e),
        }
    }
}

fn chain_message(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<NetworkError>() {
            return e.user_message();
        }
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            return e.user_message();
        }
        if cause.is::<DataShapeError>() {
            return DATA_SHAPE_MESSAGE;
        }
        if cause.is::<FeedParseError>() {
            return FEED_PARSE_MESSAGE;
        }
        if cause.is::<std::io::Error>() {
            return IO_MESSAGE;
        }
    }
    OTHER_MESSAGE
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
            NetworkError::InvalidUrl(_) => "A service address is invalid. Check your settings.",
        }
    }
}

/// A JSON payload was received but did not have the expected shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataShapeError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("No results for query: {0}")]
    EmptyResults(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// RSS/XML parsing failures.
#[derive(Debug, Error)]
pub enum FeedParseError {
    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("Document has no root element")]
    EmptyDocument,

    #[error("Document ended inside <{0}>")]
    UnexpectedEof(String),

    #[error("Read error: {0}")]
    Io(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let app_err: AppError = NetworkError::Timeout.into();
        assert!(matches!(app_err, AppError::Network(NetworkError::Timeout)));

        let app_err: AppError = FeedParseError::EmptyDocument.into();
        assert!(matches!(app_err, AppError::FeedParse(FeedParseError::EmptyDocument)));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Network(NetworkError::Timeout);
        assert_eq!(
            app_err.user_message(),
            "The request timed out. Please try again."
        );
    }

    #[test]
    fn test_server_error_message_depends_on_status() {
        let outage = NetworkError::ServerError {
            status: 503,
            message: "unavailable".into(),
        };
        let rejected = NetworkError::ServerError {
            status: 404,
            message: "missing".into(),
        };
        assert!(outage.user_message().contains("later"));
        assert_eq!(rejected.user_message(), "The request failed. Please try again.");
    }

    #[test]
    fn test_wrapped_errors_keep_their_message() {
        let err = anyhow::Error::new(NetworkError::Timeout).context("Failed to build weather source");
        assert_eq!(
            AppError::from(err).user_message(),
            "The request timed out. Please try again."
        );

        let err: anyhow::Error = ConfigError::ParseError("expected `]`".into()).into();
        assert_eq!(
            AppError::from(err).user_message(),
            "Configuration file is malformed. Check your settings."
        );

        let err = anyhow::anyhow!("something odd");
        assert_eq!(
            AppError::from(err).user_message(),
            "An unexpected error occurred. Please try again."
        );
    }

    #[test]
    fn test_data_shape_display() {
        let err = DataShapeError::EmptyResults("Atlantis".into());
        assert_eq!(err.to_string(), "No results for query: Atlantis");
    }
}
