mod api;
mod argument;
mod builder;
mod config;
mod context;
mod network;
mod response;

pub use api::{classify, ApiError, ErrorKind, VkError};
pub(crate) use api::RawVkError;
pub use argument::ArgumentError;
pub use builder::ErrorBuilder;
pub use config::ConfigError;
pub use context::ErrorContext;
pub use network::NetworkError;
pub use response::ResponseError;

use thiserror::Error;

/// Main error type that encompasses all domain-specific errors
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Operation was cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Check if the transport should be retried for this error.
    ///
    /// Classified API errors are not covered here; the dispatcher decides on
    /// rate limiting and captcha by kind.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Network(e) => e.is_recoverable(),
            _ => false,
        }
    }

    /// The classified API error, if this is one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Shortcut for matching on the classified kind
    pub fn kind(&self) -> Option<ErrorKind> {
        self.api_error().map(|e| e.kind)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Api(_) => ErrorCategory::Api,
            Error::Argument(_) => ErrorCategory::Validation,
            Error::Network(_) => ErrorCategory::Network,
            Error::Response(_) | Error::Serialization(_) | Error::UrlParse(_) => {
                ErrorCategory::Data
            }
            Error::Config(_) => ErrorCategory::Configuration,
            Error::Cancelled => ErrorCategory::Cancelled,
            Error::Internal(_) => ErrorCategory::Internal,
        }
    }
}

/// Error categories for classification and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Api,
    Validation,
    Network,
    Data,
    Configuration,
    Cancelled,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Api => write!(f, "api"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Data => write!(f, "data"),
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::Cancelled => write!(f, "cancelled"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
