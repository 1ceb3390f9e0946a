use thiserror::Error;

/// Transport-level failures
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("VK API endpoint returned an HTTP failure: {message}")]
    HttpRequest {
        message: String,
        status: Option<u16>,
    },

    #[error("Transport error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Could not reach the VK API: {reason}")]
    Connection { reason: String },
}

impl NetworkError {
    pub fn http_request(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::HttpRequest {
            message: message.into(),
            status,
        }
    }

    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
        }
    }

    /// Worth another attempt: server-side statuses, timeouts, dropped connections
    pub fn is_recoverable(&self) -> bool {
        match self {
            NetworkError::HttpRequest { status: Some(s), .. } => *s >= 500,
            NetworkError::HttpRequest { status: None, .. } => true,
            NetworkError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            NetworkError::Timeout | NetworkError::Connection { .. } => true,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::HttpRequest { status, .. } => *status,
            NetworkError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_network_errors() {
        assert!(NetworkError::Timeout.is_recoverable());
        assert!(NetworkError::connection("reset by peer").is_recoverable());
        assert!(NetworkError::http_request("bad gateway", Some(502)).is_recoverable());
        assert!(!NetworkError::http_request("not found", Some(404)).is_recoverable());
    }

    #[test]
    fn test_status() {
        assert_eq!(NetworkError::http_request("x", Some(503)).status(), Some(503));
        assert_eq!(NetworkError::Timeout.status(), None);
    }
}
