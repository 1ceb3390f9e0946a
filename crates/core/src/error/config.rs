use thiserror::Error;

/// Client configuration failures, raised while loading or validating
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{field}` is invalid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("`{field}` must be set")]
    MissingField { field: String },

    #[error("`{field}` = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Cannot read configuration file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Malformed TOML configuration: {reason}")]
    Malformed { reason: String },

    #[error("Environment override {variable}={value:?} is invalid: {reason}")]
    InvalidEnv {
        variable: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn out_of_range(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn invalid_env(
        variable: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEnv {
            variable: variable.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Configuration key the error refers to, when there is one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidField { field, .. }
            | Self::MissingField { field }
            | Self::OutOfRange { field, .. } => Some(field),
            Self::InvalidEnv { variable, .. } => Some(variable),
            Self::Unreadable { .. } | Self::Malformed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = ConfigError::out_of_range("timeout_secs", "0", "greater than 0");
        assert_eq!(
            err.to_string(),
            "`timeout_secs` = 0 is out of range (expected greater than 0)"
        );
        assert_eq!(err.field(), Some("timeout_secs"));

        let env = ConfigError::invalid_env("VKAPI_MAX_RETRIES", "many", "invalid digit");
        assert!(env.to_string().contains("VKAPI_MAX_RETRIES=\"many\""));
        assert_eq!(ConfigError::malformed("expected `=`").field(), None);
    }
}
