use super::{
    classify, ArgumentError, ConfigError, Error, NetworkError, ResponseError, VkError,
};

/// Builder for creating errors with a fluent API
pub struct ErrorBuilder;

impl ErrorBuilder {
    /// Network errors
    pub fn network() -> NetworkErrorBuilder {
        NetworkErrorBuilder
    }

    /// Local parameter validation errors
    pub fn argument() -> ArgumentErrorBuilder {
        ArgumentErrorBuilder
    }

    /// Response decoding errors
    pub fn response() -> ResponseErrorBuilder {
        ResponseErrorBuilder
    }

    /// Configuration errors
    pub fn config() -> ConfigErrorBuilder {
        ConfigErrorBuilder
    }

    /// Classified API error from a raw code and message
    pub fn api(code: i32, message: impl Into<String>) -> Error {
        classify(VkError::new(code, message)).into()
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Error {
        Error::Internal(message.into())
    }
}

pub struct NetworkErrorBuilder;

impl NetworkErrorBuilder {
    pub fn http_request(self, message: impl Into<String>, status: Option<u16>) -> Error {
        NetworkError::http_request(message, status).into()
    }

    pub fn timeout(self) -> Error {
        NetworkError::Timeout.into()
    }

    pub fn connection(self, reason: impl Into<String>) -> Error {
        NetworkError::connection(reason).into()
    }
}

pub struct ArgumentErrorBuilder;

impl ArgumentErrorBuilder {
    pub fn missing_required(self, name: impl Into<String>) -> Error {
        ArgumentError::missing_required(name).into()
    }

    pub fn conflicting(self, first: impl Into<String>, second: impl Into<String>) -> Error {
        ArgumentError::conflicting(first, second).into()
    }

    pub fn one_of_required(self, first: impl Into<String>, second: impl Into<String>) -> Error {
        ArgumentError::one_of_required(first, second).into()
    }

    pub fn invalid_value(self, name: impl Into<String>, reason: impl Into<String>) -> Error {
        ArgumentError::invalid_value(name, reason).into()
    }
}

pub struct ResponseErrorBuilder;

impl ResponseErrorBuilder {
    pub fn malformed(self, reason: impl Into<String>) -> Error {
        ResponseError::malformed(reason).into()
    }

    pub fn missing_envelope(self) -> Error {
        ResponseError::MissingEnvelope.into()
    }

    pub fn conversion(self, expected: &'static str, found: impl Into<String>) -> Error {
        ResponseError::conversion(expected, found).into()
    }

    pub fn missing_field(self, field: impl Into<String>) -> Error {
        ResponseError::missing_field(field).into()
    }
}

pub struct ConfigErrorBuilder;

impl ConfigErrorBuilder {
    pub fn invalid_field(self, field: impl Into<String>, reason: impl Into<String>) -> Error {
        ConfigError::invalid_field(field, reason).into()
    }

    pub fn missing_field(self, field: impl Into<String>) -> Error {
        ConfigError::missing_field(field).into()
    }

    pub fn out_of_range(
        self,
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Error {
        ConfigError::out_of_range(field, value, expected).into()
    }

    pub fn unreadable(self, path: impl Into<String>, reason: impl Into<String>) -> Error {
        ConfigError::unreadable(path, reason).into()
    }

    pub fn malformed(self, reason: impl Into<String>) -> Error {
        ConfigError::malformed(reason).into()
    }

    pub fn invalid_env(
        self,
        variable: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Error {
        ConfigError::invalid_env(variable, value, reason).into()
    }
}
