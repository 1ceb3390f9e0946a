use thiserror::Error;

/// Failures reading a response body, distinct from classified API errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Malformed response: {reason}")]
    Malformed { reason: String },

    #[error("Response envelope has neither `response` nor `error` node")]
    MissingEnvelope,

    #[error("Cannot convert {found} to {expected}")]
    Conversion {
        expected: &'static str,
        found: String,
    },

    #[error("Missing field `{field}` in response")]
    MissingField { field: String },
}

impl ResponseError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn conversion(expected: &'static str, found: impl Into<String>) -> Self {
        Self::Conversion {
            expected,
            found: found.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}
