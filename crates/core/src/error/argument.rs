use thiserror::Error;

/// Local validation failures raised while building a parameter bag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Missing required parameter: {name}")]
    MissingRequired { name: String },

    #[error("Parameters {first} and {second} are mutually exclusive")]
    ConflictingArguments { first: String, second: String },

    #[error("One of {first} or {second} must be specified")]
    OneOfRequired { first: String, second: String },

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

impl ArgumentError {
    pub fn missing_required(name: impl Into<String>) -> Self {
        Self::MissingRequired { name: name.into() }
    }

    pub fn conflicting(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::ConflictingArguments {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn one_of_required(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::OneOfRequired {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
