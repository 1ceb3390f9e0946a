use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Remote method name: `category.method` (e.g. `ads.getCampaigns`), or a bare
/// top-level method such as `execute`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MethodName(String);

impl MethodName {
    pub fn new(name: impl Into<String>) -> Result<Self, MethodNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part before the dot, e.g. `ads`; `None` for top-level methods
    pub fn category(&self) -> Option<&str> {
        self.0.split_once('.').map(|(category, _)| category)
    }

    fn validate(name: &str) -> Result<(), MethodNameError> {
        if name.is_empty() {
            return Err(MethodNameError::Empty);
        }

        let (head, tail) = match name.split_once('.') {
            Some((category, method)) => (category, Some(method)),
            None => (name, None),
        };

        if head.is_empty() || tail.is_some_and(str::is_empty) {
            return Err(MethodNameError::EmptySegment);
        }

        if !head.starts_with(|c: char| c.is_ascii_lowercase()) {
            return Err(MethodNameError::InvalidStart);
        }

        for ch in head.chars().chain(tail.unwrap_or_default().chars()) {
            if !ch.is_ascii_alphanumeric() && ch != '_' {
                return Err(MethodNameError::InvalidCharacter(ch));
            }
        }

        Ok(())
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MethodName {
    type Err = MethodNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for MethodName {
    type Error = MethodNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MethodName> for String {
    fn from(name: MethodName) -> Self {
        name.0
    }
}

impl AsRef<str> for MethodName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MethodNameError {
    #[error("Method name cannot be empty")]
    Empty,
    #[error("Method name must look like `method` or `category.method`")]
    EmptySegment,
    #[error("Method name must start with a lowercase letter")]
    InvalidStart,
    #[error("Invalid character '{0}' in method name")]
    InvalidCharacter(char),
}

impl From<MethodNameError> for crate::Error {
    fn from(err: MethodNameError) -> Self {
        crate::error::ArgumentError::invalid_value("method", err.to_string()).into()
    }
}
