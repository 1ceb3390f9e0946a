use super::{Error, Result};
use std::fmt::Display;

/// Attach a message to failures that have no dedicated variant.
///
/// The result is always [`Error::Internal`]. Classified API errors must be
/// propagated with `?` instead so their kind survives.
pub trait ErrorContext<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E: Display> ErrorContext<T> for std::result::Result<T, E> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::Internal(format!("{}: {e}", f())))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| Error::Internal(format!("{msg}: {e}")))
    }
}

impl<T> ErrorContext<T> for Option<T> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| Error::Internal(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.ok_or_else(|| Error::Internal(msg.to_string()))
    }
}
