use std::fmt;
use std::sync::RwLock;

/// Supplies the access token attached to authorized calls.
///
/// Read once per attempt, so a rotated token is picked up by the next retry.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// A token fixed at construction
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Option<String> {
        Some(self.0.clone()).filter(|t| !t.is_empty())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

/// A token that can be replaced while the client is in use
#[derive(Default)]
pub struct SharedToken {
    inner: RwLock<Option<String>>,
}

impl SharedToken {
    pub fn new(token: Option<String>) -> Self {
        Self {
            inner: RwLock::new(token),
        }
    }

    pub fn set(&self, token: Option<String>) {
        // a poisoned lock still holds a usable value
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }
}

impl TokenProvider for SharedToken {
    fn access_token(&self) -> Option<String> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().filter(|t| !t.is_empty())
    }
}

impl fmt::Debug for SharedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let present = self.access_token().is_some();
        f.debug_struct("SharedToken").field("present", &present).finish()
    }
}
